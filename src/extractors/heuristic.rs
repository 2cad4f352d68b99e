//! Shape-based scans used when no known selector matched.

use regex::Regex;

use super::script::first_capture;
use crate::document::DocumentView;

/// First capture of `pattern` in the text of any node matching `selector`.
pub(super) fn scan_text(view: &DocumentView, selector: &str, pattern: &Regex) -> Option<String> {
    view.find_all(selector)
        .iter()
        .find_map(|node| first_capture(pattern, &view.text(node)))
}

/// First node with more than `min_chars` characters of text and none of the
/// rejected phrases. Phrase checks ignore case.
pub(super) fn find_block(
    view: &DocumentView,
    selector: &str,
    min_chars: usize,
    reject_phrases: &[String],
) -> Option<String> {
    view.find_all(selector).iter().find_map(|node| {
        let text = view.text(node);
        if text.chars().count() <= min_chars {
            return None;
        }

        let lowered = text.to_lowercase();
        let rejected = reject_phrases
            .iter()
            .any(|phrase| lowered.contains(&phrase.to_lowercase()));
        (!rejected).then_some(text)
    })
}
