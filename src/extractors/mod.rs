//! Matcher evaluation
//!
//! Each module handles one family of sources:
//! - JSON-LD objects (with @graph support)
//! - key/value patterns inside inline scripts
//! - CSS selectors with text or attribute accessors
//! - shape-based scans over page text

mod css;
mod heuristic;
mod jsonld;
mod script;

use crate::document::DocumentView;
use crate::rules::Matcher;

impl Matcher {
    /// Run this matcher against a view, returning the raw value and an
    /// optional qualifier. `None` means the source was silent.
    pub fn evaluate(&self, view: &DocumentView) -> Option<(String, Option<String>)> {
        match self {
            Matcher::JsonLd {
                type_name,
                path,
                qualifier_path,
            } => jsonld::find_in_jsonld(view, type_name, path, qualifier_path.as_deref()),
            Matcher::ScriptPattern { pattern, qualifier } => {
                script::find_in_scripts(view, pattern, qualifier.as_ref())
            }
            Matcher::Selector { css, accessor } => {
                css::find_first(view, css, accessor).map(|value| (value, None))
            }
            Matcher::TextPattern { css, pattern } => {
                heuristic::scan_text(view, css, pattern).map(|value| (value, None))
            }
            Matcher::TextBlock {
                css,
                min_chars,
                reject_phrases,
            } => heuristic::find_block(view, css, *min_chars, reject_phrases)
                .map(|value| (value, None)),
        }
    }
}
