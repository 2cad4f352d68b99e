//! Free-text cleanup: whitespace collapse, boilerplate removal, length cap.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{NormalizedValue, Rejection};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Shop chrome that leaks into description containers, applied in order.
/// Spans are bounded so one stray keyword cannot swallow real content.
static BOILERPLATE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // fulfilment and returns box
        r"(?i)Dispatches from\s*Amazon.{0,300}?Returns.{0,300}?Read full return policy",
        r"(?i)Payment\s*Secure transaction.{0,300}?We don[’']t share your credit card details[^.]{0,80}\.?",
        r"(?i)Shipping & Returns.{0,300}?Learn more",
        // delivery promises
        r"(?i)FREE delivery.{0,200}?Details",
        r"(?i)Get it as soon as.{0,200}?Details",
        r"(?i)Delivered\b.{0,200}?Details",
        // legal footer and site navigation
        r"(?i)(?:©\s*)?(?:\d{4}\s*[-–]\s*\d{4},?\s*)?Amazon(?:\.com)?,?\s*Inc\.?.{0,60}?All rights reserved\.?",
        r"(?i)Back to top\s*Get to Know Us.*$",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

pub fn strip_boilerplate(text: &str) -> String {
    BOILERPLATE
        .iter()
        .fold(text.to_string(), |acc, pattern| pattern.replace_all(&acc, " ").into_owned())
}

/// Clean `text` and cap it at `max_chars` characters. The cut is recorded in
/// `truncated` so a short result can be told apart from a shortened one.
pub fn clean(text: &str, max_chars: usize, boilerplate: bool) -> Result<NormalizedValue, Rejection> {
    let mut content = collapse_whitespace(text);
    if boilerplate {
        content = collapse_whitespace(&strip_boilerplate(&content));
    }

    if content.is_empty() {
        return Err(Rejection::Empty);
    }

    let truncated = content.chars().count() > max_chars;
    if truncated {
        content = content.chars().take(max_chars).collect();
    }

    Ok(NormalizedValue::Text { content, truncated })
}
