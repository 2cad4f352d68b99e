//! Key/value patterns over inline scripts
//!
//! Shop templates often inline their state as loosely JSON-shaped
//! JavaScript that does not survive a strict JSON parse, so these rules match
//! with regexes instead.

use regex::Regex;
use tracing::trace;

use crate::document::DocumentView;

/// First payload where `pattern` captures a non-empty value. The qualifier is
/// only looked for in that same payload, so a currency code is never paired
/// with a price from a different script.
pub(super) fn find_in_scripts(
    view: &DocumentView,
    pattern: &Regex,
    qualifier: Option<&Regex>,
) -> Option<(String, Option<String>)> {
    view.script_payloads().iter().find_map(|payload| {
        let value = decode_string_literal(first_capture(pattern, payload)?)?;
        let qualifier = qualifier.and_then(|q| first_capture(q, payload));
        trace!(%value, ?qualifier, "script pattern matched");
        Some((value, qualifier))
    })
}

/// Group 1 if the pattern has one, else the whole match; blank counts as no match.
pub(super) fn first_capture(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern.captures_iter(haystack).find_map(|caps| {
        let m = caps.get(1).or_else(|| caps.get(0))?;
        let value = m.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// A capture that is a whole JSON string literal (quotes included) is
/// unescaped; anything else passes through unchanged.
fn decode_string_literal(capture: String) -> Option<String> {
    if capture.len() < 2 || !capture.starts_with('"') || !capture.ends_with('"') {
        return Some(capture);
    }

    match serde_json::from_str::<String>(&capture) {
        Ok(decoded) => {
            let decoded = decoded.trim();
            (!decoded.is_empty()).then(|| decoded.to_string())
        }
        Err(e) => {
            trace!("script capture is not a valid JSON string: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_with_currency_from_same_script() {
        let html = r#"
        <html>
        <head>
            <script type="text/javascript">
                var tracking = {"currencyCode": "GBP"};
            </script>
            <script type="text/javascript">
                P.register('twister', {"price": "12.49", "currencyCode": "EUR"});
            </script>
        </head>
        </html>
        "#;

        let view = DocumentView::parse(html);
        let pattern = Regex::new(r#""price"\s*:\s*["']?([\d.,]+)"#).unwrap();
        let qualifier = Regex::new(r#""currencyCode"\s*:\s*["']?([A-Z]{3})"#).unwrap();

        let found = find_in_scripts(&view, &pattern, Some(&qualifier));
        assert_eq!(found, Some(("12.49".to_string(), Some("EUR".to_string()))));
    }

    #[test]
    fn test_no_qualifier_in_payload() {
        let view = DocumentView::parse(r#"<script>window.state = {price: 3, "price": "7.00"};</script>"#);
        let pattern = Regex::new(r#""price"\s*:\s*"([\d.]+)""#).unwrap();
        let qualifier = Regex::new(r#""currencyCode"\s*:\s*"([A-Z]{3})""#).unwrap();

        let found = find_in_scripts(&view, &pattern, Some(&qualifier));
        assert_eq!(found, Some(("7.00".to_string(), None)));
    }

    #[test]
    fn test_quoted_capture_is_unescaped() {
        let html = r#"<script>
            var product = {"description": "Don't miss this hand-made oak chair.\nLine étwo \"Classic\"", "id": 3};
        </script>"#;
        let view = DocumentView::parse(html);
        let pattern = Regex::new(r#""description"\s*:\s*("(?:[^"\\]|\\.)*")"#).unwrap();

        let found = find_in_scripts(&view, &pattern, None);
        assert_eq!(
            found,
            Some((
                "Don't miss this hand-made oak chair.\nLine étwo \"Classic\"".to_string(),
                None
            ))
        );
    }

    #[test]
    fn test_blank_string_literal_is_no_match() {
        let view = DocumentView::parse(r#"<script>{"description": "  \n "}</script>"#);
        let pattern = Regex::new(r#""description"\s*:\s*("(?:[^"\\]|\\.)*")"#).unwrap();
        assert_eq!(find_in_scripts(&view, &pattern, None), None);
    }

    #[test]
    fn test_blank_capture_is_no_match() {
        let pattern = Regex::new(r#""description"\s*:\s*"([^"]*)""#).unwrap();
        assert_eq!(first_capture(&pattern, r#"{"description": "  "}"#), None);
        assert_eq!(
            first_capture(&pattern, r#"{"description": "", "x": 1} {"description": "Sturdy"}"#),
            Some("Sturdy".to_string())
        );
    }
}
