//! Rating normalization.
//!
//! Values are never clamped: a number outside the detected scale is rejected
//! so that a review count or page-view figure cannot pass as a rating.

use once_cell::sync::Lazy;
use regex::Regex;

use super::money::parse_amount;
use super::{NormalizedValue, Rejection};
use crate::config::RatingConfig;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());

static SCALE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:out of|/)\s*(\d+(?:[.,]\d+)?)").unwrap());

pub fn normalize(
    text: &str,
    qualifier: Option<&str>,
    config: &RatingConfig,
) -> Result<NormalizedValue, Rejection> {
    let value = NUMBER
        .find(text)
        .and_then(|m| parse_number(m.as_str()))
        .ok_or_else(|| Rejection::NoNumber(text.to_string()))?;

    let scale_max = detect_scale(text, qualifier, config);
    if !(0.0..=scale_max).contains(&value) {
        return Err(Rejection::OutOfRange { value, scale_max });
    }

    Ok(NormalizedValue::Rating { value, scale_max })
}

/// The qualifier (e.g. `bestRating`) wins over an "out of N" token in the
/// text; either must name one of the configured scales.
fn detect_scale(text: &str, qualifier: Option<&str>, config: &RatingConfig) -> f64 {
    let from_qualifier = qualifier.and_then(parse_number);
    let from_text = || {
        SCALE_TOKEN
            .captures(text)
            .and_then(|caps| parse_number(&caps[1]))
    };

    from_qualifier
        .or_else(from_text)
        .filter(|scale| config.scales.contains(scale))
        .unwrap_or(config.default_scale)
}

/// A comma is decimal only with one or two digits after it (`4,2`);
/// `1,234` is a grouped count and parses as 1234.
fn parse_number(s: &str) -> Option<f64> {
    parse_amount(s.trim())?.to_string().parse().ok()
}
