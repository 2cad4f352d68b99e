//! Tunables for normalization and the built-in heuristics.
//!
//! Configuration is always passed in explicitly; nothing here reads the
//! environment.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub text: TextConfig,
    pub heuristic: HeuristicConfig,
    pub rating: RatingConfig,
}

impl ExtractorConfig {
    /// Parse a (possibly partial) JSON configuration; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Length caps for text fields, counted in characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub description_max_chars: usize,
    pub title_max_chars: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            description_max_chars: 500,
            title_max_chars: 300,
        }
    }
}

/// Thresholds for the last-resort block scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// A block must be strictly longer than this to count as a description.
    pub min_block_chars: usize,
    /// Blocks containing any of these (case-insensitive) are shop chrome, not content.
    pub reject_phrases: Vec<String>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            min_block_chars: 50,
            reject_phrases: [
                "dispatches from",
                "payment",
                "secure transaction",
                "amazon",
                "returns",
                "delivery",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Scale assumed when neither the match nor its qualifier names one.
    pub default_scale: f64,
    /// Scales a page may declare ("out of 10", `bestRating`). Anything else
    /// is ignored in favour of `default_scale`.
    pub scales: Vec<f64>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_scale: 5.0,
            scales: vec![5.0, 10.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ExtractorConfig::from_json(r#"{"text": {"description_max_chars": 120}}"#).unwrap();

        assert_eq!(config.text.description_max_chars, 120);
        assert_eq!(config.text.title_max_chars, 300);
        assert_eq!(config.heuristic.min_block_chars, 50);
        assert_eq!(config.rating.default_scale, 5.0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(ExtractorConfig::from_json("{not json").is_err());
    }
}
