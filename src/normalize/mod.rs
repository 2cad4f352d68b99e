//! Canonicalization of raw matches into typed values.
//!
//! Every normalizer is pure. A rejection is not an error for the caller: the
//! engine logs it and moves on to the next rule in the chain.

pub mod money;
pub mod rating;
pub mod text;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ExtractorConfig;
use crate::rules::{FieldId, RawMatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NormalizedValue {
    Money {
        amount: Decimal,
        /// Display symbol, or the verbatim code when the code is unknown.
        /// `None` when the match carried no currency at all.
        currency_symbol: Option<String>,
    },
    Rating {
        value: f64,
        scale_max: f64,
    },
    Text {
        content: String,
        truncated: bool,
    },
}

/// Why a raw match could not be normalized.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("no number in {0:?}")]
    NoNumber(String),

    #[error("amount {0} is not positive")]
    NonPositive(Decimal),

    #[error("rating {value} outside 0..={scale_max}")]
    OutOfRange { value: f64, scale_max: f64 },

    #[error("no text left after cleaning")]
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: ExtractorConfig,
}

impl Normalizer {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Normalize a match found for `field`.
    pub fn normalize(&self, field: FieldId, raw: &RawMatch) -> Result<NormalizedValue, Rejection> {
        match field {
            FieldId::Title => text::clean(&raw.text, self.config.text.title_max_chars, false),
            FieldId::Description => {
                text::clean(&raw.text, self.config.text.description_max_chars, true)
            }
            FieldId::Price => money::normalize(&raw.text, raw.qualifier.as_deref()),
            FieldId::Rating => rating::normalize(&raw.text, raw.qualifier.as_deref(), &self.config.rating),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleKind;
    use std::str::FromStr;

    #[test]
    fn test_dispatch_by_field() {
        let normalizer = Normalizer::default();

        let price = normalizer
            .normalize(FieldId::Price, &RawMatch::new("$19.99", RuleKind::Visible))
            .unwrap();
        assert_eq!(
            price,
            NormalizedValue::Money {
                amount: Decimal::from_str("19.99").unwrap(),
                currency_symbol: Some("$".to_string()),
            }
        );

        let title = normalizer
            .normalize(FieldId::Title, &RawMatch::new("  Oak \n Stool ", RuleKind::Visible))
            .unwrap();
        assert_eq!(
            title,
            NormalizedValue::Text {
                content: "Oak Stool".to_string(),
                truncated: false,
            }
        );
    }

    #[test]
    fn test_serialized_shape() {
        let value = NormalizedValue::Money {
            amount: Decimal::from_str("25.00").unwrap(),
            currency_symbol: Some("€".to_string()),
        };

        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["type"], "money");
        assert_eq!(json["amount"], "25.00");
        assert_eq!(json["currency_symbol"], "€");
    }
}
