//! Construction-time errors.
//!
//! Extraction itself never fails: a field that cannot be resolved is reported
//! as absent. These errors cover building a rule library, loading
//! configuration and the optional site pre-check.

use thiserror::Error;

use crate::rules::{FieldId, RuleKind};

#[derive(Error, Debug)]
pub enum ExtractError {
    /// The page comes from a source the rule library was not built for.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("rule `{rule}` has an invalid CSS selector: {selector}")]
    InvalidSelector { rule: String, selector: String },

    #[error("rule `{rule}` has an invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// Two rules of the same field share a priority, so their order is undefined.
    #[error("rules `{first}` and `{second}` share priority {priority} for field {field}")]
    DuplicatePriority {
        field: FieldId,
        priority: u32,
        first: String,
        second: String,
    },

    /// The declared tier does not match what the matcher reads, which would
    /// misstate the rule's ordering and confidence.
    #[error("rule `{rule}` cannot be {kind:?}: its matcher belongs to another tier")]
    KindMismatch { rule: String, kind: RuleKind },

    #[error("duplicate rule id: {0}")]
    DuplicateRuleId(String),

    #[error("rule `{0}` has an empty path")]
    EmptyPath(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
