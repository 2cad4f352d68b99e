//! Fallback-chain field extraction for product pages
//!
//! Resolves title, price, rating and description from an HTML document by
//! trying rules in order of reliability:
//! - structured data embedded in scripts (JSON-LD, inline key/value state)
//! - known selectors in the rendered markup (ids, classes, OpenGraph, microdata)
//! - shape-based heuristics over the page text
//!
//! Raw matches are normalized into exact money amounts, bounded ratings and
//! cleaned text. A field that no rule can resolve is reported as absent;
//! extraction itself never fails.

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod ffi;
pub mod normalize;
pub mod report;
pub mod rules;
pub mod site;

pub use config::ExtractorConfig;
pub use document::DocumentView;
pub use engine::Extractor;
pub use error::{ExtractError, Result};
pub use normalize::{NormalizedValue, Normalizer, Rejection};
pub use report::{ExtractionReport, FieldResult};
pub use rules::{ExtractionRule, FieldId, Matcher, PatternLibrary, RawMatch, RuleKind};
pub use site::SiteGate;
