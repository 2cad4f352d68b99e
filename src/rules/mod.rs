//! Extraction rules: what to look for, where, and how much to trust it.

mod library;
mod product;
mod spec;

pub use library::{PatternLibrary, PatternLibraryBuilder};
pub use spec::{MatcherSpec, RuleSpec};

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::DocumentView;

/// The fields the engine knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Title,
    Price,
    Rating,
    Description,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [
        FieldId::Title,
        FieldId::Price,
        FieldId::Rating,
        FieldId::Description,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Title => "title",
            FieldId::Price => "price",
            FieldId::Rating => "rating",
            FieldId::Description => "description",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reliability tier of a rule. Tiers are tried in declaration order,
/// whatever the individual priority numbers say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Machine-readable data embedded in script blocks.
    Structured,
    /// Known selectors in the rendered markup.
    Visible,
    /// Shape-based scans over broad regions of the page.
    Heuristic,
}

impl RuleKind {
    /// Nominal confidence reported alongside a value resolved at this tier.
    pub fn confidence(self) -> f32 {
        match self {
            RuleKind::Structured => 0.95,
            RuleKind::Visible => 0.8,
            RuleKind::Heuristic => 0.5,
        }
    }
}

/// What to read from a selected node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    Text,
    Attr(String),
}

impl Accessor {
    /// `"text"` or `"attr:<name>"`; anything else reads text.
    pub fn parse(accessor: &str) -> Self {
        match accessor.strip_prefix("attr:") {
            Some(name) if !name.is_empty() => Accessor::Attr(name.to_string()),
            _ => Accessor::Text,
        }
    }
}

/// How a rule finds its raw text. Evaluated in [`crate::extractors`].
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Walk `path` inside the first JSON-LD object of `@type` `type_name`.
    JsonLd {
        type_name: String,
        path: Vec<String>,
        qualifier_path: Option<Vec<String>>,
    },
    /// First capture group of `pattern` in a script payload; `qualifier` is
    /// searched in the same payload.
    ScriptPattern {
        pattern: Regex,
        qualifier: Option<Regex>,
    },
    /// First matching node with a non-empty value.
    Selector { css: String, accessor: Accessor },
    /// First capture group of `pattern` in the text of any matching node.
    TextPattern { css: String, pattern: Regex },
    /// First matching node with enough text and no rejected phrase.
    TextBlock {
        css: String,
        min_chars: usize,
        reject_phrases: Vec<String>,
    },
}

impl Matcher {
    /// The CSS selector this matcher queries, if any.
    pub fn css(&self) -> Option<&str> {
        match self {
            Matcher::Selector { css, .. }
            | Matcher::TextPattern { css, .. }
            | Matcher::TextBlock { css, .. } => Some(css),
            Matcher::JsonLd { .. } | Matcher::ScriptPattern { .. } => None,
        }
    }

    /// Whether a rule with this matcher may sit in `kind`'s tier. Script data
    /// is structured only; plain selectors are visible, or heuristic for
    /// generic tags like `h1`; text scans are heuristic only.
    pub fn fits(&self, kind: RuleKind) -> bool {
        match self {
            Matcher::JsonLd { .. } | Matcher::ScriptPattern { .. } => kind == RuleKind::Structured,
            Matcher::Selector { .. } => kind != RuleKind::Structured,
            Matcher::TextPattern { .. } | Matcher::TextBlock { .. } => kind == RuleKind::Heuristic,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionRule {
    pub id: String,
    pub field: FieldId,
    /// Lower runs first within a tier.
    pub priority: u32,
    pub kind: RuleKind,
    pub matcher: Matcher,
}

impl ExtractionRule {
    pub fn new(
        id: impl Into<String>,
        field: FieldId,
        priority: u32,
        kind: RuleKind,
        matcher: Matcher,
    ) -> Self {
        Self {
            id: id.into(),
            field,
            priority,
            kind,
            matcher,
        }
    }

    /// Run the matcher against a view.
    pub fn find(&self, view: &DocumentView) -> Option<RawMatch> {
        let (text, qualifier) = self.matcher.evaluate(view)?;
        Some(RawMatch {
            text,
            qualifier,
            kind: self.kind,
        })
    }
}

/// Unprocessed text captured by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub text: String,
    /// Side information found next to the value, e.g. a currency code or a
    /// rating's best value.
    pub qualifier: Option<String>,
    pub kind: RuleKind,
}

impl RawMatch {
    pub fn new(text: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            text: text.into(),
            qualifier: None,
            kind,
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }
}
