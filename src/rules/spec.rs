//! Serializable rule declarations.
//!
//! A host can ship its own rule set as JSON instead of compiling one in.
//! Patterns are compiled and selectors checked when the library is built.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Accessor, ExtractionRule, FieldId, Matcher, RuleKind};
use crate::error::{ExtractError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    pub id: String,
    pub field: FieldId,
    pub priority: u32,
    pub kind: RuleKind,
    pub matcher: MatcherSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatcherSpec {
    JsonLd {
        type_name: String,
        path: Vec<String>,
        #[serde(default)]
        qualifier_path: Option<Vec<String>>,
    },
    ScriptPattern {
        pattern: String,
        #[serde(default)]
        qualifier: Option<String>,
    },
    Selector {
        css: String,
        /// `text` (default) or `attr:<name>`
        #[serde(default)]
        accessor: Option<String>,
    },
    TextPattern {
        css: String,
        pattern: String,
    },
    TextBlock {
        css: String,
        min_chars: usize,
        #[serde(default)]
        reject_phrases: Vec<String>,
    },
}

impl RuleSpec {
    pub fn compile(self) -> Result<ExtractionRule> {
        let matcher = match self.matcher {
            MatcherSpec::JsonLd {
                type_name,
                path,
                qualifier_path,
            } => {
                if path.is_empty() {
                    return Err(ExtractError::EmptyPath(self.id));
                }
                Matcher::JsonLd {
                    type_name,
                    path,
                    qualifier_path,
                }
            }
            MatcherSpec::ScriptPattern { pattern, qualifier } => Matcher::ScriptPattern {
                pattern: compile_pattern(&self.id, &pattern)?,
                qualifier: qualifier
                    .map(|q| compile_pattern(&self.id, &q))
                    .transpose()?,
            },
            MatcherSpec::Selector { css, accessor } => Matcher::Selector {
                css,
                accessor: accessor.as_deref().map(Accessor::parse).unwrap_or(Accessor::Text),
            },
            MatcherSpec::TextPattern { css, pattern } => Matcher::TextPattern {
                css,
                pattern: compile_pattern(&self.id, &pattern)?,
            },
            MatcherSpec::TextBlock {
                css,
                min_chars,
                reject_phrases,
            } => Matcher::TextBlock {
                css,
                min_chars,
                reject_phrases: reject_phrases.iter().map(|p| p.to_lowercase()).collect(),
            },
        };

        Ok(ExtractionRule::new(
            self.id,
            self.field,
            self.priority,
            self.kind,
            matcher,
        ))
    }
}

fn compile_pattern(rule: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ExtractError::InvalidPattern {
        rule: rule.to_string(),
        source,
    })
}
