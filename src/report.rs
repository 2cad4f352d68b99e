//! Per-field outcomes of one extraction run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::normalize::NormalizedValue;
use crate::rules::{FieldId, RuleKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldResult {
    pub field: FieldId,
    /// `None` when every rule for the field failed. Presentation layers pick
    /// their own placeholder; no sentinel string is stored here.
    pub value: Option<NormalizedValue>,
    pub matched_rule_id: Option<String>,
    /// Tier of the matching rule.
    pub kind: Option<RuleKind>,
}

impl FieldResult {
    pub fn resolved(field: FieldId, value: NormalizedValue, rule_id: &str, kind: RuleKind) -> Self {
        Self {
            field,
            value: Some(value),
            matched_rule_id: Some(rule_id.to_string()),
            kind: Some(kind),
        }
    }

    pub fn unresolved(field: FieldId) -> Self {
        Self {
            field,
            value: None,
            matched_rule_id: None,
            kind: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    pub fn confidence(&self) -> Option<f32> {
        self.kind.map(RuleKind::confidence)
    }
}

/// Results keyed by field, covering exactly the requested fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtractionReport {
    fields: BTreeMap<FieldId, FieldResult>,
}

impl ExtractionReport {
    pub(crate) fn from_results(results: impl IntoIterator<Item = FieldResult>) -> Self {
        Self {
            fields: results.into_iter().map(|r| (r.field, r)).collect(),
        }
    }

    pub fn get(&self, field: FieldId) -> Option<&FieldResult> {
        self.fields.get(&field)
    }

    pub fn value(&self, field: FieldId) -> Option<&NormalizedValue> {
        self.get(field)?.value.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldResult> {
        self.fields.values()
    }

    pub fn resolved(&self) -> impl Iterator<Item = &FieldResult> {
        self.iter().filter(|r| r.is_resolved())
    }

    pub fn unresolved(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.iter().filter(|r| !r.is_resolved()).map(|r| r.field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
