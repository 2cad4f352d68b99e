//! Per-field rule registry.

use std::collections::{BTreeMap, HashMap, HashSet};

use scraper::Selector;

use super::{ExtractionRule, FieldId, RuleSpec};
use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};

/// Ordered fallback chains, one per field. Fixed once built.
#[derive(Debug, Clone, Default)]
pub struct PatternLibrary {
    rules: BTreeMap<FieldId, Vec<ExtractionRule>>,
}

impl PatternLibrary {
    pub fn builder() -> PatternLibraryBuilder {
        PatternLibraryBuilder::default()
    }

    /// The chain for `field`: tier first, then priority ascending.
    pub fn rules_for(&self, field: FieldId) -> &[ExtractionRule] {
        self.rules.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_specs(specs: impl IntoIterator<Item = RuleSpec>) -> Result<Self> {
        specs
            .into_iter()
            .try_fold(Self::builder(), |builder, spec| {
                Ok::<_, ExtractError>(builder.rule(spec.compile()?))
            })?
            .build()
    }

    /// Load a JSON array of [`RuleSpec`].
    pub fn from_json(json: &str) -> Result<Self> {
        let specs: Vec<RuleSpec> = serde_json::from_str(json)?;
        Self::from_specs(specs)
    }

    /// Built-in rules for retail product pages.
    pub fn product_pages(config: &ExtractorConfig) -> Result<Self> {
        Self::from_specs(super::product::rule_specs(config))
    }
}

#[derive(Debug, Default)]
pub struct PatternLibraryBuilder {
    rules: Vec<ExtractionRule>,
}

impl PatternLibraryBuilder {
    pub fn rule(mut self, rule: ExtractionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = ExtractionRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn build(self) -> Result<PatternLibrary> {
        let mut ids = HashSet::new();
        let mut priorities: HashMap<(FieldId, u32), String> = HashMap::new();

        for rule in &self.rules {
            if !ids.insert(rule.id.as_str()) {
                return Err(ExtractError::DuplicateRuleId(rule.id.clone()));
            }

            if let Some(first) = priorities.insert((rule.field, rule.priority), rule.id.clone()) {
                return Err(ExtractError::DuplicatePriority {
                    field: rule.field,
                    priority: rule.priority,
                    first,
                    second: rule.id.clone(),
                });
            }

            if !rule.matcher.fits(rule.kind) {
                return Err(ExtractError::KindMismatch {
                    rule: rule.id.clone(),
                    kind: rule.kind,
                });
            }

            if let Some(css) = rule.matcher.css() {
                if Selector::parse(css).is_err() {
                    return Err(ExtractError::InvalidSelector {
                        rule: rule.id.clone(),
                        selector: css.to_string(),
                    });
                }
            }
        }

        let mut rules: BTreeMap<FieldId, Vec<ExtractionRule>> = BTreeMap::new();
        for rule in self.rules {
            rules.entry(rule.field).or_default().push(rule);
        }
        for chain in rules.values_mut() {
            chain.sort_by_key(|rule| (rule.kind, rule.priority));
        }

        Ok(PatternLibrary { rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Accessor, Matcher, RuleKind};

    fn jsonld_rule(id: &str, field: FieldId, priority: u32) -> ExtractionRule {
        ExtractionRule::new(
            id,
            field,
            priority,
            RuleKind::Structured,
            Matcher::JsonLd {
                type_name: "Product".into(),
                path: vec!["name".into()],
                qualifier_path: None,
            },
        )
    }

    fn selector_rule(id: &str, field: FieldId, priority: u32, kind: RuleKind) -> ExtractionRule {
        ExtractionRule::new(
            id,
            field,
            priority,
            kind,
            Matcher::Selector {
                css: "h1".into(),
                accessor: Accessor::Text,
            },
        )
    }

    #[test]
    fn test_tier_beats_priority() {
        let library = PatternLibrary::builder()
            .rule(selector_rule("heuristic", FieldId::Title, 1, RuleKind::Heuristic))
            .rule(selector_rule("visible-b", FieldId::Title, 20, RuleKind::Visible))
            .rule(selector_rule("visible-a", FieldId::Title, 10, RuleKind::Visible))
            .rule(jsonld_rule("structured", FieldId::Title, 99))
            .build()
            .unwrap();

        let ids: Vec<&str> = library
            .rules_for(FieldId::Title)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["structured", "visible-a", "visible-b", "heuristic"]);
        assert!(library.rules_for(FieldId::Price).is_empty());
    }

    #[test]
    fn test_duplicate_priority_rejected() {
        let result = PatternLibrary::builder()
            .rule(selector_rule("a", FieldId::Title, 5, RuleKind::Visible))
            .rule(selector_rule("b", FieldId::Title, 5, RuleKind::Heuristic))
            .build();

        assert!(matches!(
            result,
            Err(ExtractError::DuplicatePriority { priority: 5, .. })
        ));
    }

    #[test]
    fn test_same_priority_across_fields_allowed() {
        let library = PatternLibrary::builder()
            .rule(selector_rule("a", FieldId::Title, 5, RuleKind::Visible))
            .rule(selector_rule("b", FieldId::Description, 5, RuleKind::Visible))
            .build()
            .unwrap();

        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = PatternLibrary::builder()
            .rule(selector_rule("a", FieldId::Title, 1, RuleKind::Visible))
            .rule(selector_rule("a", FieldId::Price, 2, RuleKind::Visible))
            .build();

        assert!(matches!(result, Err(ExtractError::DuplicateRuleId(id)) if id == "a"));
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let rule = ExtractionRule::new(
            "broken",
            FieldId::Title,
            1,
            RuleKind::Visible,
            Matcher::Selector {
                css: "h1[[".into(),
                accessor: Accessor::Text,
            },
        );

        let result = PatternLibrary::builder().rule(rule).build();
        assert!(matches!(result, Err(ExtractError::InvalidSelector { .. })));
    }

    #[test]
    fn test_kind_must_fit_matcher() {
        let result = PatternLibrary::builder()
            .rule(selector_rule("title.claimed", FieldId::Title, 1, RuleKind::Structured))
            .build();
        assert!(matches!(
            result,
            Err(ExtractError::KindMismatch { rule, kind: RuleKind::Structured }) if rule == "title.claimed"
        ));

        let json = r#"[
            {"id": "price.scan", "field": "price", "priority": 1, "kind": "visible",
             "matcher": {"type": "text_pattern", "css": "span", "pattern": "\\d+"}}
        ]"#;
        assert!(matches!(
            PatternLibrary::from_json(json),
            Err(ExtractError::KindMismatch { .. })
        ));

        let heuristic_selector = PatternLibrary::builder()
            .rule(selector_rule("title.h1", FieldId::Title, 1, RuleKind::Heuristic))
            .build();
        assert!(heuristic_selector.is_ok());
    }

    #[test]
    fn test_product_pages_builds() {
        let library = PatternLibrary::product_pages(&ExtractorConfig::default()).unwrap();

        for field in FieldId::ALL {
            let chain = library.rules_for(field);
            assert!(!chain.is_empty(), "no rules for {}", field);
            assert!(chain.windows(2).all(|w| (w[0].kind, w[0].priority) < (w[1].kind, w[1].priority)));
        }
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": "title.h1", "field": "title", "priority": 1, "kind": "visible",
             "matcher": {"type": "selector", "css": "h1"}},
            {"id": "title.og", "field": "title", "priority": 2, "kind": "visible",
             "matcher": {"type": "selector", "css": "meta[property='og:title']", "accessor": "attr:content"}}
        ]"#;

        let library = PatternLibrary::from_json(json).unwrap();
        assert_eq!(library.rules_for(FieldId::Title).len(), 2);
    }
}
