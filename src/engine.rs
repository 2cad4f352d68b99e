//! Fallback-chain execution.
//!
//! For each field the chain is walked in order and the first rule whose match
//! survives normalization wins. Fields never look at each other, so they can
//! be resolved in any order or in parallel with the same outcome.

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::debug;

use crate::config::ExtractorConfig;
use crate::document::DocumentView;
use crate::error::Result;
use crate::normalize::Normalizer;
use crate::report::{ExtractionReport, FieldResult};
use crate::rules::{FieldId, PatternLibrary};

#[derive(Debug, Clone)]
pub struct Extractor {
    library: PatternLibrary,
    normalizer: Normalizer,
}

impl Extractor {
    pub fn new(library: PatternLibrary, normalizer: Normalizer) -> Self {
        Self {
            library,
            normalizer,
        }
    }

    /// Built-in product-page rules with the given configuration.
    pub fn for_product_pages(config: ExtractorConfig) -> Result<Self> {
        let library = PatternLibrary::product_pages(&config)?;
        Ok(Self::new(library, Normalizer::new(config)))
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Resolve one field. A rule whose match is rejected by the normalizer
    /// counts as silent and the chain continues.
    pub fn extract_field(&self, field: FieldId, view: &DocumentView) -> FieldResult {
        for rule in self.library.rules_for(field) {
            let Some(raw) = rule.find(view) else {
                continue;
            };

            match self.normalizer.normalize(field, &raw) {
                Ok(value) => {
                    debug!(%field, rule = %rule.id, kind = ?rule.kind, "field resolved");
                    return FieldResult::resolved(field, value, &rule.id, rule.kind);
                }
                Err(rejection) => {
                    debug!(%field, rule = %rule.id, %rejection, "match rejected");
                }
            }
        }

        debug!(%field, "field unresolved");
        FieldResult::unresolved(field)
    }

    /// Resolve each requested field against `view`.
    pub fn run(&self, view: &DocumentView, fields: &[FieldId]) -> ExtractionReport {
        ExtractionReport::from_results(
            unique(fields)
                .into_iter()
                .map(|field| self.extract_field(field, view)),
        )
    }

    /// Like [`Extractor::run`], one field per rayon task. Parsed trees cannot
    /// be shared between threads, so every task parses `html` on its own.
    pub fn run_concurrent(&self, html: &str, fields: &[FieldId]) -> ExtractionReport {
        let results: Vec<FieldResult> = unique(fields)
            .into_par_iter()
            .map(|field| {
                let view = DocumentView::parse(html);
                self.extract_field(field, &view)
            })
            .collect();

        ExtractionReport::from_results(results)
    }

    /// Parse `html` and run all requested fields on it.
    pub fn extract_html(&self, html: &str, fields: &[FieldId]) -> ExtractionReport {
        self.run(&DocumentView::parse(html), fields)
    }
}

fn unique(fields: &[FieldId]) -> Vec<FieldId> {
    fields.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}
