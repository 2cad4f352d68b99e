//! Built-in rules for retail product pages.
//!
//! Structured rules read schema.org JSON-LD and the key/value blobs that shop
//! templates inline into scripts. Visible rules cover Amazon-style ids and
//! classes plus the OpenGraph and microdata tags most storefronts emit.
//! Heuristics scan for price- or rating-shaped text and long content blocks.

use super::{FieldId, MatcherSpec, RuleKind, RuleSpec};
use crate::config::ExtractorConfig;

pub(super) fn rule_specs(config: &ExtractorConfig) -> Vec<RuleSpec> {
    let mut specs = Vec::new();
    specs.extend(title_rules());
    specs.extend(price_rules());
    specs.extend(rating_rules());
    specs.extend(description_rules(config));
    specs
}

fn spec(id: &str, field: FieldId, priority: u32, kind: RuleKind, matcher: MatcherSpec) -> RuleSpec {
    RuleSpec {
        id: id.to_string(),
        field,
        priority,
        kind,
        matcher,
    }
}

fn json_ld(path: &[&str], qualifier_path: Option<&[&str]>) -> MatcherSpec {
    MatcherSpec::JsonLd {
        type_name: "Product".to_string(),
        path: path.iter().map(|s| s.to_string()).collect(),
        qualifier_path: qualifier_path.map(|p| p.iter().map(|s| s.to_string()).collect()),
    }
}

fn script(pattern: &str, qualifier: Option<&str>) -> MatcherSpec {
    MatcherSpec::ScriptPattern {
        pattern: pattern.to_string(),
        qualifier: qualifier.map(String::from),
    }
}

fn text(css: &str) -> MatcherSpec {
    MatcherSpec::Selector {
        css: css.to_string(),
        accessor: None,
    }
}

fn content(css: &str) -> MatcherSpec {
    MatcherSpec::Selector {
        css: css.to_string(),
        accessor: Some("attr:content".to_string()),
    }
}

fn title_rules() -> Vec<RuleSpec> {
    use FieldId::Title;
    use RuleKind::*;

    vec![
        spec("title.jsonld", Title, 10, Structured, json_ld(&["name"], None)),
        spec("title.product_title", Title, 20, Visible, text("span#productTitle")),
        spec("title.testid", Title, 21, Visible, text(r#"h1[data-testid="product-title"]"#)),
        spec("title.h1_large", Title, 22, Visible, text("h1.a-size-large")),
        spec("title.h1_spacing_small", Title, 23, Visible, text("h1.a-spacing-small")),
        spec("title.h1_spacing_none", Title, 24, Visible, text("h1.a-spacing-none")),
        spec("title.og", Title, 25, Visible, content(r#"meta[property="og:title"]"#)),
        spec("title.h1", Title, 40, Heuristic, text("h1")),
        spec("title.document_title", Title, 41, Heuristic, text("title")),
    ]
}

fn price_rules() -> Vec<RuleSpec> {
    use FieldId::Price;
    use RuleKind::*;

    vec![
        spec(
            "price.jsonld",
            Price,
            10,
            Structured,
            json_ld(&["offers", "price"], Some(&["offers", "priceCurrency"])),
        ),
        spec(
            "price.script",
            Price,
            11,
            Structured,
            script(
                r#""price"\s*:\s*["']?([\d.,]+)["']?"#,
                Some(r#""(?:currencyCode|priceCurrency)"\s*:\s*["']?([A-Z]{3})["']?"#),
            ),
        ),
        spec("price.offscreen", Price, 20, Visible, text("span.a-offscreen")),
        spec("price.whole", Price, 21, Visible, text("span.a-price-whole")),
        spec("price.to_pay", Price, 22, Visible, text("span.apexPriceToPay")),
        spec("price.recipe", Price, 23, Visible, text(r#"span[data-cy="price-recipe"]"#)),
        spec("price.a_price", Price, 24, Visible, text("span.a-price")),
        spec("price.buying", Price, 25, Visible, text("span.priceBlockBuyingPriceString")),
        spec("price.microdata", Price, 26, Visible, content(r#"meta[itemprop="price"]"#)),
        spec("price.og", Price, 27, Visible, content(r#"meta[property="product:price:amount"]"#)),
        spec(
            "price.symbol_scan",
            Price,
            40,
            Heuristic,
            MatcherSpec::TextPattern {
                css: "span, p".to_string(),
                pattern: r"([$€£¥₹]\s?\d[\d.,]*)".to_string(),
            },
        ),
    ]
}

fn rating_rules() -> Vec<RuleSpec> {
    use FieldId::Rating;
    use RuleKind::*;

    vec![
        spec(
            "rating.jsonld",
            Rating,
            10,
            Structured,
            json_ld(
                &["aggregateRating", "ratingValue"],
                Some(&["aggregateRating", "bestRating"]),
            ),
        ),
        spec(
            "rating.script",
            Rating,
            11,
            Structured,
            script(
                r#""ratingValue"\s*:\s*["']?([\d.]+)["']?"#,
                Some(r#""bestRating"\s*:\s*["']?([\d.]+)["']?"#),
            ),
        ),
        spec("rating.icon_alt", Rating, 20, Visible, text("span.a-icon-alt")),
        spec("rating.microdata_meta", Rating, 21, Visible, content(r#"meta[itemprop="ratingValue"]"#)),
        spec("rating.microdata", Rating, 22, Visible, text(r#"[itemprop="ratingValue"]:not(meta)"#)),
        spec(
            "rating.out_of_scan",
            Rating,
            40,
            Heuristic,
            MatcherSpec::TextPattern {
                css: "span, div".to_string(),
                pattern: r"(?i)(\d+(?:[.,]\d+)?\s*(?:out of|/)\s*(?:5|10)\b)".to_string(),
            },
        ),
    ]
}

fn description_rules(config: &ExtractorConfig) -> Vec<RuleSpec> {
    use FieldId::Description;
    use RuleKind::*;

    let block = |css: &str| MatcherSpec::TextBlock {
        css: css.to_string(),
        min_chars: config.heuristic.min_block_chars,
        reject_phrases: config.heuristic.reject_phrases.clone(),
    };

    vec![
        spec("description.jsonld", Description, 10, Structured, json_ld(&["description"], None)),
        spec(
            "description.script",
            Description,
            11,
            Structured,
            script(r#""description"\s*:\s*("(?:[^"\\]|\\.)*")"#, None),
        ),
        spec("description.product", Description, 20, Visible, text("div#productDescription")),
        spec("description.bullets", Description, 21, Visible, text("div#feature-bullets")),
        spec("description.og", Description, 22, Visible, content(r#"meta[property="og:description"]"#)),
        spec("description.meta", Description, 23, Visible, content(r#"meta[name="description"]"#)),
        spec("description.spacing_block", Description, 40, Heuristic, block("div.a-spacing-base")),
        spec("description.paragraph", Description, 41, Heuristic, block("p")),
    ]
}
