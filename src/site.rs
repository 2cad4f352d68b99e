//! Pre-check that a page comes from a storefront the rules were written for.
//!
//! The engine never calls this; it is for callers that want to refuse
//! unsupported pages before fetching or extracting them.

use url::Url;

use crate::error::{ExtractError, Result};

/// Regional Amazon storefronts covered by the built-in rules.
pub const AMAZON_DOMAINS: &[&str] = &[
    "amazon.com",
    "amazon.co.uk",
    "amazon.de",
    "amazon.fr",
    "amazon.es",
    "amazon.it",
    "amazon.ca",
    "amazon.com.au",
    "amazon.in",
    "amazon.co.jp",
    "amazon.cn",
    "amazon.nl",
    "amazon.sg",
    "amazon.com.mx",
    "amazon.com.br",
    "amazon.ae",
];

#[derive(Debug, Clone)]
pub struct SiteGate {
    domains: Vec<String>,
}

impl SiteGate {
    pub fn new(domains: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            domains: domains.into_iter().map(|d| d.into().to_lowercase()).collect(),
        }
    }

    pub fn amazon() -> Self {
        Self::new(AMAZON_DOMAINS.iter().copied())
    }

    /// Accepts the listed domains and their subdomains.
    pub fn check(&self, url: &str) -> Result<()> {
        let parsed =
            Url::parse(url).map_err(|e| ExtractError::UnsupportedInput(format!("{}: {}", url, e)))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| ExtractError::UnsupportedInput(format!("{}: no host", url)))?
            .to_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);

        let supported = self
            .domains
            .iter()
            .any(|d| host == d.as_str() || host.ends_with(&format!(".{}", d)));

        if supported {
            Ok(())
        } else {
            Err(ExtractError::UnsupportedInput(format!(
                "unsupported site: {}",
                host
            )))
        }
    }
}
