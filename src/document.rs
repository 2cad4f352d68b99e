//! Read-only query view over a parsed HTML document.
//!
//! Uses the scraper crate for parsing and CSS selection. Every query is total:
//! a selector that does not parse, or a document that failed to parse, simply
//! produces no nodes.

use scraper::{ElementRef, Html, Selector};

/// A node handed out by [`DocumentView::find_all`].
pub type Node<'a> = ElementRef<'a>;

pub struct DocumentView {
    document: Html,
}

impl DocumentView {
    /// Parse an HTML document. html5ever recovers from malformed markup, so
    /// this always yields a (possibly sparse) tree.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Parse raw bytes. Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(bytes))
    }

    /// A view with no nodes and no script payloads.
    pub fn empty() -> Self {
        Self {
            document: Html::new_document(),
        }
    }

    /// All elements matching a CSS selector, in document order.
    pub fn find_all(&self, selector_str: &str) -> Vec<Node<'_>> {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        self.document.select(&selector).collect()
    }

    /// Concatenated descendant text of a node, trimmed at both ends.
    pub fn text(&self, node: &Node<'_>) -> String {
        node.text().collect::<String>().trim().to_string()
    }

    pub fn attr<'a>(&self, node: &Node<'a>, name: &str) -> Option<&'a str> {
        node.value().attr(name)
    }

    /// Raw content of every non-blank `<script>` element, in document order.
    /// Covers JSON-LD blocks as well as inline JavaScript.
    pub fn script_payloads(&self) -> Vec<String> {
        self.find_all("script")
            .into_iter()
            .map(|el| el.text().collect::<String>())
            .filter(|content| !content.trim().is_empty())
            .collect()
    }
}

impl Default for DocumentView {
    fn default() -> Self {
        Self::empty()
    }
}
