//! CSS selector lookups.

use crate::document::DocumentView;
use crate::rules::Accessor;

/// First matching element whose accessed value is non-empty.
pub(super) fn find_first(view: &DocumentView, selector: &str, accessor: &Accessor) -> Option<String> {
    view.find_all(selector).iter().find_map(|node| {
        let value = match accessor {
            Accessor::Text => view.text(node),
            Accessor::Attr(name) => view.attr(node, name)?.trim().to_string(),
        };
        (!value.is_empty()).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_text_and_attr() {
        let html = r#"
        <html>
        <head>
            <meta property="og:title" content="Walnut Desk">
        </head>
        <body>
            <span id="productTitle">
                Walnut Desk, 120cm
            </span>
        </body>
        </html>
        "#;

        let view = DocumentView::parse(html);

        let title = find_first(&view, "span#productTitle", &Accessor::Text);
        assert_eq!(title, Some("Walnut Desk, 120cm".to_string()));

        let og = find_first(
            &view,
            r#"meta[property="og:title"]"#,
            &Accessor::Attr("content".into()),
        );
        assert_eq!(og, Some("Walnut Desk".to_string()));
    }

    #[test]
    fn test_skips_empty_nodes() {
        let html = r#"
        <span class="a-offscreen"> </span>
        <span class="a-offscreen">$24.00</span>
        "#;

        let view = DocumentView::parse(html);
        assert_eq!(
            find_first(&view, "span.a-offscreen", &Accessor::Text),
            Some("$24.00".to_string())
        );
    }

    #[test]
    fn test_missing_attribute() {
        let view = DocumentView::parse(r#"<meta name="description">"#);
        assert_eq!(
            find_first(&view, r#"meta[name="description"]"#, &Accessor::Attr("content".into())),
            None
        );
    }
}
