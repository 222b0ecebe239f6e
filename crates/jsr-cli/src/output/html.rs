//! Standalone HTML document for rendered package docs

use jsr_core::types::PackageDocs;

/// Wrap the registry's rendered docs in a page that loads the registry
/// stylesheet followed by the payload's own CSS.
///
/// `main` and `css` are inserted verbatim; the registry already produced them
/// as markup.
pub fn render_docs_html(docs: &PackageDocs, stylesheet_url: &str) -> String {
    format!(
        r#"<html>
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="stylesheet" href="{stylesheet_url}">
<style>{css}</style>
<div class="ddoc" id="docMain">{main}</div>
</html>
"#,
        stylesheet_url = stylesheet_url,
        css = docs.css,
        main = docs.main,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> PackageDocs {
        serde_json::from_value(serde_json::json!({
            "css": ".ddoc { color: red; }",
            "main": "<h1>fmt</h1>",
            "version": {
                "version": "1.0.0",
                "createdAt": "2024-02-01T10:00:00.000Z",
                "updatedAt": "2024-02-01T10:00:00.000Z"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_render_docs_html() {
        let html = render_docs_html(&docs(), "https://jsr.io/styles.css");

        assert!(html.contains(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#));
        assert!(html.contains(r#"<link rel="stylesheet" href="https://jsr.io/styles.css">"#));
        assert!(html.contains("<style>.ddoc { color: red; }</style>"));
        assert!(html.contains(r#"<div class="ddoc" id="docMain"><h1>fmt</h1></div>"#));
    }

    #[test]
    fn test_render_docs_html_custom_stylesheet() {
        let html = render_docs_html(&docs(), "http://localhost:8000/styles.css");
        assert!(html.contains(r#"href="http://localhost:8000/styles.css""#));
        assert!(!html.contains("jsr.io"));
    }
}
