use scraper::{Html, Node};

/// Elements whose subtrees never contribute readable page text.
const NON_CONTENT_ELEMENTS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "nav", "header", "footer", "aside",
    "iframe", "svg",
];

/// Reduce an HTML document to its visible text.
///
/// Text nodes under the elements listed above are dropped, each surviving
/// node has its whitespace collapsed to single spaces, and the chunks are
/// joined with newlines. A document with no visible text yields an empty
/// string.
pub fn extract_text_from_html(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut chunks: Vec<String> = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let boilerplate = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if NON_CONTENT_ELEMENTS.contains(&el.name()))
        });
        if boilerplate {
            continue;
        }

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            chunks.push(collapsed);
        }
    }

    chunks.join("\n")
}
