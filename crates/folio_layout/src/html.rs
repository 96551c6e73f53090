//! HTML output
//!
//! Serializes a [`RenderTree`] into indented markup. Attributes are written
//! as `id`, `class`, `style`, then the remaining attributes in insertion
//! order, so output is stable across runs.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::tree::{NodeId, RenderTree};

const INDENT: &str = "  ";

/// Document-level metadata for [`render_document`]
#[derive(Clone, Debug)]
pub struct DocumentMeta {
    pub title: String,
    pub description: String,
    pub lang: String,
    /// Stylesheet links placed in `<head>`
    pub stylesheets: Vec<String>,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            lang: "en".to_string(),
            stylesheets: Vec::new(),
        }
    }
}

/// Markup for the tree's root element and its descendants
pub fn render_html(tree: &RenderTree) -> String {
    let mut out = String::new();
    render_node(tree, tree.root(), 0, &mut out);
    out
}

/// A complete HTML document around the rendered tree
pub fn render_document(tree: &RenderTree, meta: &DocumentMeta) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n");
    let _ = writeln!(out, "<html lang=\"{}\">", encode_double_quoted_attribute(&meta.lang));
    out.push_str("<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", encode_text(&meta.title));
    if !meta.description.is_empty() {
        let _ = writeln!(
            out,
            "<meta name=\"description\" content=\"{}\">",
            encode_double_quoted_attribute(&meta.description)
        );
    }
    for href in &meta.stylesheets {
        let _ = writeln!(
            out,
            "<link rel=\"stylesheet\" href=\"{}\">",
            encode_double_quoted_attribute(href)
        );
    }
    out.push_str("</head>\n<body>\n");
    render_node(tree, tree.root(), 0, &mut out);
    out.push_str("</body>\n</html>\n");
    out
}

fn render_node(tree: &RenderTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let el = &node.element;
    let indent = INDENT.repeat(depth);
    let tag = el.tag.name();

    let _ = write!(out, "{indent}<{tag}");
    if let Some(target) = &el.id {
        let _ = write!(out, " id=\"{}\"", encode_double_quoted_attribute(target.as_str()));
    }
    if !el.classes.is_empty() {
        let _ = write!(
            out,
            " class=\"{}\"",
            encode_double_quoted_attribute(&el.classes.join(" "))
        );
    }
    let css = el.style.to_css();
    if !css.is_empty() {
        let _ = write!(out, " style=\"{}\"", encode_double_quoted_attribute(&css));
    }
    for (name, value) in &el.attrs {
        let _ = write!(out, " {name}=\"{}\"", encode_double_quoted_attribute(value));
    }
    out.push('>');

    if el.tag.is_void() {
        out.push('\n');
        return;
    }

    let children = node.children();
    if children.is_empty() {
        if let Some(text) = &el.text {
            out.push_str(&encode_text(text));
        }
        let _ = writeln!(out, "</{tag}>");
        return;
    }

    out.push('\n');
    if let Some(text) = &el.text {
        let _ = writeln!(out, "{indent}{INDENT}{}", encode_text(text));
    }
    for child in children {
        render_node(tree, *child, depth + 1, out);
    }
    let _ = writeln!(out, "{indent}</{tag}>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::*;
    use crate::style::style;
    use folio_core::Viewport;

    #[test]
    fn test_nested_markup_is_indented() {
        let root = section("about")
            .class("py-20")
            .child(h2("About <Me>"))
            .child(img("/me.png", "Portrait"));
        let tree = RenderTree::new(root, Viewport::default());
        assert_eq!(
            render_html(&tree),
            "<section id=\"about\" class=\"py-20\">\n  <h2>About &lt;Me&gt;</h2>\n  <img src=\"/me.png\" alt=\"Portrait\">\n</section>\n"
        );
    }

    #[test]
    fn test_style_attribute_is_escaped_and_ordered() {
        let root = a("https://example.com/?a=1&b=\"2\"")
            .id("link")
            .style(style().opacity(0.0))
            .text("Go");
        let html = render_html(&RenderTree::new(root, Viewport::default()));
        assert_eq!(
            html,
            "<a id=\"link\" style=\"opacity: 0\" href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\">Go</a>\n"
        );
    }

    #[test]
    fn test_document_wraps_body() {
        let tree = RenderTree::new(main_content().id("page"), Viewport::default());
        let meta = DocumentMeta {
            title: "Folio & Co".to_string(),
            description: "Developer portfolio".to_string(),
            ..DocumentMeta::default()
        };
        let doc = render_document(&tree, &meta);
        assert!(doc.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(doc.contains("<title>Folio &amp; Co</title>"));
        assert!(doc.contains("<main id=\"page\"></main>\n</body>"));
    }
}
