//! Canonical serialization of a node tree, plain-text extraction, and the
//! formatting stripper.

use super::types::{InlineStyle, Node};

/// Serialize a node tree to canonical markup.
///
/// Legacy style tags parsed from imported content come back out in
/// canonical form (`<strong>`, `<em>`, `<span style="color: …">`).
pub fn write_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(raw) => out.push_str(raw),
        Node::Styled { style, children } => {
            let (open, close) = style_tags(style);
            out.push_str(&open);
            out.push_str(&write_nodes(children));
            out.push_str(close);
        }
        Node::LineBreak => out.push_str("<br>"),
        Node::Paragraph(children) => {
            out.push_str("<p>");
            out.push_str(&write_nodes(children));
            out.push_str("</p>");
        }
        Node::Link { href, children } => {
            out.push_str(&format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">"#,
                html_escape::encode_double_quoted_attribute(href)
            ));
            out.push_str(&write_nodes(children));
            out.push_str("</a>");
        }
        Node::Image { src, alt } => {
            out.push_str(&format!(
                r#"<img src="{}" alt="{}" />"#,
                html_escape::encode_double_quoted_attribute(src),
                html_escape::encode_double_quoted_attribute(alt)
            ));
        }
        Node::Figure { src, alt, caption } => {
            out.push_str(&format!(
                r#"<figure><img src="{}" alt="{}" /><figcaption>{}</figcaption></figure>"#,
                html_escape::encode_double_quoted_attribute(src),
                html_escape::encode_double_quoted_attribute(alt),
                caption
            ));
        }
    }
}

/// Opening and closing tags for an inline style.
pub fn style_tags(style: &InlineStyle) -> (String, &'static str) {
    match style {
        InlineStyle::Bold => ("<strong>".to_string(), "</strong>"),
        InlineStyle::Italic => ("<em>".to_string(), "</em>"),
        InlineStyle::Underline => ("<u>".to_string(), "</u>"),
        InlineStyle::Color(color) => (
            format!(
                r#"<span style="color: {}">"#,
                html_escape::encode_double_quoted_attribute(color)
            ),
            "</span>",
        ),
    }
}

/// Extract the visible text of a node tree, entities decoded.
///
/// Line breaks and paragraph ends become newlines; images and figures
/// contribute nothing.
pub fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    collect_plain_text(&mut out, nodes);
    out
}

fn collect_plain_text(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Text(raw) => out.push_str(&html_escape::decode_html_entities(raw)),
            Node::Styled { children, .. } | Node::Link { children, .. } => {
                collect_plain_text(out, children)
            }
            Node::LineBreak => out.push('\n'),
            Node::Paragraph(children) => {
                collect_plain_text(out, children);
                out.push('\n');
            }
            Node::Image { .. } | Node::Figure { .. } => {}
        }
    }
}

/// Remove all inline formatting wrappers, keeping everything else.
///
/// Text, line breaks, links, paragraphs and figures survive; the children
/// of each formatting wrapper are spliced into its place.
pub fn strip_formatting(nodes: &[Node]) -> Vec<Node> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            Node::Styled { children, .. } => out.extend(strip_formatting(children)),
            Node::Paragraph(children) => out.push(Node::Paragraph(strip_formatting(children))),
            Node::Link { href, children } => out.push(Node::Link {
                href: href.clone(),
                children: strip_formatting(children),
            }),
            other => out.push(other.clone()),
        }
    }
    out
}
