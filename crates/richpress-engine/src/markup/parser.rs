//! Tolerant parser from a token stream to a [`Node`] tree.
//!
//! The parser never fails. Markup that does not form a recognized
//! construct degrades gracefully:
//!
//! - unknown container tags (`<div>`, `<section>`, …) are transparent:
//!   the tag is dropped, its children are kept in place
//! - unrecognized tags are kept verbatim as text so no bytes are lost
//! - closing tags with no matching open container are ignored
//! - containers still open at end of input are closed there
//!
//! Legacy style tags are normalized while parsing: `<b>` reads as bold,
//! `<i>` as italic and `<font color>` as a foreground color, so content
//! written by older editors maps onto the same node tree the canonical
//! writer produces.

use super::lexer::{TokenKind, lex};
use super::types::{InlineStyle, Node};

/// Parse a markup string into a node tree.
pub fn parse(input: &str) -> Vec<Node> {
    let tokens = lex(input);
    let mut parser = Parser::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Text | TokenKind::Entity | TokenKind::Lt | TokenKind::Amp => {
                parser.push_text(token.text);
                i += 1;
            }
            TokenKind::Tag => {
                let tag = Tag::read(token.text);
                if tag.closing {
                    parser.close(&tag.name);
                    i += 1;
                } else if tag.name == "figure" {
                    i = parse_figure(&tokens, i + 1, &mut parser);
                } else {
                    parser.open(&tag);
                    i += 1;
                }
            }
        }
    }

    parser.finish()
}

/// Consume tokens of a figure block, starting just after `<figure>`.
///
/// Collects the first image's `src`/`alt` and the raw caption text, then
/// emits a single [`Node::Figure`]. Returns the index just past the
/// closing tag (or end of input).
fn parse_figure(tokens: &[super::lexer::Token<'_>], mut i: usize, parser: &mut Parser) -> usize {
    let mut src = String::new();
    let mut alt = String::new();
    let mut caption = String::new();
    let mut in_caption = false;

    while i < tokens.len() {
        let token = &tokens[i];
        i += 1;
        match token.kind {
            TokenKind::Tag => {
                let tag = Tag::read(token.text);
                match tag.name.as_str() {
                    "figure" if tag.closing => break,
                    "img" if !tag.closing => {
                        src = attr_value(token.text, "src").unwrap_or_default();
                        alt = attr_value(token.text, "alt").unwrap_or_default();
                    }
                    "figcaption" => in_caption = !tag.closing,
                    _ => {}
                }
            }
            _ if in_caption => caption.push_str(token.text),
            _ => {}
        }
    }

    parser.node(Node::Figure { src, alt, caption });
    i
}

/// An open container on the parse stack.
enum Frame {
    Styled(InlineStyle),
    Link(String),
    Paragraph,
    Transparent,
}

impl Frame {
    fn matches(&self, closing_name: &str) -> bool {
        match (self, closing_name) {
            (Frame::Styled(InlineStyle::Bold), "strong" | "b") => true,
            (Frame::Styled(InlineStyle::Italic), "em" | "i") => true,
            (Frame::Styled(InlineStyle::Underline), "u") => true,
            (Frame::Styled(InlineStyle::Color(_)), "span" | "font") => true,
            (Frame::Link(_), "a") => true,
            (Frame::Paragraph, "p") => true,
            (Frame::Transparent, "span" | "div" | "section" | "article" | "blockquote") => true,
            _ => false,
        }
    }
}

struct Parser {
    root: Vec<Node>,
    stack: Vec<(Frame, Vec<Node>)>,
    text: String,
}

impl Parser {
    fn new() -> Self {
        Self {
            root: Vec::new(),
            stack: Vec::new(),
            text: String::new(),
        }
    }

    fn push_text(&mut self, raw: &str) {
        self.text.push_str(raw);
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let run = std::mem::take(&mut self.text);
            self.children().push(Node::Text(run));
        }
    }

    fn children(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some((_, children)) => children,
            None => &mut self.root,
        }
    }

    fn node(&mut self, node: Node) {
        self.flush_text();
        self.children().push(node);
    }

    fn open(&mut self, tag: &Tag) {
        let frame = match tag.name.as_str() {
            "strong" | "b" => Frame::Styled(InlineStyle::Bold),
            "em" | "i" => Frame::Styled(InlineStyle::Italic),
            "u" => Frame::Styled(InlineStyle::Underline),
            "span" => match attr_value(&tag.raw, "style").as_deref().and_then(style_color) {
                Some(color) => Frame::Styled(InlineStyle::Color(color)),
                None => Frame::Transparent,
            },
            "font" => match attr_value(&tag.raw, "color") {
                Some(color) => Frame::Styled(InlineStyle::Color(color)),
                None => Frame::Transparent,
            },
            "a" => Frame::Link(attr_value(&tag.raw, "href").unwrap_or_default()),
            "p" => Frame::Paragraph,
            "div" | "section" | "article" | "blockquote" => Frame::Transparent,
            "br" => {
                self.node(Node::LineBreak);
                return;
            }
            "img" => {
                let src = attr_value(&tag.raw, "src").unwrap_or_default();
                let alt = attr_value(&tag.raw, "alt").unwrap_or_default();
                self.node(Node::Image { src, alt });
                return;
            }
            // Unrecognized tag: keep its bytes as text
            _ => {
                self.push_text(&tag.raw);
                return;
            }
        };
        self.flush_text();
        self.stack.push((frame, Vec::new()));
    }

    fn close(&mut self, name: &str) {
        let Some(target) = self.stack.iter().rposition(|(frame, _)| frame.matches(name)) else {
            // No matching open container: ignore the stray closing tag
            return;
        };
        self.flush_text();
        while self.stack.len() > target {
            self.pop_frame();
        }
    }

    /// Pop the innermost open container, wrapping (or splicing, for
    /// transparent containers) its children into the parent.
    fn pop_frame(&mut self) {
        let (frame, mut children) = self.stack.pop().expect("stack is non-empty");
        match frame {
            Frame::Styled(style) => self.children().push(Node::Styled { style, children }),
            Frame::Link(href) => self.children().push(Node::Link { href, children }),
            Frame::Paragraph => self.children().push(Node::Paragraph(children)),
            Frame::Transparent => self.children().append(&mut children),
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush_text();
        // Close whatever is still open at end of input
        while !self.stack.is_empty() {
            self.pop_frame();
        }
        self.root
    }
}

/// A classified tag, as read from the raw `<…>` slice.
struct Tag {
    name: String,
    closing: bool,
    raw: String,
}

impl Tag {
    fn read(raw: &str) -> Tag {
        let inner = raw.trim_start_matches('<').trim_end_matches('>');
        let closing = inner.starts_with('/');
        let inner = inner.trim_start_matches('/');
        let name: String = inner
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Tag {
            name,
            closing,
            raw: raw.to_string(),
        }
    }
}

/// Extract a double- or single-quoted attribute value from a raw tag.
fn attr_value(tag: &str, name: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let mut from = 0;
    while let Some(pos) = lower[from..].find(name) {
        let at = from + pos;
        let preceded = tag[..at].ends_with(|c: char| c.is_ascii_whitespace());
        let rest = tag[at + name.len()..].trim_start();
        if preceded && rest.starts_with('=') {
            let rest = rest[1..].trim_start();
            let quote = rest.chars().next()?;
            if quote == '"' || quote == '\'' {
                let inner = &rest[1..];
                return inner.find(quote).map(|end| inner[..end].to_string());
            }
            return None;
        }
        from = at + name.len();
    }
    None
}

/// Extract the `color` property value from an inline style attribute.
fn style_color(style: &str) -> Option<String> {
    let lower = style.to_ascii_lowercase();
    let at = lower.find("color")?;
    let rest = style[at + "color".len()..].trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();
    let end = rest.find(';').unwrap_or(rest.len());
    let value = rest[..end].trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    // ============ Basic structure tests ============

    #[test]
    fn parse_empty() {
        assert_eq!(parse(""), vec![]);
    }

    #[test]
    fn parse_plain_text() {
        assert_eq!(parse("hello"), vec![text("hello")]);
    }

    #[test]
    fn parse_keeps_entities_raw() {
        assert_eq!(parse("a &amp; b"), vec![text("a &amp; b")]);
    }

    #[test]
    fn parse_styled_run() {
        assert_eq!(
            parse("x<strong>bold</strong>y"),
            vec![
                text("x"),
                Node::Styled {
                    style: InlineStyle::Bold,
                    children: vec![text("bold")],
                },
                text("y"),
            ]
        );
    }

    #[test]
    fn parse_nested_styles() {
        assert_eq!(
            parse("<strong><em>both</em></strong>"),
            vec![Node::Styled {
                style: InlineStyle::Bold,
                children: vec![Node::Styled {
                    style: InlineStyle::Italic,
                    children: vec![text("both")],
                }],
            }]
        );
    }

    #[test]
    fn parse_line_break_variants() {
        for markup in ["a<br>b", "a<br/>b", "a<br />b"] {
            assert_eq!(parse(markup), vec![text("a"), Node::LineBreak, text("b")]);
        }
    }

    #[test]
    fn parse_paragraph() {
        assert_eq!(
            parse("<p>one</p>"),
            vec![Node::Paragraph(vec![text("one")])]
        );
    }

    // ============ Legacy tag normalization ============

    #[test]
    fn parse_legacy_bold_italic() {
        assert_eq!(
            parse("<b>x</b><i>y</i>"),
            vec![
                Node::Styled {
                    style: InlineStyle::Bold,
                    children: vec![text("x")],
                },
                Node::Styled {
                    style: InlineStyle::Italic,
                    children: vec![text("y")],
                },
            ]
        );
    }

    #[test]
    fn parse_color_span() {
        assert_eq!(
            parse(r#"<span style="color: #ff0000">red</span>"#),
            vec![Node::Styled {
                style: InlineStyle::Color("#ff0000".to_string()),
                children: vec![text("red")],
            }]
        );
    }

    #[test]
    fn parse_legacy_font_color() {
        assert_eq!(
            parse(r##"<font color="#00ff00">green</font>"##),
            vec![Node::Styled {
                style: InlineStyle::Color("#00ff00".to_string()),
                children: vec![text("green")],
            }]
        );
    }

    #[test]
    fn parse_span_without_color_is_transparent() {
        assert_eq!(
            parse(r#"<span class="x">inner</span>"#),
            vec![text("inner")]
        );
    }

    // ============ Links and figures ============

    #[test]
    fn parse_link() {
        assert_eq!(
            parse(r#"<a href="https://x" target="_blank" rel="noopener noreferrer">go</a>"#),
            vec![Node::Link {
                href: "https://x".to_string(),
                children: vec![text("go")],
            }]
        );
    }

    #[test]
    fn parse_figure_with_caption() {
        assert_eq!(
            parse(r#"<figure><img src="u" alt="a" /><figcaption>▲ cap</figcaption></figure>"#),
            vec![Node::Figure {
                src: "u".to_string(),
                alt: "a".to_string(),
                caption: "▲ cap".to_string(),
            }]
        );
    }

    #[test]
    fn parse_figure_with_empty_caption() {
        assert_eq!(
            parse(r#"<figure><img src="u" alt="a" /><figcaption></figcaption></figure>"#),
            vec![Node::Figure {
                src: "u".to_string(),
                alt: "a".to_string(),
                caption: String::new(),
            }]
        );
    }

    #[test]
    fn parse_bare_image() {
        assert_eq!(
            parse(r#"<img src="u" alt="a" />"#),
            vec![Node::Image {
                src: "u".to_string(),
                alt: "a".to_string(),
            }]
        );
    }

    // ============ Tolerance tests ============

    #[test]
    fn unclosed_container_closes_at_end() {
        assert_eq!(
            parse("<strong>bold"),
            vec![Node::Styled {
                style: InlineStyle::Bold,
                children: vec![text("bold")],
            }]
        );
    }

    #[test]
    fn stray_closing_tag_is_ignored() {
        assert_eq!(parse("a</strong>b"), vec![text("ab")]);
    }

    #[test]
    fn transparent_div_keeps_children() {
        assert_eq!(
            parse("<div>inner<br></div>"),
            vec![text("inner"), Node::LineBreak]
        );
    }

    #[test]
    fn unknown_tag_is_kept_as_text() {
        assert_eq!(parse("<blink>x</blink>"), vec![text("<blink>x")]);
    }

    #[test]
    fn mis_nested_close_also_closes_inner() {
        // </strong> closes the still-open <em> first
        assert_eq!(
            parse("<strong><em>x</strong>"),
            vec![Node::Styled {
                style: InlineStyle::Bold,
                children: vec![Node::Styled {
                    style: InlineStyle::Italic,
                    children: vec![text("x")],
                }],
            }]
        );
    }

    // ============ Attribute helper tests ============

    #[test]
    fn attr_value_double_and_single_quotes() {
        assert_eq!(
            attr_value(r#"<a href="u1">"#, "href"),
            Some("u1".to_string())
        );
        assert_eq!(attr_value("<a href='u2'>", "href"), Some("u2".to_string()));
        assert_eq!(attr_value("<a>", "href"), None);
    }

    #[test]
    fn style_color_extraction() {
        assert_eq!(style_color("color: #abc"), Some("#abc".to_string()));
        assert_eq!(
            style_color("font-size: 1em; color: rgb(1, 2, 3);"),
            Some("rgb(1, 2, 3)".to_string())
        );
        assert_eq!(style_color("font-size: 1em"), None);
    }
}
