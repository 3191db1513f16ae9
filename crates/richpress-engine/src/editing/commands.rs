//! The command algebra for document edits.
//!
//! Every mutation of the content buffer is one [`Cmd`]. A command resolves
//! to a single replacement (range + markup + post-edit cursor) which the
//! document applies as one delta; the cursor placement is part of the
//! resolution, so it is deterministic per command rather than inferred
//! from the edit afterwards.

use std::ops::Range;

use crate::markup::fragment;
use crate::markup::writer::style_tags;
use crate::markup::{InlineStyle, parse, strip_formatting, write_nodes};

use crate::editing::Document;

/// Commands that can be applied to the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Insert typed text at the caret. The text is escaped and, when
    /// pending styles are armed at that position, wrapped in their tags.
    TypeText { at: usize, text: String },
    /// Insert raw markup verbatim.
    InsertMarkup { at: usize, markup: String },
    DeleteRange { range: Range<usize> },
    ReplaceRange { range: Range<usize>, markup: String },
    /// Wrap the range in an inline style's tags.
    ApplyStyle {
        range: Range<usize>,
        style: InlineStyle,
    },
    /// Unwrap all inline formatting within the range.
    RemoveFormatting { range: Range<usize> },
    /// Replace the range with a captioned figure block followed by an
    /// empty placeholder paragraph; the cursor lands inside that
    /// paragraph so typing below the image is always possible.
    InsertImage {
        range: Range<usize>,
        url: String,
        caption: String,
    },
    /// Replace the range with a hyperlink; the cursor lands right after
    /// the anchor.
    InsertLink {
        range: Range<usize>,
        url: String,
        text: String,
    },
    /// Replace the range with an explicit line break; the cursor lands
    /// right after it.
    InsertLineBreak { range: Range<usize> },
    /// Replace the range with pasted text, plain-text coerced.
    PastePlain { range: Range<usize>, text: String },
    /// Replace the entire content (import and similar external syncs).
    ReplaceAll { markup: String },
}

/// A resolved command: one replacement plus the post-edit selection.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Edit {
    /// Buffer range to replace (clamped to the buffer).
    pub range: Range<usize>,
    /// Markup that takes its place (possibly empty).
    pub markup: String,
    /// Selection after the edit.
    pub cursor: Range<usize>,
}

/// Resolve a command against the current document state.
pub(crate) fn resolve(doc: &Document, cmd: &Cmd) -> Edit {
    match cmd {
        Cmd::TypeText { at, text } => {
            let at = clamp_offset(doc, *at);
            let escaped = html_escape::encode_text(text).into_owned();
            let pending = doc.pending_styles_at(at);
            if pending.is_empty() {
                let cursor = at + escaped.len();
                Edit {
                    range: at..at,
                    markup: escaped,
                    cursor: cursor..cursor,
                }
            } else {
                let mut opens = String::new();
                let mut closes = String::new();
                for style in pending {
                    let (open, close) = style_tags(style);
                    opens.push_str(&open);
                    closes.insert_str(0, close);
                }
                // Caret stays inside the closing tags so the user keeps
                // typing styled text
                let cursor = at + opens.len() + escaped.len();
                Edit {
                    range: at..at,
                    markup: format!("{opens}{escaped}{closes}"),
                    cursor: cursor..cursor,
                }
            }
        }
        Cmd::InsertMarkup { at, markup } => {
            let at = clamp_offset(doc, *at);
            let cursor = at + markup.len();
            Edit {
                range: at..at,
                markup: markup.clone(),
                cursor: cursor..cursor,
            }
        }
        Cmd::DeleteRange { range } => {
            let range = clamp_range(doc, range);
            Edit {
                cursor: range.start..range.start,
                range,
                markup: String::new(),
            }
        }
        Cmd::ReplaceRange { range, markup } => {
            let range = clamp_range(doc, range);
            let cursor = range.start + markup.len();
            Edit {
                range,
                markup: markup.clone(),
                cursor: cursor..cursor,
            }
        }
        Cmd::ApplyStyle { range, style } => {
            let range = clamp_range(doc, range);
            let inner = doc.slice_to_cow(range.clone()).into_owned();
            let (open, close) = style_tags(style);
            let markup = format!("{open}{inner}{close}");
            // Selection covers exactly the styled text
            let start = range.start + open.len();
            Edit {
                cursor: start..start + inner.len(),
                range,
                markup,
            }
        }
        Cmd::RemoveFormatting { range } => {
            let range = clamp_range(doc, range);
            let inner = doc.slice_to_cow(range.clone()).into_owned();
            let markup = write_nodes(&strip_formatting(&parse(&inner)));
            Edit {
                cursor: range.start..range.start + markup.len(),
                range,
                markup,
            }
        }
        Cmd::InsertImage {
            range,
            url,
            caption,
        } => {
            let range = clamp_range(doc, range);
            let figure = fragment::image_figure(url, caption);
            let markup = format!("{figure}{}", fragment::EMPTY_PARAGRAPH);
            // Inside the placeholder paragraph, before its &nbsp;
            let cursor = range.start + figure.len() + "<p>".len();
            Edit {
                range,
                markup,
                cursor: cursor..cursor,
            }
        }
        Cmd::InsertLink { range, url, text } => {
            let range = clamp_range(doc, range);
            let markup = fragment::hyperlink(url, text);
            let cursor = range.start + markup.len();
            Edit {
                range,
                markup,
                cursor: cursor..cursor,
            }
        }
        Cmd::InsertLineBreak { range } => {
            let range = clamp_range(doc, range);
            let markup = "<br>".to_string();
            let cursor = range.start + markup.len();
            Edit {
                range,
                markup,
                cursor: cursor..cursor,
            }
        }
        Cmd::PastePlain { range, text } => {
            let range = clamp_range(doc, range);
            let markup = html_escape::encode_text(text).into_owned();
            let cursor = range.start + markup.len();
            Edit {
                range,
                markup,
                cursor: cursor..cursor,
            }
        }
        Cmd::ReplaceAll { markup } => Edit {
            range: 0..doc.len(),
            markup: markup.clone(),
            cursor: markup.len()..markup.len(),
        },
    }
}

fn clamp_offset(doc: &Document, at: usize) -> usize {
    at.min(doc.len())
}

fn clamp_range(doc: &Document, range: &Range<usize>) -> Range<usize> {
    let len = doc.len();
    let start = range.start.min(len);
    let end = range.end.min(len).max(start);
    start..end
}
