//! The authoring session.
//!
//! Owns the editable document, the selection tracker, the metadata
//! fields, the editor-focus flag and the last generated output, and
//! exposes the editing operations the front-end drives. One operation
//! runs per user event; each runs to completion synchronously.

use crate::editing::{Cmd, Document, SelectionState, SelectionTracker};
use crate::io::{self, SnapshotError};
use crate::markup::InlineStyle;
use crate::models::{FormMetadata, InsertionRequest, PastePayload};
use crate::render;

/// A formatting action from the toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    /// Foreground color; the value is a CSS color specification.
    ForeColor(String),
    RemoveFormat,
}

impl FormatCommand {
    fn style(&self) -> Option<InlineStyle> {
        match self {
            FormatCommand::Bold => Some(InlineStyle::Bold),
            FormatCommand::Italic => Some(InlineStyle::Italic),
            FormatCommand::Underline => Some(InlineStyle::Underline),
            FormatCommand::ForeColor(color) => Some(InlineStyle::Color(color.clone())),
            FormatCommand::RemoveFormat => None,
        }
    }
}

/// Outcome of a fragment insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inserted {
    Done,
    /// Nothing happened: no usable target position, or an empty URL.
    Dropped,
}

/// One authoring session: metadata + content + selection state.
#[derive(Default)]
pub struct Session {
    doc: Document,
    tracker: SelectionTracker,
    meta: FormMetadata,
    /// Whether the editor surface currently has input focus.
    focused: bool,
    /// Output of the last generate action, if any.
    generated: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // === State access ===

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn metadata(&self) -> &FormMetadata {
        &self.meta
    }

    pub fn metadata_mut(&mut self) -> &mut FormMetadata {
        &mut self.meta
    }

    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    pub fn content(&self) -> String {
        self.doc.text()
    }

    // === Focus / selection sync points ===

    pub fn focus_editor(&mut self) {
        self.focused = true;
    }

    /// Loss of focus from the editor surface. The owned buffer is already
    /// authoritative; only the flag changes.
    pub fn blur_editor(&mut self) {
        self.focused = false;
    }

    pub fn is_editor_focused(&self) -> bool {
        self.focused
    }

    pub fn set_selection(&mut self, anchor: usize, focus: usize) {
        self.doc
            .set_selection(SelectionState::new(anchor, focus).range());
    }

    /// Snapshot the selection before a toolbar action steals focus.
    pub fn save_selection(&mut self) {
        self.tracker.capture(&self.doc);
    }

    // === Editing operations ===

    /// Insert typed text at the caret (replacing any selection).
    pub fn type_text(&mut self, text: &str) {
        let range = self.doc.selection();
        if !range.is_empty() {
            self.doc.apply(Cmd::DeleteRange { range });
        }
        let at = self.doc.selection().start;
        self.doc.apply(Cmd::TypeText {
            at,
            text: text.to_string(),
        });
    }

    /// Delete the selection, or the byte run before the caret.
    pub fn delete_backward(&mut self) {
        let range = self.doc.selection();
        if !range.is_empty() {
            self.doc.apply(Cmd::DeleteRange { range });
            return;
        }
        if range.start == 0 {
            return;
        }
        // Step back over one UTF-8 scalar
        let text = self.doc.text();
        let mut start = range.start - 1;
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        self.doc.apply(Cmd::DeleteRange {
            range: start..range.start,
        });
    }

    /// Apply a formatting action to the captured selection.
    ///
    /// Restores the captured selection first (the toolbar press happened
    /// after the editor lost focus), applies the format over exactly that
    /// range, and returns focus to the editor. The captured selection is
    /// gone afterwards regardless.
    pub fn apply_format(&mut self, command: FormatCommand) {
        let saved = self.tracker.consume();
        SelectionTracker::restore(saved, &mut self.doc);
        let range = self.doc.selection();

        match command.style() {
            Some(style) => {
                if range.is_empty() {
                    // Collapsed: affects subsequently typed text
                    self.doc.push_pending_style(style);
                } else {
                    self.doc.apply(Cmd::ApplyStyle { range, style });
                }
            }
            None => {
                if range.is_empty() {
                    self.doc.clear_pending_styles();
                } else {
                    self.doc.apply(Cmd::RemoveFormatting { range });
                }
            }
        }
        self.focused = true;
    }

    /// Splice a fragment in at the captured selection.
    ///
    /// Falls back to the live cursor when nothing was captured and the
    /// editor is focused; with neither available the request is dropped
    /// silently. An empty URL is a no-op for either variant - no partial
    /// fragment is ever created.
    pub fn insert_fragment(&mut self, request: InsertionRequest) -> Inserted {
        let saved = self.tracker.consume();
        let target = match saved {
            Some(state) => state,
            None if self.focused => {
                let live = self.doc.selection();
                SelectionState::new(live.start, live.end)
            }
            None => return Inserted::Dropped,
        };

        if request.url().is_empty() {
            return Inserted::Dropped;
        }

        let cmd = match request {
            InsertionRequest::Image { url, caption } => Cmd::InsertImage {
                range: target.range(),
                url,
                caption,
            },
            InsertionRequest::Link { url, display_text } => {
                let text = self.resolve_link_text(&target, display_text, &url);
                Cmd::InsertLink {
                    range: target.range(),
                    url,
                    text,
                }
            }
        };
        self.doc.apply(cmd);
        self.focused = true;
        Inserted::Done
    }

    /// Visible link text: explicit display text, else the text selected
    /// at capture time, else the URL itself.
    fn resolve_link_text(
        &self,
        target: &SelectionState,
        display_text: String,
        url: &str,
    ) -> String {
        if !display_text.is_empty() {
            return display_text;
        }
        if !target.is_collapsed() {
            let slice = self.doc.slice_to_cow(target.range());
            let selected = crate::markup::plain_text(&crate::markup::parse(&slice));
            if !selected.is_empty() {
                return selected;
            }
        }
        url.to_string()
    }

    /// Paragraph-break key: one explicit line break, never a new
    /// paragraph element.
    pub fn insert_line_break(&mut self) {
        let range = self.doc.selection();
        self.doc.apply(Cmd::InsertLineBreak { range });
    }

    /// Paste, coerced to plain text. Any marked-up flavour is discarded.
    pub fn paste(&mut self, payload: &PastePayload) {
        let range = self.doc.selection();
        self.doc.apply(Cmd::PastePlain {
            range,
            text: payload.plain.clone(),
        });
    }

    // === Whole-session operations ===

    /// Run the serializer over the current state and cache the output.
    pub fn generate(&mut self) -> &str {
        let html = render::generate(&self.meta, &self.doc.text());
        self.generated.insert(html)
    }

    /// Reset every field, the content and the generated output.
    pub fn clear_all(&mut self) {
        self.meta = FormMetadata::default();
        self.doc = Document::new();
        self.tracker.clear();
        self.generated = None;
    }

    /// Serialize the form state to the JSON snapshot format.
    pub fn export_snapshot(&self) -> Result<String, SnapshotError> {
        io::encode(&self.meta, &self.doc.text())
    }

    /// Replace the form state from a JSON snapshot.
    ///
    /// Parses fully before committing anything: a malformed payload is a
    /// recoverable error and leaves the session untouched.
    pub fn import_snapshot(&mut self, json: &str) -> Result<(), SnapshotError> {
        let (meta, content) = io::decode(json)?.into_parts();
        self.meta = meta;
        self.doc = Document::from_markup(&content);
        self.tracker.clear();
        Ok(())
    }
}
