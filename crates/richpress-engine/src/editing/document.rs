//! The owned editable document.

use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::editing::commands::{Cmd, resolve};
use crate::editing::{ContentSnapshot, Patch};
use crate::markup::InlineStyle;

/// The editable content, owned by the session.
///
/// The buffer holds the canonical content markup - the same string that
/// is embedded verbatim into the generated document. The selection is an
/// explicit byte range into that buffer, transformed deterministically by
/// every applied command; there is no ambient selection object to go
/// stale.
///
/// Edits flow through [`Cmd`]s only. Each `apply` resolves the command to
/// one replacement, applies it as a delta, moves the selection and bumps
/// the version counter. The parsed node-tree view is derived on demand
/// via [`snapshot`](Document::snapshot) and never feeds back into the
/// buffer by itself.
pub struct Document {
    /// Buffer containing the content markup.
    buffer: Rope,
    /// Current selection/cursor as byte offsets into the buffer.
    selection: std::ops::Range<usize>,
    /// Version counter incremented on each edit.
    version: u64,
    /// Styles armed by formatting a collapsed selection; they wrap the
    /// next typed text at `pending_at` and are cleared by any other edit
    /// or selection move.
    pending: Vec<InlineStyle>,
    pending_at: usize,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::from_markup("")
    }

    /// Create a document from existing content markup.
    pub fn from_markup(markup: &str) -> Self {
        let buffer = Rope::from(markup);
        let len = buffer.len();
        Self {
            buffer,
            selection: len..len, // Start with cursor at end
            version: 0,
            pending: Vec::new(),
            pending_at: 0,
        }
    }

    /// Apply a command to the document.
    ///
    /// Resolves the command to a single replacement, applies it to the
    /// buffer as one delta, places the selection per the command's
    /// cursor rule and increments the version. Pending styles are
    /// one-shot: whatever command runs, they are gone afterwards (a
    /// `TypeText` consumes them into its markup first).
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let edit = resolve(self, &cmd);

        let mut builder = Builder::new(self.buffer.len());
        if edit.markup.is_empty() {
            if !edit.range.is_empty() {
                builder.delete(edit.range.clone());
            }
        } else {
            builder.replace(edit.range.clone(), Rope::from(edit.markup.as_str()));
        }
        self.buffer = builder.build().apply(&self.buffer);

        let changed = if edit.markup.is_empty() {
            Vec::new()
        } else {
            vec![edit.range.start..edit.range.start + edit.markup.len()]
        };

        self.selection = edit.cursor.clone();
        self.pending.clear();
        self.version += 1;

        Patch {
            changed,
            new_selection: edit.cursor,
            version: self.version,
        }
    }

    /// Get the current selection range.
    pub fn selection(&self) -> std::ops::Range<usize> {
        self.selection.clone()
    }

    /// Set the selection range, clamped to the buffer.
    ///
    /// Moving the selection away from the pending-style position disarms
    /// pending styles.
    pub fn set_selection(&mut self, selection: std::ops::Range<usize>) {
        let len = self.buffer.len();
        let start = selection.start.min(len);
        let end = selection.end.min(len).max(start);
        self.selection = start..end;
        if !(self.selection.is_empty() && self.selection.start == self.pending_at) {
            self.pending.clear();
        }
    }

    /// Arm an inline style at the current caret; it will wrap the next
    /// typed text there.
    pub fn push_pending_style(&mut self, style: InlineStyle) {
        let at = self.selection.start;
        if self.pending_at != at {
            self.pending.clear();
        }
        self.pending_at = at;
        if !self.pending.contains(&style) {
            self.pending.push(style);
        }
    }

    /// Disarm any pending styles.
    pub fn clear_pending_styles(&mut self) {
        self.pending.clear();
    }

    /// Pending styles armed at the given position (empty otherwise).
    pub(crate) fn pending_styles_at(&self, at: usize) -> &[InlineStyle] {
        if self.pending_at == at {
            &self.pending
        } else {
            &[]
        }
    }

    /// Get the current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the current content markup.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Get the buffer length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Slice the buffer to a cow string, clamped to the buffer bounds.
    pub fn slice_to_cow(&self, range: std::ops::Range<usize>) -> std::borrow::Cow<'_, str> {
        let len = self.buffer.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.buffer.slice_to_cow(start..end)
    }

    /// Get an immutable parsed view of the content.
    pub fn snapshot(&self) -> ContentSnapshot {
        crate::editing::snapshot::create_snapshot(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            selection: self.selection.clone(),
            version: self.version,
            pending: self.pending.clone(),
            pending_at: self.pending_at,
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // Buffers compare as strings; everything else is plain state
        self.buffer.to_string() == other.buffer.to_string()
            && self.selection == other.selection
            && self.version == other.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ============ Basic document tests ============

    #[test]
    fn new_document_is_empty_with_cursor_at_zero() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.selection(), 0..0);
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn from_markup_starts_with_cursor_at_end() {
        let doc = Document::from_markup("<p>hi</p>");
        assert_eq!(doc.text(), "<p>hi</p>");
        assert_eq!(doc.selection(), 9..9);
    }

    #[test]
    fn text_round_trips_unicode() {
        let markup = "圖片 ▲ text";
        let doc = Document::from_markup(markup);
        assert_eq!(doc.text(), markup);
    }

    // ============ Selection handling tests ============

    #[test]
    fn set_selection_clamps_to_buffer() {
        let mut doc = Document::from_markup("abc");
        doc.set_selection(1..99);
        assert_eq!(doc.selection(), 1..3);

        doc.set_selection(50..60);
        assert_eq!(doc.selection(), 3..3);
    }

    #[test]
    fn version_increments_per_edit() {
        let mut doc = Document::new();
        doc.apply(Cmd::TypeText {
            at: 0,
            text: "a".to_string(),
        });
        doc.apply(Cmd::TypeText {
            at: 1,
            text: "b".to_string(),
        });
        assert_eq!(doc.version(), 2);
        assert_eq!(doc.text(), "ab");
    }

    // ============ Pending style tests ============

    #[test]
    fn pending_style_wraps_next_typed_text() {
        let mut doc = Document::from_markup("x ");
        doc.set_selection(2..2);
        doc.push_pending_style(InlineStyle::Bold);

        doc.apply(Cmd::TypeText {
            at: 2,
            text: "bold".to_string(),
        });

        assert_eq!(doc.text(), "x <strong>bold</strong>");
    }

    #[test]
    fn pending_styles_stack() {
        let mut doc = Document::new();
        doc.push_pending_style(InlineStyle::Bold);
        doc.push_pending_style(InlineStyle::Italic);

        doc.apply(Cmd::TypeText {
            at: 0,
            text: "hi".to_string(),
        });

        assert_eq!(doc.text(), "<strong><em>hi</em></strong>");
    }

    #[test]
    fn pending_style_survives_caret_reset_at_same_spot() {
        let mut doc = Document::from_markup("x");
        doc.set_selection(1..1);
        doc.push_pending_style(InlineStyle::Bold);
        // Restoring the same caret (e.g. before the next toolbar action)
        // keeps the armed style
        doc.set_selection(1..1);
        doc.push_pending_style(InlineStyle::Italic);

        doc.apply(Cmd::TypeText {
            at: 1,
            text: "y".to_string(),
        });
        assert_eq!(doc.text(), "x<strong><em>y</em></strong>");
    }

    #[test]
    fn moving_selection_disarms_pending_styles() {
        let mut doc = Document::from_markup("abc");
        doc.set_selection(1..1);
        doc.push_pending_style(InlineStyle::Bold);

        doc.set_selection(2..2);
        doc.apply(Cmd::TypeText {
            at: 2,
            text: "x".to_string(),
        });

        assert_eq!(doc.text(), "abxc");
    }

    #[test]
    fn any_edit_consumes_pending_styles() {
        let mut doc = Document::from_markup("abc");
        doc.set_selection(3..3);
        doc.push_pending_style(InlineStyle::Bold);

        doc.apply(Cmd::InsertLineBreak { range: 3..3 });
        doc.apply(Cmd::TypeText {
            at: doc.selection().start,
            text: "x".to_string(),
        });

        assert_eq!(doc.text(), "abc<br>x");
    }

    // ============ Snapshot tests ============

    #[test]
    fn snapshot_carries_version_and_parsed_nodes() {
        let mut doc = Document::from_markup("<strong>b</strong>");
        let snapshot = doc.snapshot();
        assert_eq!(snapshot.version, 0);
        assert_eq!(snapshot.nodes.len(), 1);

        doc.apply(Cmd::TypeText {
            at: 0,
            text: "a".to_string(),
        });
        assert_eq!(doc.snapshot().version, 1);
    }

    #[test]
    fn snapshot_does_not_mutate_document() {
        let doc = Document::from_markup("<p>x</p>");
        let before = doc.text();
        let _ = doc.snapshot();
        let _ = doc.snapshot();
        assert_eq!(doc.text(), before);
        assert_eq!(doc.version(), 0);
    }
}
