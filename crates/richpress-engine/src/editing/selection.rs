//! Explicit selection state and the capture/consume/restore tracker.
//!
//! The selection is an explicit pair of byte offsets into the content
//! buffer, not an ambient range object. Toolbar-style actions capture the
//! selection before anything else can disturb it, then the mutating
//! operation consumes the captured snapshot exactly once: a second
//! consume without an intervening capture returns `None`, so a stale
//! position can never be applied after the buffer has changed under it.

use crate::editing::Document;

/// An immutable snapshot of the user's selection.
///
/// `anchor` is where the selection started, `focus` where it ends; the
/// two are equal for a caret. Offsets are byte positions in the content
/// buffer and are only meaningful against the document state they were
/// captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    pub anchor: usize,
    pub focus: usize,
}

impl SelectionState {
    pub fn new(anchor: usize, focus: usize) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection at the given offset.
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            focus: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Normalized range regardless of selection direction.
    pub fn range(&self) -> std::ops::Range<usize> {
        if self.anchor <= self.focus {
            self.anchor..self.focus
        } else {
            self.focus..self.anchor
        }
    }
}

/// Captures and restores the selection across UI actions that would
/// otherwise destroy it.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    saved: Option<SelectionState>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the document's current selection.
    pub fn capture(&mut self, doc: &Document) {
        let range = doc.selection();
        self.saved = Some(SelectionState::new(range.start, range.end));
    }

    /// Take the most recently captured selection, clearing it.
    ///
    /// At-most-once: a second consecutive consume returns `None`.
    pub fn consume(&mut self) -> Option<SelectionState> {
        self.saved.take()
    }

    /// Peek at the captured selection without consuming it.
    pub fn peek(&self) -> Option<SelectionState> {
        self.saved
    }

    /// Drop any captured selection.
    pub fn clear(&mut self) {
        self.saved = None;
    }

    /// Re-apply a captured selection to the document, clamped to the
    /// buffer bounds. No-op for `None`.
    pub fn restore(state: Option<SelectionState>, doc: &mut Document) {
        if let Some(state) = state {
            doc.set_selection(state.range());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn caret_is_collapsed() {
        let caret = SelectionState::caret(5);
        assert!(caret.is_collapsed());
        assert_eq!(caret.range(), 5..5);
    }

    #[test]
    fn backward_selection_normalizes() {
        let state = SelectionState::new(9, 4);
        assert!(!state.is_collapsed());
        assert_eq!(state.range(), 4..9);
    }

    #[test]
    fn consume_is_at_most_once() {
        let doc = Document::from_markup("hello world");
        let mut tracker = SelectionTracker::new();

        tracker.capture(&doc);
        assert!(tracker.consume().is_some());
        // Second consume without a fresh capture yields nothing
        assert_eq!(tracker.consume(), None);
    }

    #[test]
    fn capture_reads_the_live_selection() {
        let mut doc = Document::from_markup("hello world");
        doc.set_selection(0..5);

        let mut tracker = SelectionTracker::new();
        tracker.capture(&doc);

        assert_eq!(tracker.consume(), Some(SelectionState::new(0, 5)));
    }

    #[test]
    fn restore_clamps_to_buffer_bounds() {
        let mut doc = Document::from_markup("abc");
        SelectionTracker::restore(Some(SelectionState::new(1, 99)), &mut doc);
        assert_eq!(doc.selection(), 1..3);
    }

    #[test]
    fn restore_none_is_a_no_op() {
        let mut doc = Document::from_markup("abc");
        doc.set_selection(1..2);
        SelectionTracker::restore(None, &mut doc);
        assert_eq!(doc.selection(), 1..2);
    }
}
