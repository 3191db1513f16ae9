//! Immutable parsed views of the document.

use crate::editing::Document;
use crate::markup::{self, Node};

/// Snapshot of the document content for reading.
///
/// Created on demand from the buffer; holding one never blocks or
/// observes later edits (the version tells which state it describes).
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSnapshot {
    pub version: u64,
    pub nodes: Vec<Node>,
}

impl ContentSnapshot {
    /// Visible text of the content, entities decoded, tags dropped.
    pub fn plain_text(&self) -> String {
        markup::plain_text(&self.nodes)
    }

    /// True if any inline formatting wrapper exists in the content.
    pub fn has_formatting(&self) -> bool {
        markup::types::contains_formatting(&self.nodes)
    }
}

/// Get a snapshot of the document for reading.
pub(crate) fn create_snapshot(doc: &Document) -> ContentSnapshot {
    ContentSnapshot {
        version: doc.version(),
        nodes: markup::parse(&doc.text()),
    }
}
