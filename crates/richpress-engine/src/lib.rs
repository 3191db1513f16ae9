pub mod editing;
pub mod io;
pub mod markup;
pub mod models;
pub mod render;
pub mod session;

// Re-export key types for easier usage
pub use editing::{Cmd, ContentSnapshot, Document, Patch, SelectionState, SelectionTracker};
pub use models::{FormMetadata, InsertionRequest, PastePayload};
pub use session::{FormatCommand, Inserted, Session};
