//! Plain data types shared across the engine.

/// The metadata fields surrounding the body content.
///
/// URL fields are optional free text; they are not validated as URIs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormMetadata {
    pub main_category_name: String,
    pub main_category_url: String,
    pub sub_category_name: String,
    pub sub_category_url: String,
    pub title_text: String,
}

/// A fragment insertion gathered from the prompt dialog.
///
/// Produced on dialog confirm and consumed exactly once by the insertion
/// operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionRequest {
    Image { url: String, caption: String },
    Link { url: String, display_text: String },
}

impl InsertionRequest {
    /// The target URL of either variant.
    pub fn url(&self) -> &str {
        match self {
            InsertionRequest::Image { url, .. } | InsertionRequest::Link { url, .. } => url,
        }
    }
}

/// Clipboard content as delivered by a paste action.
///
/// Paste sources may carry a marked-up flavour next to the plain text;
/// the sanitizer only ever consumes `plain`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PastePayload {
    pub plain: String,
    pub marked_up: Option<String>,
}

impl PastePayload {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain: text.into(),
            marked_up: None,
        }
    }
}
