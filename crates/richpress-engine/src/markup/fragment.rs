//! Builders for the fragments the editor splices into the content.

/// Marker glyph prefixed (with a trailing space) to non-empty captions.
pub const CAPTION_PREFIX: &str = "▲ ";

/// Alt text used when an image has no caption.
pub const IMAGE_ALT_FALLBACK: &str = "圖片";

/// Placeholder paragraph inserted after a figure so the user always has a
/// type-in point below it.
pub const EMPTY_PARAGRAPH: &str = "<p>&nbsp;</p>";

/// Build a captioned figure block.
///
/// The caption element always exists; its text is the caption prefixed
/// with the marker glyph when non-empty, and empty otherwise.
pub fn image_figure(url: &str, caption: &str) -> String {
    let alt = if caption.is_empty() {
        IMAGE_ALT_FALLBACK
    } else {
        caption
    };
    let caption_text = if caption.is_empty() {
        String::new()
    } else {
        format!(
            "{CAPTION_PREFIX}{}",
            html_escape::encode_text(caption)
        )
    };
    format!(
        r#"<figure><img src="{}" alt="{}" /><figcaption>{}</figcaption></figure>"#,
        html_escape::encode_double_quoted_attribute(url),
        html_escape::encode_double_quoted_attribute(alt),
        caption_text
    )
}

/// Build a hyperlink opening in a new browsing context, with the opener
/// isolated from the opened page.
pub fn hyperlink(url: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        html_escape::encode_double_quoted_attribute(url),
        html_escape::encode_text(text)
    )
}
