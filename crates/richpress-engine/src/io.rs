//! JSON snapshot persistence for the form state.
//!
//! One snapshot file carries the five metadata fields plus the raw
//! content markup. Key names are fixed camelCase so files written by
//! earlier versions of the tool import unchanged; any missing key
//! defaults to the empty string. Import parses fully before anything is
//! committed, so a malformed file never disturbs in-memory state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::FormMetadata;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The on-disk snapshot model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsSnapshot {
    pub main_category_name: String,
    pub main_category_url: String,
    pub sub_category_name: String,
    pub sub_category_url: String,
    pub title_text: String,
    pub editor_content: String,
}

impl SettingsSnapshot {
    pub fn from_parts(meta: &FormMetadata, content: &str) -> Self {
        Self {
            main_category_name: meta.main_category_name.clone(),
            main_category_url: meta.main_category_url.clone(),
            sub_category_name: meta.sub_category_name.clone(),
            sub_category_url: meta.sub_category_url.clone(),
            title_text: meta.title_text.clone(),
            editor_content: content.to_string(),
        }
    }

    pub fn into_parts(self) -> (FormMetadata, String) {
        (
            FormMetadata {
                main_category_name: self.main_category_name,
                main_category_url: self.main_category_url,
                sub_category_name: self.sub_category_name,
                sub_category_url: self.sub_category_url,
                title_text: self.title_text,
            },
            self.editor_content,
        )
    }
}

/// Serialize a snapshot to pretty-printed JSON.
pub fn encode(meta: &FormMetadata, content: &str) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(&SettingsSnapshot::from_parts(meta, content))?)
}

/// Parse a snapshot from JSON; missing keys default to empty strings.
pub fn decode(json: &str) -> Result<SettingsSnapshot, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

/// Write a snapshot file, creating parent directories as needed.
pub fn write_snapshot_file(
    path: &Path,
    meta: &FormMetadata,
    content: &str,
) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, encode(meta, content)?)?;
    Ok(())
}

/// Read and parse a snapshot file.
pub fn read_snapshot_file(path: &Path) -> Result<SettingsSnapshot, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::NotFound(path.to_path_buf()));
    }
    decode(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_meta() -> FormMetadata {
        FormMetadata {
            main_category_name: "科技".to_string(),
            main_category_url: "https://example.com/tech".to_string(),
            sub_category_name: "人工智慧".to_string(),
            sub_category_url: String::new(),
            title_text: "未來趨勢".to_string(),
        }
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let meta = sample_meta();
        let content = "<p>hello <strong>world</strong></p>";

        let json = encode(&meta, content).unwrap();
        let (meta_back, content_back) = decode(&json).unwrap().into_parts();

        assert_eq!(meta_back, meta);
        assert_eq!(content_back, content);
    }

    #[test]
    fn uses_fixed_camel_case_keys() {
        let json = encode(&sample_meta(), "c").unwrap();
        for key in [
            "mainCategoryName",
            "mainCategoryUrl",
            "subCategoryName",
            "subCategoryUrl",
            "titleText",
            "editorContent",
        ] {
            assert!(json.contains(key), "missing key {key} in {json}");
        }
    }

    #[test]
    fn missing_keys_default_to_empty_strings() {
        let snapshot = decode(r#"{"titleText": "only title"}"#).unwrap();
        assert_eq!(snapshot.title_text, "only title");
        assert_eq!(snapshot.main_category_name, "");
        assert_eq!(snapshot.editor_content, "");
    }

    #[test]
    fn empty_object_decodes_to_defaults() {
        assert_eq!(decode("{}").unwrap(), SettingsSnapshot::default());
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        let result = decode("not json at all");
        assert!(matches!(result, Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        write_snapshot_file(&path, &sample_meta(), "<br>").unwrap();
        let snapshot = read_snapshot_file(&path).unwrap();

        assert_eq!(snapshot.editor_content, "<br>");
        assert_eq!(snapshot.main_category_name, "科技");
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = read_snapshot_file(Path::new("/no/such/settings.json"));
        assert!(matches!(result, Err(SnapshotError::NotFound(_))));
    }
}
