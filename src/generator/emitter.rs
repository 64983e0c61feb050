//! Serialization of the assembled document.

use crate::models::Document;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Pretty-printed JSON with two-space indentation and a trailing newline.
pub fn to_json_pretty(document: &Document) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(document).context("Failed to serialize document")?;
    json.push('\n');
    Ok(json)
}

/// Writes the document to `writer`.
pub fn write_to<W: Write>(document: &Document, mut writer: W) -> Result<()> {
    let json = to_json_pretty(document)?;
    writer
        .write_all(json.as_bytes())
        .context("Failed to write document")?;
    writer.flush().context("Failed to flush output")?;
    Ok(())
}

/// Writes the document to `path`, creating parent directories as needed.
///
/// The file is written to a sibling temp file first and renamed into place.
pub fn write_file(document: &Document, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context(format!(
            "Failed to create output directory: {}",
            parent.display()
        ))?;
    }

    let json = to_json_pretty(document)?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json).context(format!(
        "Failed to write temp file: {}",
        temp_path.display()
    ))?;
    fs::rename(&temp_path, path).context(format!(
        "Failed to rename temp file to: {}",
        path.display()
    ))?;

    info!(path = %path.display(), rules = document.len(), "document written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, FromModifiers, Rule, Trigger};
    use tempfile::TempDir;

    fn document() -> Document {
        let mut rule = Rule::new(Trigger::key("q", FromModifiers::any()));
        rule.to.push(Action::key("quote"));
        Document::new("Test", vec![rule])
    }

    #[test]
    fn test_two_space_indentation() {
        let json = to_json_pretty(&document()).unwrap();
        assert!(json.starts_with("{\n  \"title\": \"Test\",\n  \"manipulators\": ["));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_output_is_deterministic() {
        assert_eq!(
            to_json_pretty(&document()).unwrap(),
            to_json_pretty(&document()).unwrap()
        );
    }

    #[test]
    fn test_write_to_buffer() {
        let mut buffer = Vec::new();
        write_to(&document(), &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["manipulators"][0]["to"][0]["key_code"], "quote");
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("keymap.json");

        write_file(&document(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_json_pretty(&document()).unwrap());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
