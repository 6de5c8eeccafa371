// ABOUTME: File helpers for JSON token trees and CSS text
// ABOUTME: Writes are pretty-printed with two-space indent and a trailing newline

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokenweave_types::TokenTree;

use crate::error::{Result, TokenError};

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| TokenError::read(path, e))
}

/// Read and deserialize a JSON document
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| TokenError::json(path, e))
}

/// Read a JSON document whose root must be an object
pub fn read_tree(path: &Path) -> Result<TokenTree> {
    match read_json(path)? {
        serde_json::Value::Object(tree) => Ok(tree),
        _ => Err(TokenError::invalid_document(path, "root is not an object")),
    }
}

/// Write text, creating parent directories as needed
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TokenError::write(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| TokenError::write(path, e))
}

pub fn to_json_string<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Serialize as pretty JSON and write it
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = to_json_string(value).map_err(|e| TokenError::json(path, e))?;
    write_text(path, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_write_json_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("out.json");

        write_json(&path, &json!({"b": {"$type": "color"}, "a": 1})).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"b\": {\n    \"$type\": \"color\"\n  },\n  \"a\": 1\n}\n");
    }

    #[test]
    fn test_read_tree_rejects_non_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("list.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = read_tree(&path).unwrap_err();
        assert!(matches!(err, TokenError::InvalidDocument { .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_tree(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_read_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_tree(&path), Err(TokenError::Json { .. })));
    }
}
