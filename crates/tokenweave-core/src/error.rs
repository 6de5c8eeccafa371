// ABOUTME: Error types for reading, transforming and writing token sources
// ABOUTME: Every variant carries the file or token path that caused it

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TokenError>;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected document shape in {path}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    #[error("Missing token '{token}' in {path}")]
    MissingToken { path: PathBuf, token: String },

    #[error("Invalid skip pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl TokenError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid_document<S: Into<String>>(path: &Path, reason: S) -> Self {
        Self::InvalidDocument {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn missing_token<S: Into<String>>(path: &Path, token: S) -> Self {
        Self::MissingToken {
            path: path.to_path_buf(),
            token: token.into(),
        }
    }

    /// Whether the error comes from the filesystem rather than document content
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_file() {
        let err = TokenError::missing_token(Path::new("legacy/Light.json"), "HI.brand3.4");
        assert_eq!(
            err.to_string(),
            "Missing token 'HI.brand3.4' in legacy/Light.json"
        );
        assert!(!err.is_io());

        let io = TokenError::read(
            Path::new("x.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(io.is_io());
        assert!(io.to_string().starts_with("Failed to read x.json"));
    }
}
