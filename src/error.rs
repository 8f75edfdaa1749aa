//! # Error Handling
//!
//! This module defines the centralized error type for `component-index`. It
//! uses `thiserror` to describe every failure the pipeline can hit, with
//! enough context (line numbers, library ids, paths, URLs) to point at the
//! offending manifest entry or repository.
//!
//! Every variant is fatal to a build run. The only non-fatal condition in the
//! pipeline, a non-core library without a descriptor file, is reported as a
//! log warning and never becomes an `Error`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for component-index operations
#[derive(Error, Debug)]
pub enum Error {
    /// A manifest line is not a valid JSON object.
    #[error("Manifest parse error at line {line}: {message}")]
    ManifestParse { line: usize, message: String },

    /// A manifest entry lacks a field the pipeline needs.
    ///
    /// `entry` is the library id when known, otherwise the line number.
    #[error("Manifest entry {entry} is missing required field '{field}'")]
    MissingField { entry: String, field: &'static str },

    /// An error occurred while cloning a Git repository.
    #[error("Git clone error for {url}@{r#ref}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        r#ref: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A core entry has no `path` pointing at its library directory.
    #[error("[{library_id}] core entry is missing 'path' in manifest")]
    CorePathMissing { library_id: String },

    /// A core entry's `path` does not exist inside the shared clone.
    #[error("[{library_id}] core lib path not found: {}", path.display())]
    CoreLibraryNotFound { library_id: String, path: PathBuf },

    /// A core library has no descriptor file.
    #[error("[{library_id}] core pyproject.toml is required at: {}", path.display())]
    CoreDescriptorNotFound { library_id: String, path: PathBuf },

    /// Neither the manifest nor `[tool.xircuits]` names a default example.
    #[error("[{library_id}] core default_example_path is required (manifest or [tool.xircuits])")]
    DefaultExamplePathMissing { library_id: String },

    /// A located descriptor file is not valid TOML or has mistyped fields.
    #[error("Descriptor parse error in {}: {message}", path.display())]
    DescriptorParse { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_manifest_parse() {
        let error = Error::ManifestParse {
            line: 3,
            message: "expected value".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("line 3"));
        assert!(display.contains("expected value"));
    }

    #[test]
    fn test_error_display_missing_field() {
        let error = Error::MissingField {
            entry: "line 7".to_string(),
            field: "url",
        };
        let display = format!("{}", error);
        assert!(display.contains("line 7"));
        assert!(display.contains("'url'"));
    }

    #[test]
    fn test_error_display_git_clone() {
        let error = Error::GitClone {
            url: "https://github.com/test/repo.git".to_string(),
            r#ref: "main".to_string(),
            message: "Remote branch main not found".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(display.contains("Git clone error"));
        assert!(display.contains("https://github.com/test/repo.git@main"));
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_git_clone_with_hint() {
        let error = Error::GitClone {
            url: "https://github.com/test/repo.git".to_string(),
            r#ref: "main".to_string(),
            message: "Authentication failed".to_string(),
            hint: Some("Check SSH keys".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("hint:"));
        assert!(display.contains("Check SSH keys"));
    }

    #[test]
    fn test_error_display_core_errors() {
        let missing = Error::CorePathMissing {
            library_id: "CORE_LIB".to_string(),
        };
        assert!(missing.to_string().contains("[CORE_LIB]"));
        assert!(missing.to_string().contains("'path'"));

        let not_found = Error::CoreDescriptorNotFound {
            library_id: "CORE_LIB".to_string(),
            path: PathBuf::from("clones/core/lib/pyproject.toml"),
        };
        assert!(not_found
            .to_string()
            .contains("clones/core/lib/pyproject.toml"));

        let example = Error::DefaultExamplePathMissing {
            library_id: "CORE_LIB".to_string(),
        };
        assert!(example.to_string().contains("[tool.xircuits]"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(error.to_string().contains("JSON serialization error"));
    }
}
