//! Error types for the segmenter.
//!
//! The parsing stages themselves never fail: every line resolves to some
//! classification. Errors only arise at the edges, when reading input or
//! writing the record set.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the segmenter library.
#[derive(Debug, Error)]
pub enum SegmenterError {
    /// Input file does not exist or is not a regular file.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Output location is unusable.
    #[error("Invalid output path '{}': {reason}", .path.display())]
    InvalidOutput { path: PathBuf, reason: String },

    /// Unknown output format requested.
    #[error("Unknown output format: '{0}'. Expected 'yaml' or 'json'")]
    UnknownFormat(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// Result type alias for segmenter operations.
pub type Result<T> = std::result::Result<T, SegmenterError>;
