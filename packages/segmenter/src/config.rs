//! Configuration constants and validation functions for the segmenter.

use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SegmenterError};

/// Minimum token length (in characters) for a token to count as a word.
pub const MIN_WORD_LEN: usize = 3;

/// Separator used when joining heading labels into a full label path.
pub const LABEL_SEPARATOR: &str = " > ";

/// Prefix of the label stored in the footnote slot.
pub const FOOTNOTE_LABEL_PREFIX: &str = "Footnote";

/// Abbreviations whose trailing period never ends a paragraph.
pub const NON_TERMINAL_ABBREVIATIONS: &[&str] = &["e.g.", "i.e."];

/// Supported serialization formats for the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML document with a header and a `records` sequence.
    #[default]
    Yaml,
    /// Pretty-printed JSON array of rows.
    Json,
}

impl OutputFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SegmenterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(SegmenterError::UnknownFormat(s.to_string())),
        }
    }
}

/// Validate that the input path points to an existing regular file.
///
/// # Examples
/// ```
/// use regtext_segmenter::config::validate_input_path;
///
/// assert!(validate_input_path(std::path::Path::new("does/not/exist.txt")).is_err());
/// ```
pub fn validate_input_path(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(SegmenterError::InputNotFound(path.to_path_buf()))
    }
}

/// Validate that the output path can be written: its parent directory must
/// exist and the path itself must not be a directory.
pub fn validate_output_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(SegmenterError::InvalidOutput {
            path: path.to_path_buf(),
            reason: "path is a directory".to_string(),
        });
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(SegmenterError::InvalidOutput {
                path: path.to_path_buf(),
                reason: "parent directory does not exist".to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Build the default output path next to the input file.
///
/// # Examples
/// ```
/// use regtext_segmenter::config::{default_output_path, OutputFormat};
/// use std::path::Path;
///
/// let out = default_output_path(Path::new("docs/regulation.txt"), OutputFormat::Json);
/// assert_eq!(out, Path::new("docs/regulation.records.json"));
/// ```
pub fn default_output_path(input: &Path, format: OutputFormat) -> std::path::PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records".to_string());
    input.with_file_name(format!("{stem}.records.{}", format.extension()))
}
