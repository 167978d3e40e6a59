//! Regulation text segmenter - Split PDF-extracted regulation text into
//! labelled paragraph records.
//!
//! Extracted text arrives as a flat sequence of lines. This crate recovers
//! the heading hierarchy, reassembles paragraphs, separates footnotes,
//! repairs paragraphs broken by removed page boilerplate and normalizes
//! common extraction artifacts.
//!
//! # Example
//!
//! ```
//! use regtext_segmenter::segment_text;
//! use regtext_segmenter::types::Level;
//!
//! let document = segment_text("3 OVERVIEW\n\n3.1 Scope\nThis section explains scope.");
//! let record = &document.records[0];
//!
//! assert_eq!(record.labels.get(Level::Section), Some("OVERVIEW"));
//! assert_eq!(record.labels.get(Level::Subsection), Some("Scope"));
//! assert_eq!(record.word_count, 4);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, output format and path validation
//! - [`types`]: Heading labels, records and documents
//! - [`error`]: Error types and Result alias
//! - [`numbering`]: Heading numeral continuity checks
//! - [`classify`]: Rule-based line classification
//! - [`assembly`]: Paragraph assembly and record construction
//! - [`footnotes`]: Footnote separation
//! - [`merge`]: Broken paragraph repair
//! - [`normalize`]: Text normalization
//! - [`output`]: YAML and JSON record set output
//! - [`segmenter`]: The full pipeline
//! - [`cli`]: Command-line interface

pub mod assembly;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod footnotes;
pub mod merge;
pub mod normalize;
pub mod numbering;
pub mod output;
pub mod segmenter;
pub mod types;

// Re-export the pipeline entry points
pub use segmenter::{segment_file, segment_text, SegmentOptions, Segmenter};

// Re-export commonly used items
pub use error::{Result, SegmenterError};
pub use output::RecordRow;
pub use types::{Document, HeadingLabels, Level, Record};
