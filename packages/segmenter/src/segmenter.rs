//! Segmentation pipeline.
//!
//! Lines are assembled into records, footnote records are set aside while
//! broken paragraphs are merged, the text is normalized and the footnotes are
//! appended after the body records.

use std::fs;
use std::path::Path;

use crate::assembly::ParagraphAssembler;
use crate::config::validate_input_path;
use crate::error::Result;
use crate::footnotes::Partition;
use crate::merge::merge_broken_paragraphs;
use crate::normalize::TextNormalizer;
use crate::types::Document;

/// Optional pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Run the broken-paragraph merge pass.
    pub merge: bool,
    /// Run the text normalizer.
    pub normalize: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            merge: true,
            normalize: true,
        }
    }
}

/// Configured pipeline.
#[derive(Default)]
pub struct Segmenter {
    assembler: ParagraphAssembler,
    normalizer: TextNormalizer,
    options: SegmentOptions,
}

impl Segmenter {
    /// Create a pipeline with the default components.
    #[must_use]
    pub fn new(options: SegmentOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replace the text normalizer.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Segment a sequence of extracted lines.
    #[must_use]
    pub fn segment_lines(&self, lines: &[String]) -> Document {
        let records = self.assembler.assemble(lines);
        let assembled = records.len();

        let mut partition = Partition::split(records);
        if self.options.merge {
            partition = partition.map_body(merge_broken_paragraphs);
        }
        if self.options.normalize {
            partition = Partition {
                body: self.normalizer.normalize_records(partition.body),
                footnotes: self.normalizer.normalize_records(partition.footnotes),
            };
        }

        tracing::info!(
            lines = lines.len(),
            assembled,
            body = partition.body.len(),
            footnotes = partition.footnotes.len(),
            "Segmented document"
        );

        Document::new(partition.reattach())
    }

    /// Segment a block of text, one line per input line.
    #[must_use]
    pub fn segment_text(&self, text: &str) -> Document {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        self.segment_lines(&lines)
    }

    /// Read and segment a text file.
    pub fn segment_file(&self, path: &Path) -> Result<Document> {
        validate_input_path(path)?;
        let text = fs::read_to_string(path)?;
        Ok(self.segment_text(&text))
    }
}

/// Segment text with the default pipeline.
///
/// # Examples
/// ```
/// use regtext_segmenter::segment_text;
///
/// let document = segment_text("3 OVERVIEW\n\n3.1 Scope\nThis section explains scope.\n");
/// assert_eq!(document.len(), 1);
/// assert_eq!(document.records[0].full_label(), "OVERVIEW > Scope");
/// ```
#[must_use]
pub fn segment_text(text: &str) -> Document {
    Segmenter::default().segment_text(text)
}

/// Read and segment a file with the default pipeline.
pub fn segment_file(path: &Path) -> Result<Document> {
    Segmenter::default().segment_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Level;
    use pretty_assertions::assert_eq;

    const BROKEN: &str = "\
3 OVERVIEW

3.1 Scope
The competent authority shall publish the

annual report.
";

    #[test]
    fn test_empty_text() {
        assert!(segment_text("").is_empty());
    }

    #[test]
    fn test_footnotes_follow_body_records() {
        let text = "\
3 OVERVIEW
3.1 Scope
Institutions must report annually1.

1  Competent authorities must verify.

3.2 Definitions
Reporting continues here.
";
        let document = segment_text(text);
        let flags: Vec<bool> = document.records.iter().map(|r| r.footnote_flag).collect();
        assert_eq!(flags, vec![false, false, true]);
        assert_eq!(
            document.records[2].labels.get(Level::Footnote),
            Some("Footnote 1")
        );
        assert_eq!(document.records[0].footnote_ids, vec![1]);
    }

    #[test]
    fn test_footnote_continuation_stays_with_footnote() {
        let text = "\
3 OVERVIEW
3.1 Scope
The competent authority shall publish the

7  Directive 2013/36/EU.

annual report.
";
        let document = segment_text(text);
        let summary: Vec<(bool, &str)> = document
            .records
            .iter()
            .map(|r| (r.footnote_flag, r.body.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (false, "The competent authority shall publish the"),
                (true, "Directive 2013/36/EU."),
                (true, "annual report."),
            ]
        );
    }

    #[test]
    fn test_no_merge_option() {
        let segmenter = Segmenter::new(SegmentOptions {
            merge: false,
            normalize: true,
        });
        let document = segmenter.segment_text(BROKEN);
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn test_adjacent_paragraphs_not_merged() {
        // Without a removed record between them there is no gap.
        let document = segment_text(BROKEN);
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn test_normalize_option() {
        let text = "The regulato ry  cycle5 applies.";
        assert_eq!(
            segment_text(text).records[0].body,
            "The regulatory cycle 5 applies."
        );

        let raw = Segmenter::new(SegmentOptions {
            merge: true,
            normalize: false,
        })
        .segment_text(text);
        assert_eq!(raw.records[0].body, "The regulato ry  cycle5 applies.");
    }

    #[test]
    fn test_segment_file_missing() {
        assert!(segment_file(Path::new("/nonexistent/input.txt")).is_err());
    }
}
