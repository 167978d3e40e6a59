//! Record construction and the body-derived record fields.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::MIN_WORD_LEN;
use crate::types::{HeadingLabels, Level, Record};

/// Body opening with a digit and closing with a period.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGIT_TO_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\d.*\.$").expect("valid regex"));

/// Body opening with a digit and closing with a two-part numeral.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGIT_TO_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\d.*\d+\.\d+$").expect("valid regex"));

/// Body opening with the word "Table".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TABLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Table\b").expect("valid regex"));

/// Inline footnote reference: lowercase letter or punctuation, then digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FOOTNOTE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-z.,;:!?)\]"'”’])(\d{1,3})\b"#).expect("valid regex")
});

/// Count tokens of at least [`MIN_WORD_LEN`] characters.
///
/// # Examples
/// ```
/// use regtext_segmenter::assembly::word_count;
///
/// assert_eq!(word_count("This section explains scope."), 4);
/// assert_eq!(word_count("a of to the"), 1);
/// ```
#[must_use]
pub fn word_count(body: &str) -> usize {
    body.split_whitespace()
        .filter(|token| token.chars().count() >= MIN_WORD_LEN)
        .count()
}

/// Whether the body has the shape of numeric or tabular content.
#[must_use]
pub fn detect_no_fault(body: &str) -> bool {
    DIGIT_TO_PERIOD.is_match(body) || DIGIT_TO_DECIMAL.is_match(body) || TABLE_PREFIX.is_match(body)
}

/// Extract inline footnote reference numbers such as the `3` in "verify3."
///
/// A reference after a period or comma that itself follows a digit is part
/// of a number ("3.2", "1,000") and is skipped.
#[must_use]
pub fn extract_footnote_ids(body: &str) -> Vec<u32> {
    FOOTNOTE_REFERENCE
        .captures_iter(body)
        .filter_map(|caps| {
            let lead = caps.get(1)?;
            let digits = caps.get(2)?;
            let numeric_context = matches!(lead.as_str(), "." | "," | ":")
                && body[..lead.start()]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_ascii_digit());
            if numeric_context {
                return None;
            }
            digits.as_str().parse().ok()
        })
        .collect()
}

impl Record {
    /// Build a record from its labels and body, deriving the remaining fields.
    #[must_use]
    pub fn new(labels: HeadingLabels, body: impl Into<String>, source_index: usize) -> Self {
        let body = body.into().trim().to_string();
        let footnote_ids = extract_footnote_ids(&body);
        Self::assemble(labels, body, footnote_ids, source_index)
    }

    /// Build a record from buffered paragraph lines joined with single spaces.
    ///
    /// Returns `None` for an empty paragraph.
    #[must_use]
    pub fn from_lines(labels: &HeadingLabels, lines: &[String], source_index: usize) -> Option<Self> {
        let body = lines.join(" ");
        if body.trim().is_empty() {
            return None;
        }
        Some(Self::new(labels.clone(), body, source_index))
    }

    /// Build a replacement record with new text, keeping the footnote
    /// references and source position of this one.
    #[must_use]
    pub fn with_text(&self, labels: HeadingLabels, body: String) -> Self {
        Self::assemble(labels, body, self.footnote_ids.clone(), self.source_index)
    }

    /// Recompute the shape flag from the current body.
    #[must_use]
    pub fn refreshed(self) -> Self {
        Self {
            no_fault_detected: detect_no_fault(&self.body),
            ..self
        }
    }

    fn assemble(
        labels: HeadingLabels,
        body: String,
        footnote_ids: Vec<u32>,
        source_index: usize,
    ) -> Self {
        Self {
            footnote_flag: labels.get(Level::Footnote).is_some(),
            word_count: word_count(&body),
            no_fault_detected: detect_no_fault(&body),
            footnote_ids,
            labels,
            body,
            source_index,
        }
    }
}
