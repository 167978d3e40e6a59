//! Text normalization for extraction artifacts.
//!
//! PDF extraction splits words at line-break hyphenation points, doubles
//! spaces and glues inline reference numbers onto words. The fixes here are
//! a closed, hand-curated correction table applied in order, followed by a
//! letter/digit separation rule.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::types::{Level, Record};

/// Letter immediately followed by a digit, as in "cycle5".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LETTER_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{Alphabetic})(\d)").expect("valid regex"));

/// Run of two or more spaces.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Ordered literal replacements. Later entries see the output of earlier ones.
pub const REPLACEMENTS: &[(&str, &str)] = &[
    ("\t", " "),
    ("  ", " "),
    (" ,", ","),
    ("( ", "("),
    (" )", ")"),
    ("regulato ry", "regulatory"),
    ("Regula tion", "Regulation"),
    ("regula tion", "regulation"),
    ("Direc tive", "Directive"),
    ("institu tion", "institution"),
    ("supervi sory", "supervisory"),
    ("author ities", "authorities"),
    ("require ments", "requirements"),
    ("Mem ber", "Member"),
    ("compe tent", "competent"),
    ("informa tion", "information"),
    ("pro vided", "provided"),
    ("appli cation", "application"),
];

/// Label levels that are normalized along with the body.
pub const NORMALIZED_LEVELS: &[Level] = &[Level::Title, Level::Section, Level::Subsection];

/// Upper bound on passes, guarding against a custom table that cycles.
const MAX_PASSES: usize = 16;

/// Deterministic text corrector.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    replacements: Vec<(String, String)>,
}

impl TextNormalizer {
    /// Create a normalizer with a custom replacement table.
    #[must_use]
    pub fn new(replacements: Vec<(String, String)>) -> Self {
        Self { replacements }
    }

    /// Normalize a piece of text.
    ///
    /// The result is a fixed point: normalizing it again returns it
    /// unchanged.
    ///
    /// # Examples
    /// ```
    /// use regtext_segmenter::normalize::TextNormalizer;
    ///
    /// let normalizer = TextNormalizer::default();
    /// assert_eq!(
    ///     normalizer.normalize("the regulato ry  reporting cycle5"),
    ///     "the regulatory reporting cycle 5"
    /// );
    /// ```
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let mut result: String = text.nfkc().collect();
        for _ in 0..MAX_PASSES {
            let next = self.pass(&result);
            if next == result {
                break;
            }
            result = next;
        }
        result.trim().to_string()
    }

    /// Normalize the body and the upper label levels of a record.
    ///
    /// Footnote references stay as they were extracted from the raw body.
    #[must_use]
    pub fn normalize_record(&self, record: &Record) -> Record {
        let labels = record
            .labels
            .map_levels(NORMALIZED_LEVELS, |label| self.normalize(label));
        record.with_text(labels, self.normalize(&record.body))
    }

    /// Normalize every record.
    #[must_use]
    pub fn normalize_records(&self, records: Vec<Record>) -> Vec<Record> {
        records.iter().map(|r| self.normalize_record(r)).collect()
    }

    fn pass(&self, text: &str) -> String {
        let replaced = self
            .replacements
            .iter()
            .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to));
        let collapsed = SPACE_RUN.replace_all(&replaced, " ");
        LETTER_DIGIT.replace_all(&collapsed, "$1 $2").into_owned()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(
            REPLACEMENTS
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
        )
    }
}
