//! Core data types for the segmenter.
//!
//! A parsed document is an ordered list of immutable [`Record`]s, each
//! carrying a snapshot of the heading context it appeared under.

use serde::{Deserialize, Serialize};

use crate::config::{FOOTNOTE_LABEL_PREFIX, LABEL_SEPARATOR};

/// Slots of the heading label stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Un-numbered document or part title.
    Title = 0,
    /// Numbered main section ("3 OVERVIEW").
    Section = 1,
    /// Two-part numbered heading ("3.1 Scope").
    Subsection = 2,
    /// Three-part numbered heading ("3.1.2 Exemptions").
    Subsubsection = 3,
    /// Reserved for a deeper heading rule.
    Deep = 4,
    /// Footnote tag ("Footnote 12").
    Footnote = 5,
}

impl Level {
    /// All levels, shallowest first.
    pub const ALL: [Level; 6] = [
        Level::Title,
        Level::Section,
        Level::Subsection,
        Level::Subsubsection,
        Level::Deep,
        Level::Footnote,
    ];

    /// Slot index of this level.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The six-slot heading label stack, `Level0..Level5`.
///
/// Setting a level clears every deeper level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingLabels([Option<String>; 6]);

impl HeadingLabels {
    /// Create an empty label stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the label at a level.
    #[must_use]
    pub fn get(&self, level: Level) -> Option<&str> {
        self.0[level.index()].as_deref()
    }

    /// Return a copy with `level` set and all deeper levels cleared.
    #[must_use]
    pub fn with(&self, level: Level, value: impl Into<String>) -> Self {
        let mut slots = self.0.clone();
        slots[level.index()] = Some(value.into());
        for slot in slots.iter_mut().skip(level.index() + 1) {
            *slot = None;
        }
        Self(slots)
    }

    /// Return a copy with the label text of each present level transformed.
    #[must_use]
    pub fn map_levels(&self, levels: &[Level], f: impl Fn(&str) -> String) -> Self {
        let mut slots = self.0.clone();
        for level in levels {
            if let Some(value) = slots[level.index()].as_mut() {
                *value = f(value);
            }
        }
        Self(slots)
    }

    /// Whether the footnote slot is set.
    #[must_use]
    pub fn is_footnote(&self) -> bool {
        self.get(Level::Footnote).is_some()
    }

    /// Build the full label path from `Level0..Level3`, skipping empty slots.
    ///
    /// # Examples
    /// ```
    /// use regtext_segmenter::types::{HeadingLabels, Level};
    ///
    /// let labels = HeadingLabels::new()
    ///     .with(Level::Section, "OVERVIEW")
    ///     .with(Level::Subsection, "Scope");
    /// assert_eq!(labels.full_label(), "OVERVIEW > Scope");
    /// ```
    #[must_use]
    pub fn full_label(&self) -> String {
        self.0[..=Level::Subsubsection.index()]
            .iter()
            .filter_map(|slot| slot.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(LABEL_SEPARATOR)
    }

    /// Concatenation of `Level1..Level3`, missing labels rendered empty.
    #[must_use]
    pub fn join_key(&self) -> String {
        [Level::Section, Level::Subsection, Level::Subsubsection]
            .iter()
            .map(|level| self.get(*level).unwrap_or(""))
            .collect()
    }
}

/// Format the label stored in the footnote slot.
#[must_use]
pub fn footnote_label(id: u32) -> String {
    format!("{FOOTNOTE_LABEL_PREFIX} {id}")
}

/// One assembled paragraph with its heading context.
///
/// Records are never mutated after construction; later stages build new
/// records instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Heading context snapshot.
    pub labels: HeadingLabels,

    /// Paragraph text.
    pub body: String,

    /// Number of tokens of at least three characters.
    pub word_count: usize,

    /// Whether the body looks like numeric or tabular content.
    pub no_fault_detected: bool,

    /// Whether the record sits under a footnote label.
    pub footnote_flag: bool,

    /// Inline footnote reference numbers found in the body.
    pub footnote_ids: Vec<u32>,

    /// Position in the record sequence as first assembled.
    pub source_index: usize,
}

impl Record {
    /// Full label path of this record.
    #[must_use]
    pub fn full_label(&self) -> String {
        self.labels.full_label()
    }

    /// Key used to test paragraph continuity across records.
    #[must_use]
    pub fn join_key(&self) -> String {
        self.labels.join_key()
    }
}

/// An ordered sequence of records: body records first, then footnotes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Records in output order.
    pub records: Vec<Record>,
}

impl Document {
    /// Create a document from records in output order.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the document has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records with their 1-based display index.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.records.iter().enumerate().map(|(i, r)| (i + 1, r))
    }

    /// Records outside the footnote partition.
    pub fn body_records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| !r.footnote_flag)
    }

    /// Records in the footnote partition.
    pub fn footnote_records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| r.footnote_flag)
    }
}
