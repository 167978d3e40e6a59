//! Tabular rows for the record set.

use serde::{Deserialize, Serialize};

use crate::types::{Document, Level, Record};

/// One output row. Field names are stable column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordRow {
    /// 1-based position in the output sequence.
    pub index: usize,
    pub level0: Option<String>,
    pub level1: Option<String>,
    pub level2: Option<String>,
    pub level3: Option<String>,
    pub level4: Option<String>,
    pub level5: Option<String>,
    pub full_label: String,
    pub body: String,
    pub word_count: usize,
    pub no_fault_detected: bool,
    pub footnote_flag: bool,
    #[serde(default)]
    pub footnote_ids: Vec<u32>,
}

impl RecordRow {
    /// Build the row for a record at a 1-based index.
    #[must_use]
    pub fn from_record(index: usize, record: &Record) -> Self {
        let level = |level: Level| record.labels.get(level).map(str::to_string);
        Self {
            index,
            level0: level(Level::Title),
            level1: level(Level::Section),
            level2: level(Level::Subsection),
            level3: level(Level::Subsubsection),
            level4: level(Level::Deep),
            level5: level(Level::Footnote),
            full_label: record.full_label(),
            body: record.body.clone(),
            word_count: record.word_count,
            no_fault_detected: record.no_fault_detected,
            footnote_flag: record.footnote_flag,
            footnote_ids: record.footnote_ids.clone(),
        }
    }
}

/// Turn a document into rows with a 1-based `Index` column.
#[must_use]
pub fn generate_rows(document: &Document) -> Vec<RecordRow> {
    document
        .indexed()
        .map(|(index, record)| RecordRow::from_record(index, record))
        .collect()
}
