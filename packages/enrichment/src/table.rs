//! Enrichment table: segmented rows plus collaborator results.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use regtext_segmenter::RecordRow;
use serde::{Deserialize, Serialize};

use crate::error::{EnrichmentError, Result};

/// One segmented row with its enrichment results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnrichedRow {
    #[serde(flatten)]
    pub record: RecordRow,
    /// Spellchecked body. Absent until the spellcheck call succeeds.
    #[serde(default)]
    pub corrected_body: Option<String>,
    /// Embedding of the corrected row. Absent until the embedding call succeeds.
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

impl EnrichedRow {
    pub fn new(record: RecordRow) -> Self {
        Self {
            record,
            corrected_body: None,
            embedding: None,
        }
    }

    /// Whether both results are present.
    pub fn is_complete(&self) -> bool {
        self.corrected_body.is_some() && self.embedding.is_some()
    }
}

/// YAML record set written by the segmenter.
#[derive(Deserialize)]
struct RecordSet {
    records: Vec<RecordRow>,
}

/// Rows being enriched, persisted as a JSON checkpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentTable {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub rows: Vec<EnrichedRow>,
}

impl EnrichmentTable {
    pub fn from_rows(rows: Vec<RecordRow>) -> Self {
        Self {
            source: None,
            updated_at: None,
            rows: rows.into_iter().map(EnrichedRow::new).collect(),
        }
    }

    /// Read segmenter output: a YAML record set or a JSON array of rows.
    pub fn from_record_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let rows = match extension.as_str() {
            "yaml" | "yml" => serde_yaml_ng::from_str::<RecordSet>(&content)?.records,
            "json" => serde_json::from_str::<Vec<RecordRow>>(&content)?,
            other => {
                return Err(EnrichmentError::InvalidInput(format!(
                    "unsupported record file extension '{other}' for {}",
                    path.display()
                )))
            }
        };

        let mut table = Self::from_rows(rows);
        table.source = Some(path.display().to_string());
        Ok(table)
    }

    /// Load a checkpoint written by [`EnrichmentTable::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the table as a JSON checkpoint.
    ///
    /// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.updated_at = Some(Utc::now());
        let content = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "enrichment".to_string());
        let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

        {
            let mut file = File::create(&temp_file)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(path)?;
        }

        fs::rename(&temp_file, path)?;
        Ok(())
    }

    /// Index of the first row lacking a result.
    pub fn first_missing(&self) -> Option<usize> {
        self.rows.iter().position(|row| !row.is_complete())
    }

    /// Number of rows with both results present.
    pub fn completed(&self) -> usize {
        self.rows.iter().filter(|row| row.is_complete()).count()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
