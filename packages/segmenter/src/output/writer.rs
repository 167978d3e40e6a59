//! YAML and JSON writers for the record set.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::rows::{generate_rows, RecordRow};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::types::Document;

/// YAML document layout: a small header followed by the rows.
#[derive(Debug, Serialize)]
struct YamlRecordSet<'a> {
    source: &'a str,
    record_count: usize,
    generated_at: String,
    records: Vec<RecordRow>,
}

/// Indent YAML sequences so items sit under their parent key.
///
/// serde_yaml_ng places sequence items (`- `) at the same indent as their
/// parent key:
///
/// ```yaml
/// # Before:          # After:
/// records:           records:
/// - Index: 1           - Index: 1
///   Body: foo            Body: foo
/// ```
fn indent_yaml_sequences(yaml: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut seq_indents: Vec<usize> = Vec::new();

    for line in yaml.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            result.push(line.to_string());
            continue;
        }

        let indent = line.len() - trimmed.len();

        // Leave sequences we have dedented out of.
        while let Some(&seq_indent) = seq_indents.last() {
            if indent < seq_indent || (indent == seq_indent && !trimmed.starts_with("- ")) {
                seq_indents.pop();
            } else {
                break;
            }
        }

        if trimmed.starts_with("- ") && seq_indents.last() != Some(&indent) {
            seq_indents.push(indent);
        }

        let extra = seq_indents.len() * 2;
        result.push(format!("{}{}", " ".repeat(indent + extra), trimmed));
    }

    result.join("\n")
}

/// Generate the YAML record set for a document.
pub fn generate_yaml(document: &Document, source: &str) -> Result<String> {
    let set = YamlRecordSet {
        source,
        record_count: document.len(),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        records: generate_rows(document),
    };
    let yaml = serde_yaml_ng::to_string(&set)?;
    let yaml = indent_yaml_sequences(&yaml);

    let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Generate the JSON record set: a pretty-printed array of rows.
pub fn generate_json(document: &Document) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&generate_rows(document))?;
    json.push('\n');
    Ok(json)
}

/// Write `content` to `path` through a temporary sibling file.
///
/// A crash mid-write leaves any existing file untouched.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records".to_string());
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

/// Save a document in the given format.
///
/// # Arguments
/// * `document` - The records to save
/// * `source` - Name of the input the records came from, stored in the YAML header
/// * `path` - Destination file
/// * `format` - Serialization format
///
/// # Returns
/// Path to the saved file
pub fn save(document: &Document, source: &str, path: &Path, format: OutputFormat) -> Result<PathBuf> {
    let content = match format {
        OutputFormat::Yaml => generate_yaml(document, source)?,
        OutputFormat::Json => generate_json(document)?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_atomic(path, &content)?;

    tracing::info!(path = %path.display(), records = document.len(), "Saved record set");
    Ok(path.to_path_buf())
}

/// Save a document as YAML.
pub fn save_yaml(document: &Document, source: &str, path: &Path) -> Result<PathBuf> {
    save(document, source, path, OutputFormat::Yaml)
}

/// Save a document as JSON.
pub fn save_json(document: &Document, path: &Path) -> Result<PathBuf> {
    save(document, "", path, OutputFormat::Json)
}
