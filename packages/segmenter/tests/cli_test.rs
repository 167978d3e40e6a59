//! Tests for the command-line binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use regtext_segmenter::RecordRow;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("regulation")
        .join("input.txt")
}

fn segmenter() -> Command {
    Command::cargo_bin("regtext-segmenter").unwrap()
}

#[test]
fn test_segment_writes_json() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("records.json");

    segmenter()
        .arg("segment")
        .arg(fixture_path())
        .arg("--output")
        .arg(&output)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Records: 13"))
        .stdout(predicate::str::contains("Saved to:"));

    let rows: Vec<RecordRow> = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(rows.len(), 13);
    assert_eq!(rows[8].body, "This section explains scope.");
}

#[test]
fn test_segment_writes_yaml_by_default() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("records.yaml");

    segmenter()
        .args(["segment", "--no-merge"])
        .arg(fixture_path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("---\n"));
    assert!(content.contains("record_count: 13"));
}

#[test]
fn test_segment_missing_input_fails() {
    segmenter()
        .args(["segment", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Input file not found"));
}

#[test]
fn test_segment_unknown_format_fails() {
    segmenter()
        .arg("segment")
        .arg(fixture_path())
        .args(["--format", "xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown output format"));
}

#[test]
fn test_classify_prints_trace() {
    segmenter()
        .arg("classify")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sub-heading"))
        .stdout(predicate::str::contains("orphan-footnote"))
        .stdout(predicate::str::contains("subsub-heading"));
}
