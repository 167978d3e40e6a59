//! Repair of paragraphs broken by removed page boilerplate.
//!
//! When a page footer is stripped from the extracted text, the paragraph it
//! interrupted comes out as two records. The only trace left is a gap in the
//! source positions, so a record is glued back onto its predecessor when
//! there is such a gap and both sit under the same headings.

use crate::types::Record;

/// Whether `record` continues `previous` across a removed boilerplate block.
///
/// `previous_index` is the source index of the record directly before
/// `record` in the input, which differs from `previous.source_index` once
/// `previous` itself absorbed a merge.
#[must_use]
pub fn continues(previous: &Record, previous_index: usize, record: &Record) -> bool {
    let starts_with_digit = record.body.chars().next().is_some_and(|c| c.is_ascii_digit());
    let has_gap = record.source_index != previous_index + 1;

    !starts_with_digit && has_gap && record.join_key() == previous.join_key()
}

/// Merge broken paragraphs in a body-record sequence.
///
/// Bodies are concatenated without a separator. Every surviving record has
/// its shape flag recomputed afterwards.
#[must_use]
pub fn merge_broken_paragraphs(records: Vec<Record>) -> Vec<Record> {
    let input_len = records.len();
    let mut merged: Vec<Record> = Vec::with_capacity(input_len);
    let mut previous_index: Option<usize> = None;

    for record in records {
        let source_index = record.source_index;
        let joins = match (merged.last(), previous_index) {
            (Some(pending), Some(index)) => continues(pending, index, &record),
            _ => false,
        };

        match merged.last_mut() {
            Some(pending) if joins => {
                tracing::debug!(
                    into = pending.source_index,
                    from = source_index,
                    "Merging broken paragraph"
                );
                let body = format!("{}{}", pending.body, record.body);
                *pending = Record::new(pending.labels.clone(), body, pending.source_index);
            }
            _ => merged.push(record),
        }
        previous_index = Some(source_index);
    }

    tracing::info!(
        before = input_len,
        after = merged.len(),
        "Merged broken paragraphs"
    );

    merged.into_iter().map(Record::refreshed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HeadingLabels, Level};
    use pretty_assertions::assert_eq;

    fn scope() -> HeadingLabels {
        HeadingLabels::new()
            .with(Level::Section, "OVERVIEW")
            .with(Level::Subsection, "Scope")
    }

    fn record(labels: HeadingLabels, body: &str, index: usize) -> Record {
        Record::new(labels, body, index)
    }

    #[test]
    fn test_gap_with_same_key_merges() {
        let records = vec![
            record(scope(), "The authority shall publish the", 0),
            record(scope(), "annual report.", 2),
        ];

        let merged = merge_broken_paragraphs(records);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].body, "The authority shall publish theannual report.");
        assert_eq!(merged[0].source_index, 0);
        assert_eq!(merged[0].word_count, 6);
    }

    #[test]
    fn test_adjacent_records_never_merge() {
        let records = vec![
            record(scope(), "The authority shall publish the", 0),
            record(scope(), "annual report.", 1),
        ];
        assert_eq!(merge_broken_paragraphs(records).len(), 2);
    }

    #[test]
    fn test_different_key_does_not_merge() {
        let other = scope().with(Level::Subsection, "Definitions");
        let records = vec![
            record(scope(), "The authority shall publish the", 0),
            record(other, "annual report.", 3),
        ];
        assert_eq!(merge_broken_paragraphs(records).len(), 2);
    }

    #[test]
    fn test_leading_digit_does_not_merge() {
        let records = vec![
            record(scope(), "The thresholds are", 0),
            record(scope(), "2 percent and 5 percent.", 4),
        ];
        assert_eq!(merge_broken_paragraphs(records).len(), 2);
    }

    #[test]
    fn test_title_label_is_not_part_of_key() {
        let titled = scope().with(Level::Title, "REGULATION");
        let untitled = scope();
        let records = vec![
            record(titled, "Text continues", 0),
            record(untitled, "on the next page.", 5),
        ];
        assert_eq!(merge_broken_paragraphs(records).len(), 1);
    }

    #[test]
    fn test_chain_compares_against_raw_predecessor() {
        let records = vec![
            record(scope(), "First part", 0),
            record(scope(), "second part", 2),
            record(scope(), "Separate paragraph.", 3),
        ];

        let merged = merge_broken_paragraphs(records);
        let bodies: Vec<&str> = merged.iter().map(|r| r.body.as_str()).collect();
        assert_eq!(bodies, vec!["First partsecond part", "Separate paragraph."]);
    }

    #[test]
    fn test_merge_recomputes_derived_fields() {
        let records = vec![
            record(scope(), "3 Member States shall", 0),
            record(scope(), "report annually.", 2),
        ];

        let merged = merge_broken_paragraphs(records);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].no_fault_detected);
    }

    #[test]
    fn test_empty_and_single_inputs() {
        assert!(merge_broken_paragraphs(Vec::new()).is_empty());
        assert_eq!(
            merge_broken_paragraphs(vec![record(scope(), "only one", 7)]).len(),
            1
        );
    }
}
