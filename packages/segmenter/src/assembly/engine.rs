//! Paragraph assembly over a whole document.

use super::state::ParserState;
use crate::classify::{Classified, LineClassifier, LineCursor};
use crate::types::Record;

/// One classified line, as reported by [`ParagraphAssembler::trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// 1-based line number in the input.
    pub line_number: usize,

    /// Name of the rule that claimed the line.
    pub rule: &'static str,

    /// Classification kind, e.g. "SubHeading".
    pub kind: &'static str,

    /// Rendered classification.
    pub text: String,
}

/// Folds classified lines into records.
pub struct ParagraphAssembler {
    classifier: LineClassifier,
}

impl ParagraphAssembler {
    /// Create an assembler with a custom classifier.
    #[must_use]
    pub fn new(classifier: LineClassifier) -> Self {
        Self { classifier }
    }

    /// Assemble records from extracted lines.
    ///
    /// Every record carries its position in the output sequence as
    /// `source_index`.
    #[must_use]
    pub fn assemble(&self, lines: &[String]) -> Vec<Record> {
        let mut records = Vec::new();
        let finished = self
            .fold(lines, |_, _, step_records| records.extend(step_records))
            .finish();
        records.extend(finished.records);
        let final_state = finished.state;

        tracing::debug!(
            lines = lines.len(),
            records = records.len(),
            numbering = ?final_state.classifier.numbering,
            "Assembled records"
        );
        records
    }

    /// Classify every line without keeping the records.
    ///
    /// Lines absorbed into a preceding heading are not listed.
    #[must_use]
    pub fn trace(&self, lines: &[String]) -> Vec<TraceEntry> {
        let mut entries = Vec::new();
        self.fold(lines, |index, classified, _| {
            if index < lines.len() {
                entries.push(TraceEntry {
                    line_number: index + 1,
                    rule: classified.rule,
                    kind: classified.classification.kind(),
                    text: classified.classification.to_string(),
                });
            }
        });
        entries
    }

    /// Drive the state through every line plus a trailing blank sentinel
    /// that flushes the last paragraph.
    ///
    /// The returned state may still hold a numeral; call
    /// [`ParserState::finish`] to emit it.
    fn fold<F>(&self, lines: &[String], mut observe: F) -> ParserState
    where
        F: FnMut(usize, &Classified, Vec<Record>),
    {
        let mut padded = lines.to_vec();
        padded.push(String::new());

        (0..padded.len()).fold(ParserState::new(), |state, index| {
            if state.is_absorbed(index) {
                return state;
            }
            let cursor = LineCursor::new(&padded, index);
            let classified = self.classifier.classify(&cursor, &state.classifier);
            let seen = classified.clone();
            let step = state.advance(&cursor, classified);
            observe(index, &seen, step.records);
            step.state
        })
    }
}

impl Default for ParagraphAssembler {
    fn default() -> Self {
        Self::new(LineClassifier::default())
    }
}

/// Assemble records from lines with the default classifier.
#[must_use]
pub fn assemble_records(lines: &[String]) -> Vec<Record> {
    ParagraphAssembler::default().assemble(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Level;
    use pretty_assertions::assert_eq;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        assert!(assemble_records(&[]).is_empty());
        assert!(assemble_records(&lines(&["", "  ", ""])).is_empty());
    }

    #[test]
    fn test_overview_scope_paragraph() {
        let records = assemble_records(&lines(&[
            "3 OVERVIEW",
            "",
            "3.1 Scope",
            "This section explains scope.",
            "",
        ]));

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.labels.get(Level::Section), Some("OVERVIEW"));
        assert_eq!(record.labels.get(Level::Subsection), Some("Scope"));
        assert_eq!(record.body, "This section explains scope.");
        assert_eq!(record.word_count, 4);
        assert!(!record.footnote_flag);
    }

    #[test]
    fn test_last_paragraph_flushed_without_trailing_blank() {
        let records = assemble_records(&lines(&["Unterminated closing text"]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body, "Unterminated closing text");
    }

    #[test]
    fn test_source_indices_are_sequential() {
        let records = assemble_records(&lines(&["One.", "", "Two.", "", "Three."]));
        let indices: Vec<usize> = records.iter().map(|r| r.source_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_trace_lists_rules_and_skips_absorbed_lines() {
        let trace = ParagraphAssembler::default().trace(&lines(&[
            "3 OVERVIEW",
            "3.1 Scope of",
            "this regulation",
            "Body text.",
        ]));

        let summary: Vec<(usize, &str)> = trace.iter().map(|e| (e.line_number, e.rule)).collect();
        assert_eq!(
            summary,
            vec![(1, "section"), (2, "sub-heading"), (4, "body")]
        );
    }
}
