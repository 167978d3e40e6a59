//! Parser state threaded through the line fold.

use crate::classify::{Classification, Classified, ClassifierState, LineCursor};
use crate::config::NON_TERMINAL_ABBREVIATIONS;
use crate::types::{footnote_label, HeadingLabels, Level, Record};

/// Everything the parse carries from one line to the next.
///
/// Each step consumes the state and returns a new one, so the whole parse
/// is a fold over the line sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    /// Numbering and orphan-number state owned by the classifier.
    pub classifier: ClassifierState,

    /// Current heading context.
    pub labels: HeadingLabels,

    /// Lines of the paragraph being assembled.
    pub buffer: Vec<String>,

    /// Lines up to and including this index were absorbed by a heading.
    pub skip_through: Option<usize>,

    /// Bare numeral line that may turn out to be a footnote number.
    pub held: Option<String>,

    /// Source index assigned to the next emitted record.
    pub next_index: usize,
}

/// Result of one fold step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// State after the line.
    pub state: ParserState,

    /// Records completed by the line, in order.
    pub records: Vec<Record>,
}

impl ParserState {
    /// Create the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the line at `index` was already absorbed into a heading.
    #[must_use]
    pub fn is_absorbed(&self, index: usize) -> bool {
        self.skip_through.is_some_and(|through| index <= through)
    }

    /// Apply a classified line.
    #[must_use]
    pub fn advance(self, cursor: &LineCursor<'_>, classified: Classified) -> Step {
        let mut records = Vec::new();
        let Classified {
            classification,
            state: classifier,
            absorbed,
            ..
        } = classified;

        let mut state = Self {
            classifier,
            skip_through: absorbed.or(self.skip_through),
            ..self
        };

        let holds_numeral = state.classifier.orphan_number.is_some();

        match classification {
            Classification::Body { text } if text.is_empty() => {
                state = state.release().flush(&mut records);
            }
            Classification::Body { text } if holds_numeral => {
                state = state.release();
                state.held = Some(text);
            }
            Classification::Body { text } => {
                state = state.release();
                state.buffer.push(text);
                state = state.close_if_final(cursor, &mut records);
            }
            Classification::MainHeading { numeral, title } => {
                let level = if numeral.is_some() {
                    Level::Section
                } else {
                    Level::Title
                };
                state = state.release().flush(&mut records);
                state.labels = state.labels.with(level, title);
            }
            Classification::SubHeading { title, .. } => {
                state = state.release().flush(&mut records);
                state.labels = state.labels.with(Level::Subsection, title);
            }
            Classification::SubSubHeading { title, .. } => {
                state = state.release().flush(&mut records);
                state.labels = state.labels.with(Level::Subsubsection, title);
            }
            Classification::FootnoteStart { id, text } => {
                // The held numeral is this footnote's number, now in its label.
                if state.held.as_deref() == Some(id.to_string().as_str()) {
                    state.held = None;
                }
                state = state.release().flush(&mut records);
                state.labels = state.labels.with(Level::Footnote, footnote_label(id));
                state.buffer.push(text);
                state = state.close_if_final(cursor, &mut records);
            }
            Classification::PlainHeadingMarker { text } => {
                state = state.release().flush(&mut records);
                state.buffer.push(text);
                state = state.close_if_final(cursor, &mut records);
            }
        }

        Step { state, records }
    }

    /// Emit the buffered paragraph, if any.
    ///
    /// Labels are left alone: a footnote label stays until the next heading
    /// or footnote replaces it.
    #[must_use]
    pub fn flush(mut self, records: &mut Vec<Record>) -> Self {
        if let Some(record) = Record::from_lines(&self.labels, &self.buffer, self.next_index) {
            records.push(record);
            self.next_index += 1;
        }
        self.buffer.clear();
        self
    }

    /// Emit whatever is still buffered or held at the end of input.
    #[must_use]
    pub fn finish(self) -> Step {
        let mut records = Vec::new();
        let state = self.release().flush(&mut records);
        Step { state, records }
    }

    /// Move a held numeral back into the paragraph buffer.
    fn release(mut self) -> Self {
        if let Some(held) = self.held.take() {
            self.buffer.push(held);
        }
        self
    }

    /// Flush when the current line ends a sentence and the next line is
    /// blank or starts in lowercase.
    fn close_if_final(self, cursor: &LineCursor<'_>, records: &mut Vec<Record>) -> Self {
        let current = self.buffer.last().map(String::as_str).unwrap_or("");
        let next = cursor.next_raw();
        let next_allows = next.is_empty() || next.chars().next().is_some_and(char::is_lowercase);

        if next_allows && ends_sentence(current) {
            self.flush(records)
        } else {
            self
        }
    }
}

/// Whether a line ends in a period that is not part of an abbreviation.
#[must_use]
pub fn ends_sentence(line: &str) -> bool {
    let line = line.trim_end();
    line.ends_with('.')
        && !NON_TERMINAL_ABBREVIATIONS
            .iter()
            .any(|abbreviation| line.ends_with(abbreviation))
}
