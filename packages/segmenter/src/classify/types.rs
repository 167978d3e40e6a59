//! Types for the line classification system.

use std::fmt;

use crate::numbering::{Numeral, NumberingState};

/// Read-only view of one line and its neighbours.
///
/// The line sequence always ends with an empty sentinel line, so the
/// immediate next line exists for every real line.
#[derive(Debug, Clone, Copy)]
pub struct LineCursor<'a> {
    lines: &'a [String],
    index: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor at `index`.
    #[must_use]
    pub fn new(lines: &'a [String], index: usize) -> Self {
        Self { lines, index }
    }

    /// Index of the current line.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The current line as extracted.
    #[must_use]
    pub fn raw(&self) -> &'a str {
        self.lines.get(self.index).map(String::as_str).unwrap_or("")
    }

    /// The current line without surrounding whitespace.
    #[must_use]
    pub fn trimmed(&self) -> &'a str {
        self.raw().trim()
    }

    /// The immediately following line, trimmed. Empty past the end.
    #[must_use]
    pub fn next_raw(&self) -> &'a str {
        self.lines
            .get(self.index + 1)
            .map(|s| s.trim())
            .unwrap_or("")
    }

    /// The first non-blank line after the current one, trimmed, with its index.
    #[must_use]
    pub fn lookahead(&self) -> Option<(usize, &'a str)> {
        self.lookahead_after(self.index)
    }

    /// The first non-blank line after `index`, trimmed, with its index.
    #[must_use]
    pub fn lookahead_after(&self, index: usize) -> Option<(usize, &'a str)> {
        self.lines
            .iter()
            .enumerate()
            .skip(index + 1)
            .map(|(i, line)| (i, line.trim()))
            .find(|(_, line)| !line.is_empty())
    }
}

/// Classifier state threaded through one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierState {
    /// Last accepted heading numerals.
    pub numbering: NumberingState,

    /// Bare numeral seen in body text, waiting for a footnote without its own.
    pub orphan_number: Option<u32>,
}

impl ClassifierState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with new numbering and no pending orphan number.
    #[must_use]
    pub fn with_numbering(&self, numbering: NumberingState) -> Self {
        Self {
            numbering,
            orphan_number: None,
        }
    }

    /// Copy with the pending orphan number replaced.
    #[must_use]
    pub fn with_orphan(&self, orphan_number: Option<u32>) -> Self {
        Self {
            numbering: self.numbering.clone(),
            orphan_number,
        }
    }
}

/// Role assigned to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Top-level section. Without a numeral it is the un-numbered title
    /// that precedes section "1".
    MainHeading {
        numeral: Option<Numeral>,
        title: String,
    },
    /// Two-part numbered heading.
    SubHeading { numeral: Numeral, title: String },
    /// Three-part numbered heading.
    SubSubHeading { numeral: Numeral, title: String },
    /// Start of a footnote.
    FootnoteStart { id: u32, text: String },
    /// Numbered list-style marker ("1. Member States shall ...").
    PlainHeadingMarker { text: String },
    /// Anything else, including blank lines.
    Body { text: String },
}

impl Classification {
    /// Short name of the classification kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MainHeading { .. } => "MainHeading",
            Self::SubHeading { .. } => "SubHeading",
            Self::SubSubHeading { .. } => "SubSubHeading",
            Self::FootnoteStart { .. } => "FootnoteStart",
            Self::PlainHeadingMarker { .. } => "PlainHeadingMarker",
            Self::Body { .. } => "Body",
        }
    }

    /// Whether this classification changes the heading labels.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            Self::MainHeading { .. } | Self::SubHeading { .. } | Self::SubSubHeading { .. }
        )
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainHeading {
                numeral: Some(n),
                title,
            } => write!(f, "MainHeading({n}) {title}"),
            Self::MainHeading {
                numeral: None,
                title,
            } => write!(f, "MainHeading {title}"),
            Self::SubHeading { numeral, title } => write!(f, "SubHeading({numeral}) {title}"),
            Self::SubSubHeading { numeral, title } => {
                write!(f, "SubSubHeading({numeral}) {title}")
            }
            Self::FootnoteStart { id, text } => write!(f, "FootnoteStart({id}) {text}"),
            Self::PlainHeadingMarker { text } => write!(f, "PlainHeadingMarker {text}"),
            Self::Body { text } => write!(f, "Body {text}"),
        }
    }
}

/// Outcome of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// The assigned role.
    pub classification: Classification,

    /// Classifier state after this line.
    pub state: ClassifierState,

    /// Index of a lookahead line folded into this one, if any.
    pub absorbed: Option<usize>,

    /// Name of the rule that produced the classification.
    pub rule: &'static str,
}

impl Classified {
    /// Create a result that consumes no lookahead.
    #[must_use]
    pub fn new(rule: &'static str, classification: Classification, state: ClassifierState) -> Self {
        Self {
            classification,
            state,
            absorbed: None,
            rule,
        }
    }

    /// Mark a lookahead line as absorbed.
    #[must_use]
    pub fn with_absorbed(mut self, absorbed: Option<usize>) -> Self {
        self.absorbed = absorbed;
        self
    }
}
