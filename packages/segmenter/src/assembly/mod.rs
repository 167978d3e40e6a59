//! Paragraph assembly.
//!
//! Classified lines are folded into [`Record`](crate::types::Record)s: body
//! lines accumulate in a buffer that is flushed at blank lines, headings,
//! footnote starts, numbered markers and sentence-final lines.

mod builder;
mod engine;
mod state;

pub use builder::{detect_no_fault, extract_footnote_ids, word_count};
pub use engine::{assemble_records, ParagraphAssembler, TraceEntry};
pub use state::{ends_sentence, ParserState, Step};
