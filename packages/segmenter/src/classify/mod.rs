//! Rule-based line classification.
//!
//! Each line is offered to an ordered set of [`LineRule`]s; the first rule
//! that claims it decides its role. Rules see one line of lookahead (plus a
//! forward skip over blank lines) and the numbering state, and return the
//! updated state alongside their verdict.

mod config;
mod core;
mod engine;
mod rule;
pub mod rules;
mod types;

pub use config::create_default_rules;
pub use core::RuleSet;
pub use engine::LineClassifier;
pub use rule::{absorb_lowercase_lookahead, LineRule};
pub use types::{Classification, Classified, ClassifierState, LineCursor};
