//! Footnote rules.
//!
//! Footnotes are extracted as "12  Text ..." with a wide gap after the
//! numeral. When extraction puts the superscript numeral on its own line,
//! the footnote text arrives indented and without a numeral; the bare
//! numeral is then remembered by the body rule and picked up here.

use regex::Regex;
use std::sync::LazyLock;

use crate::classify::rule::LineRule;
use crate::classify::types::{Classification, Classified, ClassifierState, LineCursor};

/// Numeral, two or more spaces, then a capital or opening quote.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FOOTNOTE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\d{1,3}) {2,}([A-Z"'“‘].*)$"#).expect("valid regex")
});

/// Indented line starting with a capital or opening quote, matched on the raw line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INDENTED_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^ {2,}([A-Z"'“‘].*?)\s*$"#).expect("valid regex"));

/// Footnote introduced by its own numeral.
pub struct FootnoteRule;

impl LineRule for FootnoteRule {
    fn name(&self) -> &'static str {
        "footnote"
    }

    fn apply(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Option<Classified> {
        let caps = FOOTNOTE_START.captures(cursor.trimmed())?;
        let id = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let text = caps.get(2)?.as_str().trim().to_string();

        Some(Classified::new(
            self.name(),
            Classification::FootnoteStart { id, text },
            state.with_orphan(None),
        ))
    }
}

/// Footnote whose numeral was split onto the preceding line.
pub struct OrphanFootnoteRule;

impl LineRule for OrphanFootnoteRule {
    fn name(&self) -> &'static str {
        "orphan-footnote"
    }

    fn apply(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Option<Classified> {
        let id = state.orphan_number?;
        let caps = INDENTED_START.captures(cursor.raw())?;
        let text = caps.get(1)?.as_str().to_string();

        Some(Classified::new(
            self.name(),
            Classification::FootnoteStart { id, text },
            state.with_orphan(None),
        ))
    }
}
