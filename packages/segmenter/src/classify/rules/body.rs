//! Body fallback rule.

use regex::Regex;
use std::sync::LazyLock;

use crate::classify::rule::LineRule;
use crate::classify::types::{Classification, Classified, ClassifierState, LineCursor};

/// A line holding nothing but a short numeral.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BARE_NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})$").expect("valid regex"));

/// Claims every line. Bare numerals are remembered as the orphan number
/// for a following footnote that lacks its own.
pub struct BodyRule;

impl BodyRule {
    /// Classify any line as body text.
    #[must_use]
    pub fn classify(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Classified {
        let line = cursor.trimmed();

        // Blank lines keep a pending orphan alive.
        let state = if line.is_empty() {
            state.clone()
        } else {
            let orphan = BARE_NUMERAL
                .captures(line)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u32>().ok());
            state.with_orphan(orphan)
        };

        Classified::new(
            self.name(),
            Classification::Body {
                text: line.to_string(),
            },
            state,
        )
    }
}

impl LineRule for BodyRule {
    fn name(&self) -> &'static str {
        "body"
    }

    fn apply(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Option<Classified> {
        Some(self.classify(cursor, state))
    }
}
