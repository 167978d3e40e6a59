//! Plain numbered marker rule.

use regex::Regex;
use std::sync::LazyLock;

use crate::classify::rule::LineRule;
use crate::classify::types::{Classification, Classified, ClassifierState, LineCursor};

/// "1. Member States shall ..." style paragraph opener.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLAIN_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d\. [A-Z]").expect("valid regex"));

/// Numbered paragraph marker. Separates paragraphs without touching the
/// heading labels.
pub struct PlainMarkerRule;

impl LineRule for PlainMarkerRule {
    fn name(&self) -> &'static str {
        "plain-marker"
    }

    fn apply(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Option<Classified> {
        let line = cursor.trimmed();
        if !PLAIN_MARKER.is_match(line) {
            return None;
        }

        Some(Classified::new(
            self.name(),
            Classification::PlainHeadingMarker {
                text: line.to_string(),
            },
            state.with_orphan(None),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_marker() {
        let lines = lines(&["2. Member States shall notify the Commission.", ""]);
        let result = PlainMarkerRule
            .apply(&LineCursor::new(&lines, 0), &ClassifierState::new())
            .unwrap();
        assert_eq!(result.classification.kind(), "PlainHeadingMarker");
    }

    #[test]
    fn test_plain_marker_needs_space_and_capital() {
        for line in ["2.Member States", "2. member states", "12. Member States", "2.5 Scope"] {
            let lines = lines(&[line, ""]);
            assert!(
                PlainMarkerRule
                    .apply(&LineCursor::new(&lines, 0), &ClassifierState::new())
                    .is_none(),
                "{line} should not be a marker"
            );
        }
    }
}
