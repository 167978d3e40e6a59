//! Line rule trait definition.

use super::types::{Classified, ClassifierState, LineCursor};

/// Trait for line classification rules.
///
/// A rule inspects the current line (and, where it needs to, the lines
/// after it) and either claims the line or declines so the next rule in
/// the set gets a turn.
pub trait LineRule: Send + Sync {
    /// Short identifier used in traces and logs.
    fn name(&self) -> &'static str;

    /// Classify the line, or return `None` to pass it on.
    ///
    /// # Arguments
    /// * `cursor` - The current line and its neighbours
    /// * `state` - Classifier state before this line
    fn apply(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Option<Classified>;
}

/// Fold a lowercase-initial lookahead line into a heading title.
///
/// Headings broken mid-sentence by extraction continue on the next
/// non-blank line in lowercase. Returns the repaired title and the index of
/// the absorbed line.
#[must_use]
pub fn absorb_lowercase_lookahead(
    title: &str,
    cursor: &LineCursor<'_>,
) -> (String, Option<usize>) {
    match cursor.lookahead() {
        Some((index, next)) if next.chars().next().is_some_and(char::is_lowercase) => {
            (format!("{} {next}", title.trim_end()), Some(index))
        }
        _ => (title.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::types::Classification;

    struct TestRule;

    impl LineRule for TestRule {
        fn name(&self) -> &'static str {
            "test"
        }

        fn apply(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Option<Classified> {
            Some(Classified::new(
                self.name(),
                Classification::Body {
                    text: cursor.trimmed().to_string(),
                },
                state.clone(),
            ))
        }
    }

    #[test]
    fn test_rule_trait() {
        let lines = vec!["hello".to_string(), String::new()];
        let cursor = LineCursor::new(&lines, 0);
        let result = TestRule.apply(&cursor, &ClassifierState::new()).unwrap();

        assert_eq!(result.rule, "test");
        assert_eq!(
            result.classification,
            Classification::Body {
                text: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_absorb_lowercase_lookahead() {
        let lines: Vec<String> = ["3.1 Scope of the", "", "regulation", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let cursor = LineCursor::new(&lines, 0);
        let (title, absorbed) = absorb_lowercase_lookahead("Scope of the", &cursor);
        assert_eq!(title, "Scope of the regulation");
        assert_eq!(absorbed, Some(2));
    }

    #[test]
    fn test_no_absorb_for_uppercase_or_end() {
        let lines: Vec<String> = ["3.1 Scope", "Text.", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let cursor = LineCursor::new(&lines, 0);
        assert_eq!(absorb_lowercase_lookahead("Scope", &cursor), ("Scope".to_string(), None));

        let end = LineCursor::new(&lines, 1);
        assert_eq!(absorb_lowercase_lookahead("Text.", &end), ("Text.".to_string(), None));
    }
}
