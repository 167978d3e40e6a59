//! Line classifier that evaluates the rule set against each line.

use super::core::RuleSet;
use super::rule::LineRule;
use super::rules::BodyRule;
use super::types::{Classification, Classified, ClassifierState, LineCursor};

/// Classifier that dispatches a line to the first rule that claims it.
///
/// Unlike an element parser there is no "unknown" outcome: a line that no
/// rule claims is body text, so content is never dropped.
pub struct LineClassifier {
    rules: RuleSet,
    fallback: BodyRule,
}

impl LineClassifier {
    /// Create a classifier over the given rules.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            fallback: BodyRule,
        }
    }

    /// Get a reference to the underlying rule set.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classify the line under `cursor`.
    #[must_use]
    pub fn classify(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Classified {
        let classified = self
            .rules
            .iter()
            .find_map(|rule| rule.apply(cursor, state))
            .unwrap_or_else(|| self.fallback.classify(cursor, state));

        if !matches!(classified.classification, Classification::Body { .. }) {
            tracing::debug!(
                line = cursor.index() + 1,
                rule = classified.rule,
                class = %classified.classification,
                "Classified line"
            );
        }

        classified
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(super::config::create_default_rules())
    }
}
