//! Ordered rule set.

use super::rule::LineRule;

/// Rules in precedence order. The first rule that claims a line wins.
pub struct RuleSet {
    rules: Vec<Box<dyn LineRule>>,
}

impl RuleSet {
    /// Create a new empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule with lower precedence than every rule already registered.
    pub fn register(&mut self, rule: impl LineRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Iterate over rules in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn LineRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Rule names in precedence order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
