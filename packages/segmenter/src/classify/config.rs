//! Default rule configuration.

use super::core::RuleSet;
use super::rules::{
    FootnoteRule, OrphanFootnoteRule, PlainMarkerRule, SectionRule, SubHeadingRule,
    SubSubHeadingRule, TitleRule,
};

/// Create the rule set for extracted regulation text.
///
/// Order is precedence: titles, two-part headings, three-part headings,
/// section openers, numbered markers, footnotes. Body text is the
/// classifier's fallback and is not registered here.
#[must_use]
pub fn create_default_rules() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.register(TitleRule);
    rules.register(SubHeadingRule);
    rules.register(SubSubHeadingRule);
    rules.register(SectionRule);
    rules.register(PlainMarkerRule);
    rules.register(FootnoteRule);
    rules.register(OrphanFootnoteRule);

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_default_rules_order() {
        let rules = create_default_rules();
        assert_eq!(
            rules.rule_names(),
            vec![
                "title",
                "sub-heading",
                "subsub-heading",
                "section",
                "plain-marker",
                "footnote",
                "orphan-footnote",
            ]
        );
    }
}
