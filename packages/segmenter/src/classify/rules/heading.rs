//! Heading rules for numbered and un-numbered section titles.

use regex::Regex;
use std::sync::LazyLock;

use crate::classify::rule::{absorb_lowercase_lookahead, LineRule};
use crate::classify::types::{Classification, Classified, ClassifierState, LineCursor};
use crate::numbering::Numeral;

/// The first numbered section, "1 Introduction". Sections 10 and up do not
/// count.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FIRST_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1 [A-Z]").expect("valid regex"));

/// Two-part numbered heading, "3.1 Scope".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUB_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+) ([A-Z].*)$").expect("valid regex"));

/// Three-part numbered heading, "3.1.2  Exemptions".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBSUB_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+\.\d+) {1,3}([A-Z].*)$").expect("valid regex"));

/// Single-digit section opener, "3 OVERVIEW".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d) ([A-Z].*)$").expect("valid regex"));

/// Lines that may follow a section opener: a two-part heading or "1. Text".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_FOLLOWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\.\d+ [A-Z]|\d\.\s*[A-Z])").expect("valid regex"));

/// Un-numbered title immediately preceding section "1".
pub struct TitleRule;

impl LineRule for TitleRule {
    fn name(&self) -> &'static str {
        "title"
    }

    fn apply(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Option<Classified> {
        let line = cursor.trimmed();
        if !line.chars().next().is_some_and(char::is_uppercase) {
            return None;
        }
        let (_, next) = cursor.lookahead()?;
        if !FIRST_SECTION.is_match(next) {
            return None;
        }

        Some(Classified::new(
            self.name(),
            Classification::MainHeading {
                numeral: None,
                title: line.to_string(),
            },
            state.with_numbering(state.numbering.with_main(None)),
        ))
    }
}

/// Two-part numbered heading whose numeral continues the sequence.
pub struct SubHeadingRule;

impl LineRule for SubHeadingRule {
    fn name(&self) -> &'static str {
        "sub-heading"
    }

    fn apply(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Option<Classified> {
        let caps = SUB_HEADING.captures(cursor.trimmed())?;
        let numeral = Numeral::parse(caps.get(1)?.as_str())?;

        if !state.numbering.accepts_sub(&numeral) {
            tracing::debug!(
                line = cursor.index() + 1,
                numeral = %numeral,
                previous = ?state.numbering.sub,
                "Numbering discontinuity, not a heading"
            );
            return None;
        }

        let (title, absorbed) = absorb_lowercase_lookahead(caps.get(2)?.as_str(), cursor);
        let numbering = state.numbering.with_sub(numeral.clone());

        Some(
            Classified::new(
                self.name(),
                Classification::SubHeading { numeral, title },
                state.with_numbering(numbering),
            )
            .with_absorbed(absorbed),
        )
    }
}

/// Three-part numbered heading.
pub struct SubSubHeadingRule;

impl LineRule for SubSubHeadingRule {
    fn name(&self) -> &'static str {
        "subsub-heading"
    }

    fn apply(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Option<Classified> {
        let caps = SUBSUB_HEADING.captures(cursor.trimmed())?;
        let numeral = Numeral::parse(caps.get(1)?.as_str())?;
        let (title, absorbed) = absorb_lowercase_lookahead(caps.get(2)?.as_str(), cursor);
        let numbering = state.numbering.with_subsub(numeral.clone());

        Some(
            Classified::new(
                self.name(),
                Classification::SubSubHeading { numeral, title },
                state.with_numbering(numbering),
            )
            .with_absorbed(absorbed),
        )
    }
}

/// Single-digit section opener, accepted only when a numbered heading or
/// numbered paragraph follows it.
pub struct SectionRule;

impl LineRule for SectionRule {
    fn name(&self) -> &'static str {
        "section"
    }

    fn apply(&self, cursor: &LineCursor<'_>, state: &ClassifierState) -> Option<Classified> {
        let caps = SECTION_OPENER.captures(cursor.trimmed())?;
        let numeral = Numeral::parse(caps.get(1)?.as_str())?;
        let (title, absorbed) = absorb_lowercase_lookahead(caps.get(2)?.as_str(), cursor);

        // The follower is checked past any absorbed continuation line.
        let after = absorbed.unwrap_or(cursor.index());
        let (_, follower) = cursor.lookahead_after(after)?;
        if !SECTION_FOLLOWER.is_match(follower) {
            return None;
        }

        let numbering = state.numbering.with_main(Some(numeral.clone()));
        Some(
            Classified::new(
                self.name(),
                Classification::MainHeading {
                    numeral: Some(numeral),
                    title,
                },
                state.with_numbering(numbering),
            )
            .with_absorbed(absorbed),
        )
    }
}
