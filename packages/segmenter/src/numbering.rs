//! Heading numbering state and continuity checks.
//!
//! Extracted text is full of things that look like section numbers ("see
//! 3.2 Annex"), so a numbered heading candidate is only accepted when its
//! numeral is a plausible successor of the last accepted one.

use std::fmt;

/// A dotted numeric heading label, e.g. "3.2.1" is `[3, 2, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Numeral(Vec<u32>);

impl Numeral {
    /// Create a numeral from its parts.
    #[must_use]
    pub fn new(parts: Vec<u32>) -> Self {
        Self(parts)
    }

    /// Parse a dotted label such as "3.2.1".
    ///
    /// Returns `None` if any part is not a non-negative integer.
    ///
    /// # Examples
    /// ```
    /// use regtext_segmenter::numbering::Numeral;
    ///
    /// assert_eq!(Numeral::parse("3.2.1").unwrap().parts(), &[3, 2, 1]);
    /// assert!(Numeral::parse("3.a").is_none());
    /// ```
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        label
            .trim()
            .trim_end_matches('.')
            .split('.')
            .map(|part| part.parse::<u32>().ok())
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// The numeric parts.
    #[must_use]
    pub fn parts(&self) -> &[u32] {
        &self.0
    }

    /// Number of dotted parts.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Whether the numeral has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

/// Check whether `candidate` is a legitimate next numeral after `previous`.
///
/// An empty side is the bootstrap case and always passes. Otherwise both
/// sides must have the same depth and exactly one position may advance, by
/// exactly one, with no position going backwards and no unchanged position
/// following an advanced one.
///
/// # Examples
/// ```
/// use regtext_segmenter::numbering::validate_increment;
///
/// assert!(validate_increment(&[], &[4, 1]));
/// assert!(validate_increment(&[1, 2], &[1, 3]));
/// assert!(!validate_increment(&[1, 2], &[2, 3]));
/// assert!(!validate_increment(&[1, 2], &[1, 2]));
/// ```
#[must_use]
pub fn validate_increment(previous: &[u32], candidate: &[u32]) -> bool {
    if previous.is_empty() || candidate.is_empty() {
        return true;
    }
    if previous.len() != candidate.len() {
        return false;
    }

    let mut changed = 0usize;
    for (&p, &c) in previous.iter().zip(candidate) {
        if c < p {
            return false;
        }
        match c - p {
            0 if changed > 0 => return false,
            0 => {}
            1 => changed += 1,
            _ => return false,
        }
    }

    changed == 1
}

/// Last accepted numeral at each numeric heading depth.
///
/// Lives for one parse pass. A `None` slot is the bootstrap state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingState {
    /// Last single-part section numeral ("3").
    pub main: Option<Numeral>,
    /// Last two-part numeral ("3.1").
    pub sub: Option<Numeral>,
    /// Last three-part numeral ("3.1.2").
    pub subsub: Option<Numeral>,
}

impl NumberingState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `candidate` continues the two-part numbering.
    #[must_use]
    pub fn accepts_sub(&self, candidate: &Numeral) -> bool {
        let previous = self.sub.as_ref().map(Numeral::parts).unwrap_or_default();
        validate_increment(previous, candidate.parts())
    }

    /// Record a new main section. Resets the two-part counter.
    #[must_use]
    pub fn with_main(&self, numeral: Option<Numeral>) -> Self {
        Self {
            main: numeral.or_else(|| self.main.clone()),
            sub: None,
            subsub: self.subsub.clone(),
        }
    }

    /// Record an accepted two-part numeral.
    #[must_use]
    pub fn with_sub(&self, numeral: Numeral) -> Self {
        Self {
            sub: Some(numeral),
            ..self.clone()
        }
    }

    /// Record an accepted three-part numeral.
    #[must_use]
    pub fn with_subsub(&self, numeral: Numeral) -> Self {
        Self {
            subsub: Some(numeral),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_previous_is_bootstrap() {
        assert!(validate_increment(&[], &[1]));
        assert!(validate_increment(&[], &[7, 3]));
        assert!(validate_increment(&[], &[]));
    }

    #[test]
    fn test_empty_candidate_is_bootstrap() {
        assert!(validate_increment(&[2, 4], &[]));
    }

    #[test]
    fn test_single_advance_in_last_position() {
        assert!(validate_increment(&[1, 2], &[1, 3]));
        assert!(validate_increment(&[3, 1, 1], &[3, 1, 2]));
    }

    #[test]
    fn test_advance_in_first_position_with_reset_fails() {
        // The counter after an advance must not stay put or go back.
        assert!(!validate_increment(&[1, 2], &[2, 2]));
        assert!(!validate_increment(&[1, 2], &[2, 1]));
    }

    #[test]
    fn test_two_positions_changed_fails() {
        assert!(!validate_increment(&[1, 2], &[2, 3]));
    }

    #[test]
    fn test_equal_sequences_do_not_advance() {
        assert!(!validate_increment(&[1, 2], &[1, 2]));
        // Equal only passes when one side is the empty bootstrap value.
        assert!(validate_increment(&[], &[1, 2]));
    }

    #[test]
    fn test_jump_and_regression_fail() {
        assert!(!validate_increment(&[1, 2], &[1, 4]));
        assert!(!validate_increment(&[2, 5], &[1, 6]));
    }

    #[test]
    fn test_length_mismatch_fails() {
        assert!(!validate_increment(&[1, 2], &[1, 2, 1]));
    }

    #[test]
    fn test_numeral_parse_and_display() {
        let numeral = Numeral::parse("12.3").unwrap();
        assert_eq!(numeral.parts(), &[12, 3]);
        assert_eq!(numeral.to_string(), "12.3");
        assert_eq!(Numeral::parse("4.").unwrap().parts(), &[4]);
        assert!(Numeral::parse("").is_none());
        assert!(Numeral::parse("a.1").is_none());
    }

    #[test]
    fn test_state_main_resets_sub() {
        let state = NumberingState::new()
            .with_sub(Numeral::new(vec![2, 4]))
            .with_main(Some(Numeral::new(vec![3])));

        assert_eq!(state.main, Some(Numeral::new(vec![3])));
        assert!(state.sub.is_none());
        assert!(state.accepts_sub(&Numeral::new(vec![3, 1])));
    }

    #[test]
    fn test_state_accepts_sub_after_previous() {
        let state = NumberingState::new().with_sub(Numeral::new(vec![3, 1]));
        assert!(state.accepts_sub(&Numeral::new(vec![3, 2])));
        assert!(!state.accepts_sub(&Numeral::new(vec![3, 1])));
        assert!(!state.accepts_sub(&Numeral::new(vec![5, 1])));
    }
}
