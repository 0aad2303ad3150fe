//! Consequence weight value object (1-10 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// An integer weight between 1 and 10 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Lowest assignable weight.
    pub const MIN: Self = Self(1);

    /// Highest assignable weight.
    pub const MAX: Self = Self(10);

    /// Starting weight for a manually entered consequence.
    pub const DEFAULT_MANUAL: Self = Self(5);

    /// Weight assigned to AI-suggested consequences.
    pub const DEFAULT_SUGGESTED: Self = Self(8);

    /// Creates a new Score, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value < Self::MIN.0 || value > Self::MAX.0 {
            return Err(ValidationError::out_of_range(
                "score",
                i32::from(Self::MIN.0),
                i32::from(Self::MAX.0),
                i32::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::DEFAULT_MANUAL
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_new_accepts_valid_values() {
        assert_eq!(Score::new(1).value(), 1);
        assert_eq!(Score::new(5).value(), 5);
        assert_eq!(Score::new(10).value(), 10);
    }

    #[test]
    fn score_new_clamps_out_of_range_values() {
        assert_eq!(Score::new(0).value(), 1);
        assert_eq!(Score::new(11).value(), 10);
        assert_eq!(Score::new(255).value(), 10);
    }

    #[test]
    fn score_try_new_accepts_valid_values() {
        assert!(Score::try_new(1).is_ok());
        assert!(Score::try_new(10).is_ok());
    }

    #[test]
    fn score_try_new_rejects_zero() {
        let result = Score::try_new(0);
        match result {
            Err(ValidationError::OutOfRange { field, min, max, actual }) => {
                assert_eq!(field, "score");
                assert_eq!(min, 1);
                assert_eq!(max, 10);
                assert_eq!(actual, 0);
            }
            _ => panic!("Expected OutOfRange error"),
        }
    }

    #[test]
    fn score_try_new_rejects_over_ten() {
        assert!(Score::try_new(11).is_err());
    }

    #[test]
    fn score_default_is_manual_default() {
        assert_eq!(Score::default(), Score::DEFAULT_MANUAL);
        assert_eq!(Score::default().value(), 5);
    }

    #[test]
    fn score_suggested_default_is_eight() {
        assert_eq!(Score::DEFAULT_SUGGESTED.value(), 8);
    }

    #[test]
    fn score_displays_correctly() {
        assert_eq!(format!("{}", Score::new(7)), "7");
    }

    #[test]
    fn score_serializes_to_json() {
        let score = Score::new(4);
        let json = serde_json::to_string(&score).unwrap();
        assert_eq!(json, "4");
    }

    #[test]
    fn score_ordering_works() {
        assert!(Score::new(3) < Score::new(8));
        assert!(Score::MAX > Score::MIN);
    }
}
