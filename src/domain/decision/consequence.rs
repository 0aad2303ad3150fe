//! Consequence entity - a weighted upside or downside of an option.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ConsequenceId, Score, ValidationError};

/// Whether a consequence counts for or against its option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsequenceKind {
    Upside,
    Downside,
}

impl ConsequenceKind {
    /// Returns the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsequenceKind::Upside => "Upside",
            ConsequenceKind::Downside => "Downside",
        }
    }
}

impl fmt::Display for ConsequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single consequence of pursuing an option, weighted 1-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consequence {
    id: ConsequenceId,
    text: String,
    kind: ConsequenceKind,
    score: Score,
}

impl Consequence {
    /// Creates a new consequence. Text must be non-empty.
    pub fn new(
        text: impl Into<String>,
        kind: ConsequenceKind,
        score: Score,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        Ok(Self {
            id: ConsequenceId::new(),
            text,
            kind,
            score,
        })
    }

    /// Reconstitutes a consequence from persisted data.
    pub(crate) fn reconstitute(
        id: ConsequenceId,
        text: String,
        kind: ConsequenceKind,
        score: Score,
    ) -> Self {
        Self {
            id,
            text,
            kind,
            score,
        }
    }

    /// Returns the consequence ID.
    pub fn id(&self) -> ConsequenceId {
        self.id
    }

    /// Returns the consequence text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether this is an upside or a downside.
    pub fn kind(&self) -> ConsequenceKind {
        self.kind
    }

    /// Returns the weight.
    pub fn score(&self) -> Score {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_weighted_consequence() {
        let c = Consequence::new("Higher salary", ConsequenceKind::Upside, Score::new(8)).unwrap();
        assert_eq!(c.text(), "Higher salary");
        assert_eq!(c.kind(), ConsequenceKind::Upside);
        assert_eq!(c.score().value(), 8);
    }

    #[test]
    fn new_rejects_empty_text() {
        let result = Consequence::new("", ConsequenceKind::Downside, Score::default());
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "text"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn kind_displays_label() {
        assert_eq!(ConsequenceKind::Upside.to_string(), "Upside");
        assert_eq!(ConsequenceKind::Downside.to_string(), "Downside");
    }

    #[test]
    fn kind_serializes_to_snake_case() {
        let json = serde_json::to_string(&ConsequenceKind::Downside).unwrap();
        assert_eq!(json, "\"downside\"");
    }
}
