//! Outcome entity - a desired result and the reason behind it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OutcomeId, ValidationError};

/// A desired outcome: what the decider wants and why they want it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    id: OutcomeId,
    what: String,
    why: String,
}

impl Outcome {
    /// Creates a new outcome. The `what` must be non-empty; `why` may be blank.
    pub fn new(what: impl Into<String>, why: impl Into<String>) -> Result<Self, ValidationError> {
        let what = what.into();
        if what.trim().is_empty() {
            return Err(ValidationError::empty_field("what"));
        }
        Ok(Self {
            id: OutcomeId::new(),
            what,
            why: why.into(),
        })
    }

    /// Reconstitutes an outcome from persisted data.
    pub(crate) fn reconstitute(id: OutcomeId, what: String, why: String) -> Self {
        Self { id, what, why }
    }

    /// Returns the outcome ID.
    pub fn id(&self) -> OutcomeId {
        self.id
    }

    /// Returns the desired result.
    pub fn what(&self) -> &str {
        &self.what
    }

    /// Returns the purpose behind the result.
    pub fn why(&self) -> &str {
        &self.why
    }
}
