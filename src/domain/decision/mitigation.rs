//! Mitigation analysis notes - second-order consequences of a mitigation plan.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{MitigationItemId, ValidationError};

/// Which second-order list a mitigation note belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationKind {
    Upside,
    Downside,
}

impl MitigationKind {
    /// Returns the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            MitigationKind::Upside => "Upside",
            MitigationKind::Downside => "Downside",
        }
    }
}

impl fmt::Display for MitigationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A benefit or cost of implementing the mitigation plan itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationAnalysis {
    id: MitigationItemId,
    text: String,
}

impl MitigationAnalysis {
    /// Creates a new analysis note. Text must be non-empty.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        Ok(Self {
            id: MitigationItemId::new(),
            text,
        })
    }

    /// Reconstitutes an analysis note from persisted data.
    pub(crate) fn reconstitute(id: MitigationItemId, text: String) -> Self {
        Self { id, text }
    }

    /// Returns the note ID.
    pub fn id(&self) -> MitigationItemId {
        self.id
    }

    /// Returns the note text.
    pub fn text(&self) -> &str {
        &self.text
    }
}
