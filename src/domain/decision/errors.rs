//! Decision-specific error types.

use crate::domain::foundation::{ErrorCode, OptionId, ValidationError};

/// Errors raised by mutations on the decision state.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionError {
    /// A field failed value-object validation.
    Validation(ValidationError),
    /// No option with the given id exists.
    OptionNotFound(OptionId),
    /// The candidate list is already at capacity.
    CandidateLimitReached,
    /// The option exists but is not a selected candidate.
    NotACandidate(OptionId),
}

impl DecisionError {
    pub fn option_not_found(id: OptionId) -> Self {
        DecisionError::OptionNotFound(id)
    }

    pub fn candidate_limit_reached() -> Self {
        DecisionError::CandidateLimitReached
    }

    pub fn not_a_candidate(id: OptionId) -> Self {
        DecisionError::NotACandidate(id)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DecisionError::Validation(err) => match err {
                ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
                ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            },
            DecisionError::OptionNotFound(_) => ErrorCode::OptionNotFound,
            DecisionError::CandidateLimitReached => ErrorCode::CandidateLimitReached,
            DecisionError::NotACandidate(_) => ErrorCode::NotACandidate,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DecisionError::Validation(err) => err.to_string(),
            DecisionError::OptionNotFound(id) => format!("Option not found: {}", id),
            DecisionError::CandidateLimitReached => {
                "You can only select a maximum of 2 candidates for the mitigation round. \
                 Deselect one first."
                    .to_string()
            }
            DecisionError::NotACandidate(id) => {
                format!("Option {} is not a selected candidate", id)
            }
        }
    }
}

impl std::fmt::Display for DecisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DecisionError {}

impl From<ValidationError> for DecisionError {
    fn from(err: ValidationError) -> Self {
        DecisionError::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_and_maps_code() {
        let err: DecisionError = ValidationError::empty_field("title").into();
        assert_eq!(err.code(), ErrorCode::EmptyField);
        assert!(err.message().contains("title"));
    }

    #[test]
    fn option_not_found_carries_id() {
        let id = OptionId::new();
        let err = DecisionError::option_not_found(id);
        assert_eq!(err.code(), ErrorCode::OptionNotFound);
        assert!(err.message().contains(&id.to_string()));
    }

    #[test]
    fn candidate_limit_reached_has_user_facing_message() {
        let err = DecisionError::candidate_limit_reached();
        assert_eq!(err.code(), ErrorCode::CandidateLimitReached);
        assert!(err.message().contains("maximum of 2"));
    }
}
