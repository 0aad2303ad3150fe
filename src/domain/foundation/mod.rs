//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Decision Master domain.

mod errors;
mod ids;
mod score;
mod step;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{ConsequenceId, MitigationItemId, OptionId, OutcomeId};
pub use score::Score;
pub use step::Step;
pub use timestamp::Timestamp;
