//! Application layer - the session controller and the suggestion service.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Front-ends hold a `DecisionSession` and, when an AI provider is
//! configured, a `SuggestionService`.

mod session;
mod suggestion_service;

pub use session::DecisionSession;
pub use suggestion_service::{ConsequenceAnalysis, SuggestionService};
