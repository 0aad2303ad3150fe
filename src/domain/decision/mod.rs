//! Decision module - the aggregate root and everything it owns.
//!
//! # Components
//!
//! - `DecisionState` - Aggregate root with the twelve mutation operations
//! - `Outcome` / `DecisionOption` / `Consequence` / `MitigationAnalysis` - Entities
//! - `scoring` - Pure net-score functions for the EVALUATE stage
//! - `Snapshot` - Versioned, tolerant wire format for persistence

mod consequence;
mod errors;
mod mitigation;
mod option;
mod outcome;
mod scoring;
mod snapshot;
mod state;

// Re-export all public types
pub use consequence::{Consequence, ConsequenceKind};
pub use errors::DecisionError;
pub use mitigation::{MitigationAnalysis, MitigationKind};
pub use option::DecisionOption;
pub use outcome::Outcome;
pub use scoring::{net_score, rank, score_breakdown, ScoreBreakdown};
pub use snapshot::{
    ConsequenceSnapshot, MitigationItemSnapshot, OptionSnapshot, OutcomeSnapshot, Snapshot,
    SNAPSHOT_VERSION,
};
pub use state::{DecisionState, MAX_CANDIDATES};
