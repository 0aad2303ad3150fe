//! Wizard navigation rules.
//!
//! Decides when the user may move between stages and how the final
//! stage presents itself. Stateless: every answer is derived from the
//! current [`DecisionState`](crate::domain::decision::DecisionState).

mod step_flow;

// Re-export all public types
pub use step_flow::{ResolvePhase, StepFlow};
