//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `decision` - Decision state aggregate, entities, scoring, snapshots
//! - `flow` - Stage gating and wizard navigation rules

pub mod decision;
pub mod flow;
pub mod foundation;
