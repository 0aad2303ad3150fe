//! StepFlow - Gated forward navigation through the six wizard stages.
//!
//! The wizard moves strictly one stage at a time:
//!
//! Outcomes → Options → Consequences → Evaluate → Mitigate → Resolve
//!
//! Moving forward is gated on the state collected so far; moving backward is
//! always allowed and never discards data. Stages themselves never gate data
//! entry - mutations are legal at any stage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::decision::DecisionState;
use crate::domain::foundation::Step;

/// Minimum length of the first outcome's `what` before leaving OUTCOMES.
const MIN_FIRST_OUTCOME_CHARS: usize = 4;

/// Minimum number of options before leaving OPTIONS.
const MIN_OPTIONS: usize = 2;

/// How the RESOLVE stage presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvePhase {
    /// No winner yet: pick among the candidates.
    Selection,
    /// A winner is set: capture the commitment reason.
    Commitment,
}

impl fmt::Display for ResolvePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResolvePhase::Selection => "selection",
            ResolvePhase::Commitment => "commitment",
        };
        write!(f, "{}", s)
    }
}

/// Central location for stage gating and navigation rules.
pub struct StepFlow;

impl StepFlow {
    /// Returns true when the given stage's forward gate is satisfied.
    ///
    /// Only the first outcome's `what` is checked at the OUTCOMES gate;
    /// later outcomes are free-form. RESOLVE is terminal and never
    /// advances.
    pub fn can_advance(state: &DecisionState, step: Step) -> bool {
        match step {
            Step::Outcomes => state
                .outcomes()
                .first()
                .map_or(false, |o| o.what().chars().count() >= MIN_FIRST_OUTCOME_CHARS),
            Step::Options => state.options().len() >= MIN_OPTIONS,
            Step::Consequences => true,
            Step::Evaluate => !state.candidate_option_ids().is_empty(),
            Step::Mitigate => true,
            Step::Resolve => false,
        }
    }

    /// Returns the next stage when the gate allows it, otherwise the
    /// current stage unchanged. Never panics and never skips stages.
    pub fn advance(state: &DecisionState, step: Step) -> Step {
        if Self::can_advance(state, step) {
            step.next().unwrap_or(step)
        } else {
            step
        }
    }

    /// Returns the previous stage, or the current one at the start.
    /// Retreating is unconditional and touches no data.
    pub fn retreat(step: Step) -> Step {
        step.previous().unwrap_or(step)
    }

    /// Derives how RESOLVE currently presents: selection until a final
    /// decision is set, commitment afterwards. Not stored anywhere.
    pub fn resolve_phase(state: &DecisionState) -> ResolvePhase {
        if state.final_decision_id().is_some() {
            ResolvePhase::Commitment
        } else {
            ResolvePhase::Selection
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::ConsequenceKind;
    use crate::domain::foundation::Score;

    fn state_ready_through_evaluate() -> DecisionState {
        let mut state = DecisionState::new();
        state.add_outcome("Find a bigger flat", "Family is growing").unwrap();
        let a = state.add_option("Move across town").unwrap();
        state.add_option("Renovate instead").unwrap();
        state
            .add_consequence(a, "More space", ConsequenceKind::Upside, Score::new(8))
            .unwrap();
        state.toggle_candidate(a).unwrap();
        state
    }

    // ───────────────────────────────────────────────────────────────
    // Gating
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn outcomes_gate_requires_at_least_one_outcome() {
        let state = DecisionState::new();
        assert!(!StepFlow::can_advance(&state, Step::Outcomes));
    }

    #[test]
    fn outcomes_gate_requires_substantial_first_what() {
        let mut state = DecisionState::new();
        state.add_outcome("abc", "three chars is too short").unwrap();
        assert!(!StepFlow::can_advance(&state, Step::Outcomes));

        state.reset();
        state.add_outcome("abcd", "").unwrap();
        assert!(StepFlow::can_advance(&state, Step::Outcomes));
    }

    #[test]
    fn outcomes_gate_checks_only_the_first_outcome() {
        let mut state = DecisionState::new();
        state.add_outcome("ab", "too short").unwrap();
        state.add_outcome("a perfectly long outcome", "").unwrap();
        assert!(!StepFlow::can_advance(&state, Step::Outcomes));
    }

    #[test]
    fn outcomes_gate_counts_chars_not_bytes() {
        let mut state = DecisionState::new();
        // Four characters, more than four bytes.
        state.add_outcome("日本語で", "").unwrap();
        assert!(StepFlow::can_advance(&state, Step::Outcomes));
    }

    #[test]
    fn options_gate_requires_two_options() {
        let mut state = DecisionState::new();
        state.add_option("Only one").unwrap();
        assert!(!StepFlow::can_advance(&state, Step::Options));

        state.add_option("A second").unwrap();
        assert!(StepFlow::can_advance(&state, Step::Options));
    }

    #[test]
    fn consequences_and_mitigate_gates_are_open() {
        let state = DecisionState::new();
        assert!(StepFlow::can_advance(&state, Step::Consequences));
        assert!(StepFlow::can_advance(&state, Step::Mitigate));
    }

    #[test]
    fn evaluate_gate_requires_a_candidate() {
        let mut state = DecisionState::new();
        let id = state.add_option("Pick me").unwrap();
        assert!(!StepFlow::can_advance(&state, Step::Evaluate));

        state.toggle_candidate(id).unwrap();
        assert!(StepFlow::can_advance(&state, Step::Evaluate));
    }

    #[test]
    fn resolve_never_advances() {
        let state = state_ready_through_evaluate();
        assert!(!StepFlow::can_advance(&state, Step::Resolve));
        assert_eq!(StepFlow::advance(&state, Step::Resolve), Step::Resolve);
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn advance_stays_put_when_gate_fails() {
        let state = DecisionState::new();
        assert_eq!(StepFlow::advance(&state, Step::Outcomes), Step::Outcomes);
        assert_eq!(StepFlow::advance(&state, Step::Options), Step::Options);
        assert_eq!(StepFlow::advance(&state, Step::Evaluate), Step::Evaluate);
    }

    #[test]
    fn advance_walks_the_full_sequence_when_gates_pass() {
        let state = state_ready_through_evaluate();
        let mut step = Step::Outcomes;
        for expected in [
            Step::Options,
            Step::Consequences,
            Step::Evaluate,
            Step::Mitigate,
            Step::Resolve,
        ] {
            step = StepFlow::advance(&state, step);
            assert_eq!(step, expected);
        }
    }

    #[test]
    fn retreat_is_unconditional_and_stops_at_the_first_stage() {
        assert_eq!(StepFlow::retreat(Step::Resolve), Step::Mitigate);
        assert_eq!(StepFlow::retreat(Step::Options), Step::Outcomes);
        assert_eq!(StepFlow::retreat(Step::Outcomes), Step::Outcomes);
    }

    #[test]
    fn retreat_loses_no_data() {
        let state = state_ready_through_evaluate();
        let before = state.clone();
        let _ = StepFlow::retreat(Step::Evaluate);
        assert_eq!(state, before);
    }

    // ───────────────────────────────────────────────────────────────
    // Resolve phase
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn resolve_phase_follows_the_final_decision() {
        let mut state = state_ready_through_evaluate();
        assert_eq!(StepFlow::resolve_phase(&state), ResolvePhase::Selection);

        let id = state.candidate_option_ids()[0];
        state.set_final_decision(Some(id), None).unwrap();
        assert_eq!(StepFlow::resolve_phase(&state), ResolvePhase::Commitment);

        state.set_final_decision(None, None).unwrap();
        assert_eq!(StepFlow::resolve_phase(&state), ResolvePhase::Selection);
    }
}
