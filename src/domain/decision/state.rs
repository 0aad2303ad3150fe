//! DecisionState aggregate - the root entity for a single decision.
//!
//! Owns the outcomes, the options with their consequences and mitigation
//! data, the candidate shortlist, and the final commitment. Every mutation
//! validates before writing, so a rejected call leaves the state untouched.

use crate::domain::foundation::{ConsequenceId, MitigationItemId, OptionId, OutcomeId, Score};

use super::{
    Consequence, ConsequenceKind, DecisionError, DecisionOption, MitigationAnalysis,
    MitigationKind, Outcome,
};

/// Maximum number of options that can be shortlisted for the mitigation round.
pub const MAX_CANDIDATES: usize = 2;

/// The complete state of one decision in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionState {
    outcomes: Vec<Outcome>,
    options: Vec<DecisionOption>,
    candidate_option_ids: Vec<OptionId>,
    final_decision_id: Option<OptionId>,
    commitment_reason: Option<String>,
}

impl DecisionState {
    /// Creates an empty decision state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstitutes a state from restored parts. Callers are responsible
    /// for referential integrity (see `Snapshot::restore`).
    pub(crate) fn reconstitute(
        outcomes: Vec<Outcome>,
        options: Vec<DecisionOption>,
        candidate_option_ids: Vec<OptionId>,
        final_decision_id: Option<OptionId>,
        commitment_reason: Option<String>,
    ) -> Self {
        Self {
            outcomes,
            options,
            candidate_option_ids,
            final_decision_id,
            commitment_reason,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    /// Returns all outcomes in insertion order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Returns all options in insertion order.
    pub fn options(&self) -> &[DecisionOption] {
        &self.options
    }

    /// Returns the shortlisted option ids in selection order.
    pub fn candidate_option_ids(&self) -> &[OptionId] {
        &self.candidate_option_ids
    }

    /// Returns the committed option id, if any.
    pub fn final_decision_id(&self) -> Option<OptionId> {
        self.final_decision_id
    }

    /// Returns the commitment reason, if any.
    pub fn commitment_reason(&self) -> Option<&str> {
        self.commitment_reason.as_deref()
    }

    /// Looks up an outcome by id.
    pub fn outcome(&self, id: OutcomeId) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.id() == id)
    }

    /// Looks up an option by id.
    pub fn option(&self, id: OptionId) -> Option<&DecisionOption> {
        self.options.iter().find(|o| o.id() == id)
    }

    /// Returns true if the option is on the candidate shortlist.
    pub fn is_candidate(&self, id: OptionId) -> bool {
        self.candidate_option_ids.contains(&id)
    }

    /// Returns the shortlisted options in selection order.
    pub fn candidates(&self) -> Vec<&DecisionOption> {
        self.candidate_option_ids
            .iter()
            .filter_map(|id| self.option(*id))
            .collect()
    }

    /// Returns the committed option, if any.
    pub fn final_decision(&self) -> Option<&DecisionOption> {
        self.final_decision_id.and_then(|id| self.option(id))
    }

    /// Returns true when nothing has been entered yet.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    // ───────────────────────────────────────────────────────────────
    // Outcome operations
    // ───────────────────────────────────────────────────────────────

    /// Adds a desired outcome. Rejects an empty `what`.
    pub fn add_outcome(
        &mut self,
        what: impl Into<String>,
        why: impl Into<String>,
    ) -> Result<OutcomeId, DecisionError> {
        let outcome = Outcome::new(what, why)?;
        let id = outcome.id();
        self.outcomes.push(outcome);
        Ok(id)
    }

    /// Removes an outcome by id. No-op when the id is unknown.
    pub fn remove_outcome(&mut self, id: OutcomeId) -> Result<(), DecisionError> {
        self.outcomes.retain(|o| o.id() != id);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Option operations
    // ───────────────────────────────────────────────────────────────

    /// Adds an option. Rejects an empty title.
    pub fn add_option(&mut self, title: impl Into<String>) -> Result<OptionId, DecisionError> {
        let option = DecisionOption::new(title)?;
        let id = option.id();
        self.options.push(option);
        Ok(id)
    }

    /// Removes an option and cascades: the id leaves the candidate list,
    /// and a final decision pointing at it is cleared along with the
    /// commitment reason. No-op when the id is unknown.
    pub fn remove_option(&mut self, id: OptionId) -> Result<(), DecisionError> {
        self.options.retain(|o| o.id() != id);
        self.candidate_option_ids.retain(|c| *c != id);
        if self.final_decision_id == Some(id) {
            self.final_decision_id = None;
            self.commitment_reason = None;
        }
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Consequence operations
    // ───────────────────────────────────────────────────────────────

    /// Attaches a weighted consequence to an option.
    pub fn add_consequence(
        &mut self,
        option_id: OptionId,
        text: impl Into<String>,
        kind: ConsequenceKind,
        score: Score,
    ) -> Result<ConsequenceId, DecisionError> {
        let consequence = Consequence::new(text, kind, score)?;
        let id = consequence.id();
        let option = self.option_mut(option_id)?;
        option.push_consequence(consequence);
        Ok(id)
    }

    /// Removes a consequence. No-op when either id is unknown.
    pub fn remove_consequence(
        &mut self,
        option_id: OptionId,
        consequence_id: ConsequenceId,
    ) -> Result<(), DecisionError> {
        if let Some(option) = self.options.iter_mut().find(|o| o.id() == option_id) {
            option.remove_consequence(consequence_id);
        }
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Candidate operations
    // ───────────────────────────────────────────────────────────────

    /// Toggles an option's membership on the candidate shortlist.
    ///
    /// Adding a third candidate is rejected with `CandidateLimitReached`.
    /// Removing a candidate that is the final decision clears the decision
    /// and the commitment reason.
    pub fn toggle_candidate(&mut self, option_id: OptionId) -> Result<(), DecisionError> {
        if self.option(option_id).is_none() {
            return Err(DecisionError::option_not_found(option_id));
        }

        if self.is_candidate(option_id) {
            self.candidate_option_ids.retain(|c| *c != option_id);
            if self.final_decision_id == Some(option_id) {
                self.final_decision_id = None;
                self.commitment_reason = None;
            }
            return Ok(());
        }

        if self.candidate_option_ids.len() >= MAX_CANDIDATES {
            return Err(DecisionError::candidate_limit_reached());
        }
        self.candidate_option_ids.push(option_id);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Mitigation operations
    // ───────────────────────────────────────────────────────────────

    /// Sets or clears an option's mitigation plan. Blank text clears.
    pub fn set_mitigation_plan(
        &mut self,
        option_id: OptionId,
        plan: Option<String>,
    ) -> Result<(), DecisionError> {
        let option = self.option_mut(option_id)?;
        option.set_mitigation_plan(plan);
        Ok(())
    }

    /// Adds a second-order note about an option's mitigation plan.
    pub fn add_mitigation_item(
        &mut self,
        option_id: OptionId,
        kind: MitigationKind,
        text: impl Into<String>,
    ) -> Result<MitigationItemId, DecisionError> {
        let item = MitigationAnalysis::new(text)?;
        let id = item.id();
        let option = self.option_mut(option_id)?;
        option.push_mitigation_item(kind, item);
        Ok(id)
    }

    /// Removes a mitigation note. No-op when either id is unknown.
    pub fn remove_mitigation_item(
        &mut self,
        option_id: OptionId,
        kind: MitigationKind,
        item_id: MitigationItemId,
    ) -> Result<(), DecisionError> {
        if let Some(option) = self.options.iter_mut().find(|o| o.id() == option_id) {
            option.remove_mitigation_item(kind, item_id);
        }
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Resolution operations
    // ───────────────────────────────────────────────────────────────

    /// Commits to an option, or clears the commitment.
    ///
    /// `Some(id)` requires the option to exist and to be a candidate. When
    /// `reason` is `Some`, it replaces the commitment reason (blank text
    /// clears it); `None` leaves the existing reason alone. Passing a
    /// `None` id clears both the decision and the reason.
    pub fn set_final_decision(
        &mut self,
        option_id: Option<OptionId>,
        reason: Option<String>,
    ) -> Result<(), DecisionError> {
        match option_id {
            Some(id) => {
                if self.option(id).is_none() {
                    return Err(DecisionError::option_not_found(id));
                }
                if !self.is_candidate(id) {
                    return Err(DecisionError::not_a_candidate(id));
                }
                self.final_decision_id = Some(id);
                if let Some(reason) = reason {
                    self.commitment_reason =
                        Some(reason).filter(|r| !r.trim().is_empty());
                }
            }
            None => {
                self.final_decision_id = None;
                self.commitment_reason = None;
            }
        }
        Ok(())
    }

    /// Discards everything and starts over.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn option_mut(&mut self, id: OptionId) -> Result<&mut DecisionOption, DecisionError> {
        self.options
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or(DecisionError::OptionNotFound(id))
    }
}
