//! Decision session.
//!
//! `DecisionSession` is the controller a front-end talks to: it owns the
//! in-memory `DecisionState` and the current wizard stage, wraps every
//! mutation operation with write-through persistence, and drives stage
//! navigation through `StepFlow`.
//!
//! # Design
//!
//! - State lives in the session struct, never in a global. Persistence
//!   goes through an injected `Arc<dyn StateStore>`.
//! - Mutations return the domain `Result` unchanged so the front-end can
//!   surface rejections (e.g. the candidate limit).
//! - Persistence failures are logged and swallowed. The session stays
//!   fully usable on its in-memory state; the next successful write
//!   captures everything, since snapshots are whole-state.
//! - Only decision data is persisted. A reopened session always starts
//!   at the first stage.

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::suggestion_service::SuggestionService;
use crate::domain::decision::{
    ConsequenceKind, DecisionError, DecisionState, MitigationKind, Snapshot,
};
use crate::domain::flow::{ResolvePhase, StepFlow};
use crate::domain::foundation::{
    ConsequenceId, MitigationItemId, OptionId, OutcomeId, Score, Step,
};
use crate::ports::StateStore;

/// Owned-state wizard controller with write-through persistence.
pub struct DecisionSession {
    state: DecisionState,
    step: Step,
    store: Arc<dyn StateStore>,
    key: String,
}

impl DecisionSession {
    /// Opens a session over the given storage slot.
    ///
    /// An absent slot simply starts fresh. Unreadable stores and
    /// unparsable bytes degrade to an empty state with a warning; a
    /// decision tool must never refuse to start over its own data.
    pub async fn open(store: Arc<dyn StateStore>, key: impl Into<String>) -> Self {
        let key = key.into();

        let state = match store.read(&key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Snapshot>(&bytes) {
                Ok(snapshot) => snapshot.restore(),
                Err(e) => {
                    tracing::warn!(error = %e, key = %key, "Stored snapshot is unreadable, starting fresh");
                    DecisionState::default()
                }
            },
            Ok(None) => DecisionState::default(),
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Could not read stored state, starting fresh");
                DecisionState::default()
            }
        };

        Self {
            state,
            step: Step::Outcomes,
            store,
            key,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    /// Returns the current decision state.
    pub fn state(&self) -> &DecisionState {
        &self.state
    }

    /// Returns the current wizard stage.
    pub fn step(&self) -> Step {
        self.step
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    /// Returns true when the current stage's forward gate is satisfied.
    pub fn can_proceed(&self) -> bool {
        StepFlow::can_advance(&self.state, self.step)
    }

    /// Advances one stage when the gate allows it. Returns the stage the
    /// session is on afterwards.
    pub fn next_step(&mut self) -> Step {
        self.step = StepFlow::advance(&self.state, self.step);
        self.step
    }

    /// Retreats one stage. Always allowed and never discards data.
    pub fn previous_step(&mut self) -> Step {
        self.step = StepFlow::retreat(self.step);
        self.step
    }

    /// Derives how the final stage currently presents.
    pub fn resolve_phase(&self) -> ResolvePhase {
        StepFlow::resolve_phase(&self.state)
    }

    // ───────────────────────────────────────────────────────────────
    // Mutation operations (write-through)
    // ───────────────────────────────────────────────────────────────

    /// Adds a desired outcome.
    pub async fn add_outcome(
        &mut self,
        what: impl Into<String>,
        why: impl Into<String>,
    ) -> Result<OutcomeId, DecisionError> {
        let id = self.state.add_outcome(what, why)?;
        self.persist().await;
        Ok(id)
    }

    /// Removes an outcome.
    pub async fn remove_outcome(&mut self, id: OutcomeId) -> Result<(), DecisionError> {
        self.state.remove_outcome(id)?;
        self.persist().await;
        Ok(())
    }

    /// Adds an option.
    pub async fn add_option(
        &mut self,
        title: impl Into<String>,
    ) -> Result<OptionId, DecisionError> {
        let id = self.state.add_option(title)?;
        self.persist().await;
        Ok(id)
    }

    /// Removes an option and every reference to it.
    pub async fn remove_option(&mut self, id: OptionId) -> Result<(), DecisionError> {
        self.state.remove_option(id)?;
        self.persist().await;
        Ok(())
    }

    /// Adds a consequence to an option.
    pub async fn add_consequence(
        &mut self,
        option_id: OptionId,
        text: impl Into<String>,
        kind: ConsequenceKind,
        score: Score,
    ) -> Result<ConsequenceId, DecisionError> {
        let id = self.state.add_consequence(option_id, text, kind, score)?;
        self.persist().await;
        Ok(id)
    }

    /// Removes a consequence from an option.
    pub async fn remove_consequence(
        &mut self,
        option_id: OptionId,
        consequence_id: ConsequenceId,
    ) -> Result<(), DecisionError> {
        self.state.remove_consequence(option_id, consequence_id)?;
        self.persist().await;
        Ok(())
    }

    /// Toggles an option on or off the candidate shortlist.
    pub async fn toggle_candidate(&mut self, option_id: OptionId) -> Result<(), DecisionError> {
        self.state.toggle_candidate(option_id)?;
        self.persist().await;
        Ok(())
    }

    /// Sets or clears an option's mitigation plan.
    pub async fn set_mitigation_plan(
        &mut self,
        option_id: OptionId,
        plan: Option<String>,
    ) -> Result<(), DecisionError> {
        self.state.set_mitigation_plan(option_id, plan)?;
        self.persist().await;
        Ok(())
    }

    /// Adds a second-order note about an option's mitigation plan.
    pub async fn add_mitigation_item(
        &mut self,
        option_id: OptionId,
        kind: MitigationKind,
        text: impl Into<String>,
    ) -> Result<MitigationItemId, DecisionError> {
        let id = self.state.add_mitigation_item(option_id, kind, text)?;
        self.persist().await;
        Ok(id)
    }

    /// Removes a mitigation note.
    pub async fn remove_mitigation_item(
        &mut self,
        option_id: OptionId,
        kind: MitigationKind,
        item_id: MitigationItemId,
    ) -> Result<(), DecisionError> {
        self.state.remove_mitigation_item(option_id, kind, item_id)?;
        self.persist().await;
        Ok(())
    }

    /// Commits to an option, or clears the commitment.
    pub async fn set_final_decision(
        &mut self,
        option_id: Option<OptionId>,
        reason: Option<String>,
    ) -> Result<(), DecisionError> {
        self.state.set_final_decision(option_id, reason)?;
        self.persist().await;
        Ok(())
    }

    /// Discards everything and returns to the first stage. The storage
    /// slot is deleted outright rather than overwritten with an empty
    /// snapshot.
    pub async fn reset(&mut self) {
        self.state.reset();
        self.step = Step::Outcomes;
        if let Err(e) = self.store.delete(&self.key).await {
            tracing::warn!(error = %e, key = %self.key, "Failed to delete stored state");
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Suggestion flows
    // ───────────────────────────────────────────────────────────────

    /// Asks the oracle for option titles and adds the new ones.
    ///
    /// Titles matching an existing option (case-insensitive) are skipped.
    /// Returns how many options were added; zero when the oracle had
    /// nothing or everything was a duplicate.
    pub async fn brainstorm_options(&mut self, suggestions: &SuggestionService) -> usize {
        let titles = suggestions.suggest_options(self.state.outcomes()).await;
        if titles.is_empty() {
            return 0;
        }

        let mut seen: HashSet<String> = self
            .state
            .options()
            .iter()
            .map(|o| o.title().trim().to_lowercase())
            .collect();

        let mut added = 0;
        for title in titles {
            if !seen.insert(title.trim().to_lowercase()) {
                continue;
            }
            if self.state.add_option(title).is_ok() {
                added += 1;
            }
        }

        if added > 0 {
            self.persist().await;
        }
        added
    }

    /// Asks the oracle to fill in an untouched option's consequences.
    ///
    /// Does nothing when the option already has consequences; suggested
    /// entries never overwrite what the user typed. Suggested entries
    /// carry `Score::DEFAULT_SUGGESTED`. Returns how many consequences
    /// were added.
    pub async fn autofill_consequences(
        &mut self,
        suggestions: &SuggestionService,
        option_id: OptionId,
    ) -> Result<usize, DecisionError> {
        let option = self
            .state
            .option(option_id)
            .ok_or(DecisionError::OptionNotFound(option_id))?;

        if !option.consequences().is_empty() {
            return Ok(0);
        }

        let title = option.title().to_string();
        let analysis = suggestions
            .analyze_consequences(&title, self.state.outcomes())
            .await;

        let mut added = 0;
        for text in analysis.upsides {
            self.state.add_consequence(
                option_id,
                text,
                ConsequenceKind::Upside,
                Score::DEFAULT_SUGGESTED,
            )?;
            added += 1;
        }
        for text in analysis.downsides {
            self.state.add_consequence(
                option_id,
                text,
                ConsequenceKind::Downside,
                Score::DEFAULT_SUGGESTED,
            )?;
            added += 1;
        }

        if added > 0 {
            self.persist().await;
        }
        Ok(added)
    }

    /// Asks the oracle to draft a mitigation plan for an option, then
    /// analyze that plan's own upsides and downsides.
    ///
    /// A redraft replaces the previous plan and its analysis. Returns
    /// false without touching anything when the oracle has no plan to
    /// offer.
    pub async fn draft_mitigation(
        &mut self,
        suggestions: &SuggestionService,
        option_id: OptionId,
    ) -> Result<bool, DecisionError> {
        let option = self
            .state
            .option(option_id)
            .ok_or(DecisionError::OptionNotFound(option_id))?;

        let title = option.title().to_string();
        let downsides: Vec<String> = option
            .downsides()
            .iter()
            .map(|c| c.text().to_string())
            .collect();
        let stale: Vec<(MitigationKind, MitigationItemId)> = option
            .mitigation_upsides()
            .iter()
            .map(|item| (MitigationKind::Upside, item.id()))
            .chain(
                option
                    .mitigation_downsides()
                    .iter()
                    .map(|item| (MitigationKind::Downside, item.id())),
            )
            .collect();

        let plan = match suggestions.suggest_mitigation(&title, &downsides).await {
            Some(plan) => plan,
            None => return Ok(false),
        };

        for (kind, item_id) in stale {
            self.state.remove_mitigation_item(option_id, kind, item_id)?;
        }
        self.state.set_mitigation_plan(option_id, Some(plan.clone()))?;

        let analysis = suggestions.analyze_mitigation_plan(&plan).await;
        for text in analysis.upsides {
            self.state
                .add_mitigation_item(option_id, MitigationKind::Upside, text)?;
        }
        for text in analysis.downsides {
            self.state
                .add_mitigation_item(option_id, MitigationKind::Downside, text)?;
        }

        self.persist().await;
        Ok(true)
    }

    // ───────────────────────────────────────────────────────────────
    // Persistence
    // ───────────────────────────────────────────────────────────────

    /// Captures and writes the current state. Failures are logged and
    /// swallowed; the in-memory state is the source of truth.
    async fn persist(&self) {
        let snapshot = Snapshot::capture(&self.state);
        let bytes = match serde_json::to_vec(&snapshot) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize decision state");
                return;
            }
        };

        if let Err(e) = self.store.write(&self.key, &bytes).await {
            tracing::warn!(error = %e, key = %self.key, "Failed to persist decision state");
        }
    }
}
