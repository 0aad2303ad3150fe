//! Integration tests for the decision session.
//!
//! These tests drive the wizard end-to-end:
//! 1. Build a decision through every stage gate (outcomes to resolve)
//! 2. Persist write-through to a real file store in a temp directory
//! 3. Reload from the store and verify the snapshot round-trip
//! 4. Exercise the AI suggestion flows against the mock provider
//!
//! Degraded-path scenarios use the in-memory store's failure switch.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use decision_master::adapters::ai::MockAiProvider;
use decision_master::adapters::document::RecordGenerator;
use decision_master::adapters::storage::{FileStateStore, InMemoryStateStore};
use decision_master::application::{DecisionSession, SuggestionService};
use decision_master::domain::decision::{net_score, ConsequenceKind, MitigationKind};
use decision_master::domain::flow::ResolvePhase;
use decision_master::domain::foundation::{Score, Step};

const KEY: &str = "decision_master_data";

// =============================================================================
// Full wizard walk
// =============================================================================

#[tokio::test]
async fn full_wizard_walk_with_reload() {
    let dir = TempDir::new().unwrap();
    let store = FileStateStore::new(dir.path());

    let mut session = DecisionSession::open(Arc::new(store.clone()), KEY).await;
    assert_eq!(session.step(), Step::Outcomes);
    assert!(!session.can_proceed());

    // OUTCOMES: the gate needs a described first outcome.
    session
        .add_outcome(
            "Work for myself within a year",
            "Autonomy matters more than salary",
        )
        .await
        .unwrap();
    session
        .add_outcome("Keep six months of runway", "")
        .await
        .unwrap();
    assert!(session.can_proceed());
    assert_eq!(session.next_step(), Step::Options);

    // OPTIONS: the gate needs at least two.
    let quit = session.add_option("Quit and go all in").await.unwrap();
    assert!(!session.can_proceed());
    let side = session.add_option("Build on the side").await.unwrap();
    let stay = session.add_option("Stay and renegotiate").await.unwrap();
    assert!(session.can_proceed());
    assert_eq!(session.next_step(), Step::Consequences);

    // CONSEQUENCES: free passage, but weigh everything.
    session
        .add_consequence(quit, "Full focus", ConsequenceKind::Upside, Score::new(9))
        .await
        .unwrap();
    session
        .add_consequence(
            quit,
            "Burns savings fast",
            ConsequenceKind::Downside,
            Score::new(8),
        )
        .await
        .unwrap();
    session
        .add_consequence(side, "Keeps the salary", ConsequenceKind::Upside, Score::new(7))
        .await
        .unwrap();
    session
        .add_consequence(side, "Slow progress", ConsequenceKind::Downside, Score::new(4))
        .await
        .unwrap();
    session
        .add_consequence(stay, "Zero risk", ConsequenceKind::Upside, Score::new(3))
        .await
        .unwrap();
    session
        .add_consequence(stay, "Nothing changes", ConsequenceKind::Downside, Score::new(6))
        .await
        .unwrap();
    assert_eq!(session.next_step(), Step::Evaluate);

    // EVALUATE: the gate needs a shortlist.
    assert!(!session.can_proceed());
    session.toggle_candidate(side).await.unwrap();
    session.toggle_candidate(quit).await.unwrap();
    assert!(session.can_proceed());
    assert_eq!(session.next_step(), Step::Mitigate);

    // MITIGATE: plan against the leading option's downsides.
    session
        .set_mitigation_plan(
            side,
            Some("Block two fixed evenings a week and one weekend day.".to_string()),
        )
        .await
        .unwrap();
    session
        .add_mitigation_item(side, MitigationKind::Upside, "Sustainable pace")
        .await
        .unwrap();
    session
        .add_mitigation_item(side, MitigationKind::Downside, "Less family time")
        .await
        .unwrap();
    assert_eq!(session.next_step(), Step::Resolve);

    // RESOLVE: select, then commit.
    assert_eq!(session.resolve_phase(), ResolvePhase::Selection);
    session
        .set_final_decision(
            Some(side),
            Some("The math works without touching the runway.".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(session.resolve_phase(), ResolvePhase::Commitment);

    // The last stage is terminal.
    assert!(!session.can_proceed());
    assert_eq!(session.next_step(), Step::Resolve);

    // The complete state is intact.
    let state = session.state();
    assert_eq!(state.outcomes().len(), 2);
    assert_eq!(state.options().len(), 3);
    assert_eq!(state.candidate_option_ids(), &[side, quit]);
    assert_eq!(state.final_decision_id(), Some(side));
    assert_eq!(
        state.commitment_reason(),
        Some("The math works without touching the runway.")
    );
    assert_eq!(net_score(state.option(side).unwrap()), 3);

    // The record reflects the commitment.
    let record = RecordGenerator::new().generate(state);
    assert!(record.contains("# Decision Record"));
    assert!(record.contains("**Build on the side**"));
    assert!(record.contains("The math works without touching the runway."));

    // Reload from the same store: data survives, the stage resets.
    let reloaded = DecisionSession::open(Arc::new(store), KEY).await;
    assert_eq!(reloaded.step(), Step::Outcomes);
    assert_eq!(reloaded.state(), session.state());
}

// =============================================================================
// Suggestion flows against the mock provider
// =============================================================================

#[tokio::test]
async fn suggestion_flows_survive_a_reload() {
    let dir = TempDir::new().unwrap();
    let store = FileStateStore::new(dir.path());
    let mut session = DecisionSession::open(Arc::new(store.clone()), KEY).await;

    session
        .add_outcome("Grow recurring revenue", "Stability")
        .await
        .unwrap();

    // Queued in call order: brainstorm, consequence autofill, then the
    // two-step mitigation draft.
    let provider = MockAiProvider::new()
        .with_json_response(json!(["Launch a subscription", "Raise prices"]))
        .with_json_response(json!({
            "upsides": ["Predictable income"],
            "downsides": ["Churn risk"]
        }))
        .with_response("Offer annual plans to reduce churn.")
        .with_json_response(json!({
            "upsides": ["Locks in revenue"],
            "downsides": ["Refund exposure"]
        }));
    let oracle = SuggestionService::new(Arc::new(provider));

    let added = session.brainstorm_options(&oracle).await;
    assert_eq!(added, 2);

    let first = session.state().options()[0].id();
    let filled = session.autofill_consequences(&oracle, first).await.unwrap();
    assert_eq!(filled, 2);

    session.toggle_candidate(first).await.unwrap();
    let drafted = session.draft_mitigation(&oracle, first).await.unwrap();
    assert!(drafted);

    let reloaded = DecisionSession::open(Arc::new(store), KEY).await;
    let option = reloaded.state().option(first).unwrap();
    assert_eq!(option.title(), "Launch a subscription");
    assert_eq!(option.consequences().len(), 2);
    for c in option.consequences() {
        assert_eq!(c.score(), Score::DEFAULT_SUGGESTED);
    }
    assert_eq!(
        option.mitigation_plan(),
        Some("Offer annual plans to reduce churn.")
    );
    assert_eq!(option.mitigation_upsides().len(), 1);
    assert_eq!(option.mitigation_downsides().len(), 1);
}

// =============================================================================
// Degraded paths
// =============================================================================

#[tokio::test]
async fn failing_store_never_blocks_the_wizard() {
    let store = InMemoryStateStore::new();
    let mut session = DecisionSession::open(Arc::new(store.clone()), KEY).await;

    session.add_outcome("Stay usable offline", "").await.unwrap();
    store.set_failing(true);

    // Every write fails, every mutation still applies in memory.
    let a = session.add_option("Option A").await.unwrap();
    session.add_option("Option B").await.unwrap();
    session
        .add_consequence(a, "Works anyway", ConsequenceKind::Upside, Score::new(6))
        .await
        .unwrap();
    session.toggle_candidate(a).await.unwrap();

    assert_eq!(session.state().options().len(), 2);
    assert_eq!(session.next_step(), Step::Options);

    // Recovery: the next successful write captures the whole state.
    store.set_failing(false);
    session
        .set_final_decision(Some(a), Some("Committed".to_string()))
        .await
        .unwrap();

    let reloaded = DecisionSession::open(Arc::new(store), KEY).await;
    assert_eq!(reloaded.state().options().len(), 2);
    assert_eq!(reloaded.state().final_decision_id(), Some(a));
    assert_eq!(reloaded.state().commitment_reason(), Some("Committed"));
}

#[tokio::test]
async fn corrupt_file_on_disk_starts_fresh() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", KEY)), b"{not json at all").unwrap();
    let store = FileStateStore::new(dir.path());

    let session = DecisionSession::open(Arc::new(store), KEY).await;

    assert!(session.state().is_empty());
    assert_eq!(session.step(), Step::Outcomes);
}

#[tokio::test]
async fn reset_wipes_the_slot_for_the_next_session() {
    let dir = TempDir::new().unwrap();
    let store = FileStateStore::new(dir.path());

    let mut session = DecisionSession::open(Arc::new(store.clone()), KEY).await;
    session.add_outcome("Soon to be gone", "").await.unwrap();
    session.reset().await;

    let reloaded = DecisionSession::open(Arc::new(store), KEY).await;
    assert!(reloaded.state().is_empty());
}
