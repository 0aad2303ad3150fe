//! Versioned snapshot of the decision state.
//!
//! The snapshot is the only wire format for persistence. Restore is total:
//! any snapshot value produces a valid `DecisionState`, dropping entries
//! that fail validation rather than failing the load. The loaded shape is
//! never trusted - candidate references are re-checked and scores
//! re-clamped, with blank text normalized away.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ConsequenceId, MitigationItemId, OptionId, OutcomeId, Score, Timestamp,
};

use super::state::MAX_CANDIDATES;
use super::{
    Consequence, ConsequenceKind, DecisionOption, DecisionState, MitigationAnalysis, Outcome,
};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 2;

fn legacy_version() -> u32 {
    1
}

/// Serialized form of a `DecisionState`, tolerant of missing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version; payloads without one predate versioning.
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(default)]
    pub saved_at: Timestamp,
    #[serde(default)]
    pub outcomes: Vec<OutcomeSnapshot>,
    #[serde(default)]
    pub options: Vec<OptionSnapshot>,
    #[serde(default)]
    pub candidate_option_ids: Vec<OptionId>,
    #[serde(default)]
    pub final_decision_id: Option<OptionId>,
    #[serde(default)]
    pub commitment_reason: Option<String>,
    /// Version-1 payloads stored the single shortlisted option here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option_id: Option<OptionId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeSnapshot {
    #[serde(default)]
    pub id: OutcomeId,
    #[serde(default)]
    pub what: String,
    #[serde(default)]
    pub why: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSnapshot {
    #[serde(default)]
    pub id: OptionId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub consequences: Vec<ConsequenceSnapshot>,
    #[serde(default)]
    pub mitigation_plan: Option<String>,
    #[serde(default)]
    pub mitigation_upsides: Vec<MitigationItemSnapshot>,
    #[serde(default)]
    pub mitigation_downsides: Vec<MitigationItemSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsequenceSnapshot {
    #[serde(default)]
    pub id: ConsequenceId,
    #[serde(default)]
    pub text: String,
    /// Stored as a string so an unrecognized kind drops only this entry.
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigationItemSnapshot {
    #[serde(default)]
    pub id: MitigationItemId,
    #[serde(default)]
    pub text: String,
}

impl Snapshot {
    /// Captures the current state under the current schema version.
    pub fn capture(state: &DecisionState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Timestamp::now(),
            outcomes: state
                .outcomes()
                .iter()
                .map(|o| OutcomeSnapshot {
                    id: o.id(),
                    what: o.what().to_string(),
                    why: o.why().to_string(),
                })
                .collect(),
            options: state.options().iter().map(capture_option).collect(),
            candidate_option_ids: state.candidate_option_ids().to_vec(),
            final_decision_id: state.final_decision_id(),
            commitment_reason: state.commitment_reason().map(str::to_string),
            selected_option_id: None,
        }
    }

    /// Rebuilds a valid `DecisionState`, merging defaults over anything
    /// missing and dropping anything broken.
    pub fn restore(self) -> DecisionState {
        let outcomes: Vec<Outcome> = self
            .outcomes
            .into_iter()
            .filter(|o| !o.what.trim().is_empty())
            .map(|o| Outcome::reconstitute(o.id, o.what, o.why))
            .collect();

        let options: Vec<DecisionOption> = self
            .options
            .into_iter()
            .filter(|o| !o.title.trim().is_empty())
            .map(restore_option)
            .collect();

        // A version-1 payload promotes its single selection to the list.
        let mut candidate_ids = self.candidate_option_ids;
        if candidate_ids.is_empty() {
            if let Some(legacy) = self.selected_option_id {
                candidate_ids.push(legacy);
            }
        }

        let existing: HashSet<OptionId> = options.iter().map(|o| o.id()).collect();
        let mut seen = HashSet::new();
        candidate_ids.retain(|id| existing.contains(id) && seen.insert(*id));
        candidate_ids.truncate(MAX_CANDIDATES);

        let final_decision_id = self
            .final_decision_id
            .filter(|id| candidate_ids.contains(id));
        let commitment_reason = if final_decision_id.is_some() {
            self.commitment_reason.filter(|r| !r.trim().is_empty())
        } else {
            None
        };

        DecisionState::reconstitute(
            outcomes,
            options,
            candidate_ids,
            final_decision_id,
            commitment_reason,
        )
    }
}

fn capture_option(option: &DecisionOption) -> OptionSnapshot {
    OptionSnapshot {
        id: option.id(),
        title: option.title().to_string(),
        description: option.description().to_string(),
        consequences: option
            .consequences()
            .iter()
            .map(|c| ConsequenceSnapshot {
                id: c.id(),
                text: c.text().to_string(),
                kind: kind_tag(c.kind()).to_string(),
                score: i64::from(c.score().value()),
            })
            .collect(),
        mitigation_plan: option.mitigation_plan().map(str::to_string),
        mitigation_upsides: capture_items(option.mitigation_upsides()),
        mitigation_downsides: capture_items(option.mitigation_downsides()),
    }
}

fn capture_items(items: &[MitigationAnalysis]) -> Vec<MitigationItemSnapshot> {
    items
        .iter()
        .map(|item| MitigationItemSnapshot {
            id: item.id(),
            text: item.text().to_string(),
        })
        .collect()
}

fn restore_option(snapshot: OptionSnapshot) -> DecisionOption {
    let consequences = snapshot
        .consequences
        .into_iter()
        .filter_map(restore_consequence)
        .collect();
    let mitigation_upsides = restore_items(snapshot.mitigation_upsides);
    let mitigation_downsides = restore_items(snapshot.mitigation_downsides);
    DecisionOption::reconstitute(
        snapshot.id,
        snapshot.title,
        snapshot.description,
        consequences,
        snapshot.mitigation_plan.filter(|p| !p.trim().is_empty()),
        mitigation_upsides,
        mitigation_downsides,
    )
}

fn restore_consequence(snapshot: ConsequenceSnapshot) -> Option<Consequence> {
    if snapshot.text.trim().is_empty() {
        return None;
    }
    let kind = parse_kind(&snapshot.kind)?;
    Some(Consequence::reconstitute(
        snapshot.id,
        snapshot.text,
        kind,
        clamp_score(snapshot.score),
    ))
}

fn restore_items(items: Vec<MitigationItemSnapshot>) -> Vec<MitigationAnalysis> {
    items
        .into_iter()
        .filter(|item| !item.text.trim().is_empty())
        .map(|item| MitigationAnalysis::reconstitute(item.id, item.text))
        .collect()
}

fn kind_tag(kind: ConsequenceKind) -> &'static str {
    match kind {
        ConsequenceKind::Upside => "upside",
        ConsequenceKind::Downside => "downside",
    }
}

fn parse_kind(raw: &str) -> Option<ConsequenceKind> {
    match raw.to_ascii_lowercase().as_str() {
        "upside" => Some(ConsequenceKind::Upside),
        "downside" => Some(ConsequenceKind::Downside),
        _ => None,
    }
}

fn clamp_score(raw: i64) -> Score {
    Score::new(raw.clamp(0, i64::from(u8::MAX)) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::MitigationKind;

    fn rich_state() -> DecisionState {
        let mut state = DecisionState::new();
        state.add_outcome("Own my schedule", "Freedom matters most").unwrap();
        state.add_outcome("Keep income stable", "").unwrap();

        let a = state.add_option("Go freelance").unwrap();
        let b = state.add_option("Negotiate part-time").unwrap();
        state.add_option("Stay full-time").unwrap();

        state
            .add_consequence(a, "Choose my clients", ConsequenceKind::Upside, Score::new(9))
            .unwrap();
        state
            .add_consequence(a, "Irregular income", ConsequenceKind::Downside, Score::new(7))
            .unwrap();
        state
            .add_consequence(b, "Stable paycheck", ConsequenceKind::Upside, Score::new(6))
            .unwrap();

        state.toggle_candidate(a).unwrap();
        state.toggle_candidate(b).unwrap();

        state
            .set_mitigation_plan(a, Some("Build a six-month cash buffer first".to_string()))
            .unwrap();
        state
            .add_mitigation_item(a, MitigationKind::Upside, "Removes money stress")
            .unwrap();
        state
            .add_mitigation_item(a, MitigationKind::Downside, "Delays the jump")
            .unwrap();

        state
            .set_final_decision(Some(a), Some("The upside is worth the wait".to_string()))
            .unwrap();
        state
    }

    #[test]
    fn capture_then_restore_preserves_everything() {
        let state = rich_state();
        let restored = Snapshot::capture(&state).restore();
        assert_eq!(restored, state);
    }

    #[test]
    fn capture_stamps_current_version() {
        let snapshot = Snapshot::capture(&DecisionState::new());
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn empty_json_object_restores_to_default_state() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot.version, 1);
        assert!(snapshot.restore().is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{ "version": 2, "favorite_color": "green", "outcomes": [] }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.restore().is_empty());
    }

    #[test]
    fn legacy_selected_option_id_seeds_candidates() {
        let state = {
            let mut s = DecisionState::new();
            s.add_option("Legacy pick").unwrap();
            s
        };
        let legacy_id = state.options()[0].id();

        let mut snapshot = Snapshot::capture(&state);
        snapshot.version = 1;
        snapshot.candidate_option_ids.clear();
        snapshot.selected_option_id = Some(legacy_id);

        let restored = snapshot.restore();
        assert_eq!(restored.candidate_option_ids(), &[legacy_id]);
    }

    #[test]
    fn legacy_field_is_ignored_when_candidates_exist() {
        let mut state = DecisionState::new();
        let keep = state.add_option("Keep").unwrap();
        let other = state.add_option("Other").unwrap();
        state.toggle_candidate(keep).unwrap();

        let mut snapshot = Snapshot::capture(&state);
        snapshot.selected_option_id = Some(other);

        let restored = snapshot.restore();
        assert_eq!(restored.candidate_option_ids(), &[keep]);
    }

    #[test]
    fn dangling_candidate_ids_are_dropped() {
        let mut state = DecisionState::new();
        let real = state.add_option("Real").unwrap();
        state.toggle_candidate(real).unwrap();

        let mut snapshot = Snapshot::capture(&state);
        snapshot.candidate_option_ids.push(OptionId::new());

        let restored = snapshot.restore();
        assert_eq!(restored.candidate_option_ids(), &[real]);
    }

    #[test]
    fn candidates_are_deduplicated_and_truncated_to_capacity() {
        let mut state = DecisionState::new();
        let a = state.add_option("A").unwrap();
        let b = state.add_option("B").unwrap();
        let c = state.add_option("C").unwrap();

        let mut snapshot = Snapshot::capture(&state);
        snapshot.candidate_option_ids = vec![a, a, b, c];

        let restored = snapshot.restore();
        assert_eq!(restored.candidate_option_ids(), &[a, b]);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let mut state = DecisionState::new();
        let id = state.add_option("Opt").unwrap();
        state
            .add_consequence(id, "fine", ConsequenceKind::Upside, Score::new(5))
            .unwrap();

        let mut snapshot = Snapshot::capture(&state);
        snapshot.options[0].consequences[0].score = 99;
        snapshot.options[0].consequences.push(ConsequenceSnapshot {
            id: ConsequenceId::new(),
            text: "negative".to_string(),
            kind: "downside".to_string(),
            score: -5,
        });

        let restored = snapshot.restore();
        let consequences = restored.option(id).unwrap().consequences();
        assert_eq!(consequences[0].score().value(), 10);
        assert_eq!(consequences[1].score().value(), 1);
    }

    #[test]
    fn entries_with_blank_text_are_dropped() {
        let mut state = DecisionState::new();
        state.add_outcome("Keep me", "").unwrap();
        let id = state.add_option("Opt").unwrap();
        state
            .add_consequence(id, "kept", ConsequenceKind::Upside, Score::new(5))
            .unwrap();

        let mut snapshot = Snapshot::capture(&state);
        snapshot.outcomes.push(OutcomeSnapshot {
            id: OutcomeId::new(),
            what: "   ".to_string(),
            why: "orphan".to_string(),
        });
        snapshot.options[0].consequences.push(ConsequenceSnapshot {
            id: ConsequenceId::new(),
            text: String::new(),
            kind: "upside".to_string(),
            score: 5,
        });
        snapshot.options.push(OptionSnapshot {
            id: OptionId::new(),
            title: String::new(),
            description: String::new(),
            consequences: Vec::new(),
            mitigation_plan: None,
            mitigation_upsides: Vec::new(),
            mitigation_downsides: Vec::new(),
        });

        let restored = snapshot.restore();
        assert_eq!(restored.outcomes().len(), 1);
        assert_eq!(restored.options().len(), 1);
        assert_eq!(restored.option(id).unwrap().consequences().len(), 1);
    }

    #[test]
    fn unrecognized_kind_drops_only_that_entry() {
        let mut state = DecisionState::new();
        let id = state.add_option("Opt").unwrap();
        state
            .add_consequence(id, "kept", ConsequenceKind::Downside, Score::new(5))
            .unwrap();

        let mut snapshot = Snapshot::capture(&state);
        snapshot.options[0].consequences.push(ConsequenceSnapshot {
            id: ConsequenceId::new(),
            text: "mystery".to_string(),
            kind: "sideways".to_string(),
            score: 5,
        });

        let restored = snapshot.restore();
        assert_eq!(restored.option(id).unwrap().consequences().len(), 1);
    }

    #[test]
    fn kind_parsing_accepts_uppercase_payloads() {
        let json = r#"{
            "options": [{
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "title": "Opt",
                "consequences": [
                    { "text": "win", "kind": "UPSIDE", "score": 6 },
                    { "text": "loss", "kind": "Downside", "score": 2 }
                ]
            }]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let restored = snapshot.restore();
        let option = &restored.options()[0];
        assert_eq!(option.upsides().len(), 1);
        assert_eq!(option.downsides().len(), 1);
    }

    #[test]
    fn final_decision_outside_candidates_is_cleared_with_reason() {
        let mut state = DecisionState::new();
        let a = state.add_option("A").unwrap();
        let b = state.add_option("B").unwrap();
        state.toggle_candidate(a).unwrap();

        let mut snapshot = Snapshot::capture(&state);
        snapshot.final_decision_id = Some(b);
        snapshot.commitment_reason = Some("stale".to_string());

        let restored = snapshot.restore();
        assert!(restored.final_decision_id().is_none());
        assert!(restored.commitment_reason().is_none());
    }

    #[test]
    fn blank_plan_and_reason_become_none() {
        let mut state = DecisionState::new();
        let a = state.add_option("A").unwrap();
        state.toggle_candidate(a).unwrap();
        state.set_final_decision(Some(a), None).unwrap();

        let mut snapshot = Snapshot::capture(&state);
        snapshot.options[0].mitigation_plan = Some("   ".to_string());
        snapshot.commitment_reason = Some(String::new());

        let restored = snapshot.restore();
        assert!(restored.option(a).unwrap().mitigation_plan().is_none());
        assert!(restored.commitment_reason().is_none());
    }

    #[test]
    fn serialized_snapshot_omits_legacy_field() {
        let snapshot = Snapshot::capture(&DecisionState::new());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("selected_option_id"));
    }
}
