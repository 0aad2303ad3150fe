//! Net-score calculation for the EVALUATE stage.
//!
//! Scores never aggregate across options; each option stands on its own
//! upside/downside totals.

use std::cmp::Reverse;

use super::{ConsequenceKind, DecisionOption};

/// Upside and downside totals for a single option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub upside_total: i32,
    pub downside_total: i32,
}

impl ScoreBreakdown {
    /// Net impact: upside total minus downside total.
    pub fn net(&self) -> i32 {
        self.upside_total - self.downside_total
    }
}

/// Computes the upside/downside totals for an option.
pub fn score_breakdown(option: &DecisionOption) -> ScoreBreakdown {
    let mut upside_total = 0;
    let mut downside_total = 0;
    for c in option.consequences() {
        match c.kind() {
            ConsequenceKind::Upside => upside_total += i32::from(c.score().value()),
            ConsequenceKind::Downside => downside_total += i32::from(c.score().value()),
        }
    }
    ScoreBreakdown {
        upside_total,
        downside_total,
    }
}

/// Net score of an option: sum of upside scores minus sum of downside scores.
///
/// An option with no consequences scores 0. Duplicate texts each count.
pub fn net_score(option: &DecisionOption) -> i32 {
    score_breakdown(option).net()
}

/// Ranks options by net score, highest first. Ties keep insertion order.
pub fn rank(options: &[DecisionOption]) -> Vec<(&DecisionOption, i32)> {
    let mut ranked: Vec<(&DecisionOption, i32)> =
        options.iter().map(|o| (o, net_score(o))).collect();
    ranked.sort_by_key(|(_, net)| Reverse(*net));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::DecisionState;
    use crate::domain::foundation::Score;

    fn option_scoring(pairs: &[(ConsequenceKind, u8)]) -> DecisionOption {
        let mut state = DecisionState::new();
        let id = state.add_option("opt").unwrap();
        for (i, (kind, score)) in pairs.iter().enumerate() {
            state
                .add_consequence(id, format!("c{}", i), *kind, Score::new(*score))
                .unwrap();
        }
        state.option(id).unwrap().clone()
    }

    #[test]
    fn net_score_of_empty_option_is_zero() {
        let opt = option_scoring(&[]);
        assert_eq!(net_score(&opt), 0);
    }

    #[test]
    fn net_score_subtracts_downsides_from_upsides() {
        let opt = option_scoring(&[
            (ConsequenceKind::Upside, 3),
            (ConsequenceKind::Upside, 5),
            (ConsequenceKind::Downside, 4),
        ]);
        assert_eq!(net_score(&opt), 4);
    }

    #[test]
    fn net_score_can_be_negative() {
        let opt = option_scoring(&[
            (ConsequenceKind::Upside, 2),
            (ConsequenceKind::Downside, 9),
        ]);
        assert_eq!(net_score(&opt), -7);
    }

    #[test]
    fn duplicate_consequence_texts_each_count() {
        let mut state = DecisionState::new();
        let id = state.add_option("opt").unwrap();
        for _ in 0..2 {
            state
                .add_consequence(id, "same text", ConsequenceKind::Upside, Score::new(4))
                .unwrap();
        }
        assert_eq!(net_score(state.option(id).unwrap()), 8);
    }

    #[test]
    fn score_breakdown_reports_both_totals() {
        let opt = option_scoring(&[
            (ConsequenceKind::Upside, 6),
            (ConsequenceKind::Downside, 2),
            (ConsequenceKind::Downside, 3),
        ]);
        let breakdown = score_breakdown(&opt);
        assert_eq!(breakdown.upside_total, 6);
        assert_eq!(breakdown.downside_total, 5);
        assert_eq!(breakdown.net(), 1);
    }

    #[test]
    fn rank_orders_descending_by_net_score() {
        let mut state = DecisionState::new();
        let low = state.add_option("low").unwrap();
        let high = state.add_option("high").unwrap();
        state
            .add_consequence(low, "small win", ConsequenceKind::Upside, Score::new(2))
            .unwrap();
        state
            .add_consequence(high, "big win", ConsequenceKind::Upside, Score::new(9))
            .unwrap();

        let ranked = rank(state.options());
        assert_eq!(ranked[0].0.id(), high);
        assert_eq!(ranked[0].1, 9);
        assert_eq!(ranked[1].0.id(), low);
        assert_eq!(ranked[1].1, 2);
    }

    #[test]
    fn rank_keeps_insertion_order_for_ties() {
        let mut state = DecisionState::new();
        let first = state.add_option("first").unwrap();
        let second = state.add_option("second").unwrap();
        for id in [first, second] {
            state
                .add_consequence(id, "even", ConsequenceKind::Upside, Score::new(5))
                .unwrap();
        }

        let ranked = rank(state.options());
        assert_eq!(ranked[0].0.id(), first);
        assert_eq!(ranked[1].0.id(), second);
    }
}
