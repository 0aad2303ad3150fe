//! Markdown decision record generator.
//!
//! Renders the decision state into a printable markdown record, the
//! "make it official" artifact of the final stage. Pure string
//! rendering; the caller decides where the document goes.

use crate::domain::decision::{rank, score_breakdown, DecisionOption, DecisionState};
use crate::domain::foundation::Timestamp;

/// Renders decision state as a markdown record.
///
/// Sections that have no data yet render with a placeholder, so the
/// record can be produced at any stage of the wizard.
#[derive(Debug, Clone, Default)]
pub struct RecordGenerator {}

impl RecordGenerator {
    /// Creates a new record generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the full decision record.
    pub fn generate(&self, state: &DecisionState) -> String {
        let mut doc = String::new();

        doc.push_str(&self.generate_header());
        doc.push_str("\n---\n\n");
        doc.push_str(&self.generate_decision(state));
        doc.push_str(&self.generate_outcomes(state));
        doc.push_str(&self.generate_options_table(state));
        doc.push_str(&self.generate_mitigation(state));
        doc.push_str("---\n\n");
        doc.push_str("*Your decision is clear. Action creates clarity.*\n");

        doc
    }

    /// Generates the title and date stamp.
    fn generate_header(&self) -> String {
        let date = Timestamp::now().as_datetime().format("%Y-%m-%d");
        format!("# Decision Record\n\n> **Date:** {}\n", date)
    }

    /// Generates the final decision section.
    fn generate_decision(&self, state: &DecisionState) -> String {
        let mut section = String::from("## I Have Decided To\n\n");

        if let Some(winner) = state.final_decision() {
            section.push_str(&format!("**{}**\n\n", winner.title()));

            match state.commitment_reason() {
                Some(reason) => {
                    section.push_str("### Why I Am Committed\n\n");
                    section.push_str(&format!("> {}\n\n", reason));
                }
                None => section.push_str("*No commitment reason recorded*\n\n"),
            }
        } else {
            section.push_str("*Not yet decided*\n\n");
        }

        section
    }

    /// Generates the desired outcomes section.
    fn generate_outcomes(&self, state: &DecisionState) -> String {
        let mut section = String::from("## Purpose Served\n\n");

        if state.outcomes().is_empty() {
            section.push_str("*No outcomes recorded*\n\n");
        } else {
            for outcome in state.outcomes() {
                if outcome.why().is_empty() {
                    section.push_str(&format!("- **{}**\n", outcome.what()));
                } else {
                    section.push_str(&format!("- **{}** - {}\n", outcome.what(), outcome.why()));
                }
            }
            section.push('\n');
        }

        section
    }

    /// Generates the scored options table, best net score first.
    fn generate_options_table(&self, state: &DecisionState) -> String {
        let mut section = String::from("## Options Considered\n\n");

        if state.options().is_empty() {
            section.push_str("*No options recorded*\n\n");
            return section;
        }

        section.push_str("| Option | Upsides | Downsides | Net | Outcome |\n");
        section.push_str("|--------|:-------:|:---------:|:---:|---------|\n");

        for (option, net) in rank(state.options()) {
            let breakdown = score_breakdown(option);
            let status = if state.final_decision_id() == Some(option.id()) {
                "**Decision**"
            } else if state.is_candidate(option.id()) {
                "Candidate"
            } else {
                "-"
            };
            section.push_str(&format!(
                "| {} | {} | {} | **{}** | {} |\n",
                option.title(),
                breakdown.upside_total,
                breakdown.downside_total,
                format_signed(net),
                status
            ));
        }
        section.push('\n');

        section
    }

    /// Generates the risk mitigation section for the winning option.
    fn generate_mitigation(&self, state: &DecisionState) -> String {
        let winner = match state.final_decision() {
            Some(option) => option,
            None => return String::new(),
        };

        let mut section = String::from("## Risk Mitigation\n\n");

        match winner.mitigation_plan() {
            Some(plan) => section.push_str(&format!("{}\n\n", plan)),
            None => section.push_str("No specific mitigation plan added.\n\n"),
        }

        section.push_str(&self.generate_mitigation_analysis(winner));

        section
    }

    /// Generates the second-order analysis of the winner's plan.
    fn generate_mitigation_analysis(&self, option: &DecisionOption) -> String {
        let mut section = String::new();

        if !option.mitigation_upsides().is_empty() {
            section.push_str("**Mitigation Upsides:**\n");
            for item in option.mitigation_upsides() {
                section.push_str(&format!("- {}\n", item.text()));
            }
            section.push('\n');
        }

        if !option.mitigation_downsides().is_empty() {
            let costs = option
                .mitigation_downsides()
                .iter()
                .map(|item| item.text())
                .collect::<Vec<_>>()
                .join(", ");
            section.push_str(&format!("**Accepted Cost:** {}\n\n", costs));
        }

        section
    }
}

/// Formats a net score with an explicit sign for the table rows.
fn format_signed(value: i32) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}
