//! Step enum representing the six wizard stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six stages of the OOC/EMR method, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Outcomes,
    Options,
    Consequences,
    Evaluate,
    Mitigate,
    Resolve,
}

impl Step {
    /// Returns all steps in canonical order.
    pub fn all() -> &'static [Step] {
        &[
            Step::Outcomes,
            Step::Options,
            Step::Consequences,
            Step::Evaluate,
            Step::Mitigate,
            Step::Resolve,
        ]
    }

    /// Returns the 0-based index of this step in the canonical order.
    pub fn order_index(&self) -> usize {
        Self::all()
            .iter()
            .position(|s| s == self)
            .expect("Step must be in all() array")
    }

    /// Returns the next step in order, if any.
    pub fn next(&self) -> Option<Step> {
        let idx = self.order_index();
        Self::all().get(idx + 1).copied()
    }

    /// Returns the previous step in order, if any.
    pub fn previous(&self) -> Option<Step> {
        let idx = self.order_index();
        if idx == 0 {
            None
        } else {
            Self::all().get(idx - 1).copied()
        }
    }

    /// Returns true if this step comes before another in order.
    pub fn is_before(&self, other: &Step) -> bool {
        self.order_index() < other.order_index()
    }

    /// Returns true if this step comes after another in order.
    pub fn is_after(&self, other: &Step) -> bool {
        self.order_index() > other.order_index()
    }

    /// Returns true for the first step in the sequence.
    pub fn is_first(&self) -> bool {
        self.order_index() == 0
    }

    /// Returns true for the last step in the sequence.
    pub fn is_last(&self) -> bool {
        self.order_index() == Self::all().len() - 1
    }

    /// Returns the display name (progress bar label).
    pub fn display_name(&self) -> &'static str {
        match self {
            Step::Outcomes => "Outcomes",
            Step::Options => "Options",
            Step::Consequences => "Consequences",
            Step::Evaluate => "Evaluate",
            Step::Mitigate => "Mitigate",
            Step::Resolve => "Resolve",
        }
    }

    /// Returns the full stage headline.
    pub fn headline(&self) -> &'static str {
        match self {
            Step::Outcomes => "Know Your Outcome",
            Step::Options => "Know Your Options",
            Step::Consequences => "Assess Consequences",
            Step::Evaluate => "Evaluate & Select Candidates",
            Step::Mitigate => "Mitigate & Analyze",
            Step::Resolve => "Final Decision",
        }
    }

    /// Returns the stage subtitle shown under the headline.
    pub fn tagline(&self) -> &'static str {
        match self {
            Step::Outcomes => {
                "Clarity is power. What is the specific result you want, and why do you want it?"
            }
            Step::Options => {
                "One option is no choice. Two options is a dilemma. \
                 Three options represents true choice."
            }
            Step::Consequences => {
                "What are the upsides and downsides? Weigh the risk against the reward."
            }
            Step::Evaluate => {
                "Review the net impact. Select up to 2 options to take forward \
                 to the mitigation stage."
            }
            Step::Mitigate => {
                "For your selected candidates, how will you handle the risks? \
                 And what are the consequences of your mitigation plan?"
            }
            Step::Resolve => {
                "You have analyzed your options and their mitigations. Now select the winner."
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
