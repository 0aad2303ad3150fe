//! DecisionOption entity - one path to the desired outcomes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConsequenceId, MitigationItemId, OptionId, ValidationError};

use super::{Consequence, ConsequenceKind, MitigationAnalysis, MitigationKind};

/// A candidate path to achieve the desired outcomes, with its weighed
/// consequences and (for shortlisted options) a mitigation plan plus the
/// second-order analysis of that plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    id: OptionId,
    title: String,
    description: String,
    consequences: Vec<Consequence>,
    mitigation_plan: Option<String>,
    mitigation_upsides: Vec<MitigationAnalysis>,
    mitigation_downsides: Vec<MitigationAnalysis>,
}

impl DecisionOption {
    /// Creates a new option with no consequences or mitigation yet.
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(Self {
            id: OptionId::new(),
            title,
            description: String::new(),
            consequences: Vec::new(),
            mitigation_plan: None,
            mitigation_upsides: Vec::new(),
            mitigation_downsides: Vec::new(),
        })
    }

    /// Reconstitutes an option from persisted data.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn reconstitute(
        id: OptionId,
        title: String,
        description: String,
        consequences: Vec<Consequence>,
        mitigation_plan: Option<String>,
        mitigation_upsides: Vec<MitigationAnalysis>,
        mitigation_downsides: Vec<MitigationAnalysis>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            consequences,
            mitigation_plan,
            mitigation_upsides,
            mitigation_downsides,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    /// Returns the option ID.
    pub fn id(&self) -> OptionId {
        self.id
    }

    /// Returns the option title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns all consequences in insertion order.
    pub fn consequences(&self) -> &[Consequence] {
        &self.consequences
    }

    /// Returns the upside consequences in insertion order.
    pub fn upsides(&self) -> Vec<&Consequence> {
        self.consequences
            .iter()
            .filter(|c| c.kind() == ConsequenceKind::Upside)
            .collect()
    }

    /// Returns the downside consequences in insertion order.
    pub fn downsides(&self) -> Vec<&Consequence> {
        self.consequences
            .iter()
            .filter(|c| c.kind() == ConsequenceKind::Downside)
            .collect()
    }

    /// Returns the mitigation plan, if one has been written.
    pub fn mitigation_plan(&self) -> Option<&str> {
        self.mitigation_plan.as_deref()
    }

    /// Returns the benefits of the mitigation plan itself.
    pub fn mitigation_upsides(&self) -> &[MitigationAnalysis] {
        &self.mitigation_upsides
    }

    /// Returns the costs/new risks of the mitigation plan itself.
    pub fn mitigation_downsides(&self) -> &[MitigationAnalysis] {
        &self.mitigation_downsides
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations (orchestrated by the DecisionState aggregate)
    // ───────────────────────────────────────────────────────────────

    pub(crate) fn push_consequence(&mut self, consequence: Consequence) {
        self.consequences.push(consequence);
    }

    /// Removes a consequence by id, returning whether anything was removed.
    pub(crate) fn remove_consequence(&mut self, id: ConsequenceId) -> bool {
        let before = self.consequences.len();
        self.consequences.retain(|c| c.id() != id);
        self.consequences.len() != before
    }

    /// Sets or clears the mitigation plan. Blank text clears.
    pub(crate) fn set_mitigation_plan(&mut self, plan: Option<String>) {
        self.mitigation_plan = plan.filter(|p| !p.trim().is_empty());
    }

    pub(crate) fn push_mitigation_item(&mut self, kind: MitigationKind, item: MitigationAnalysis) {
        match kind {
            MitigationKind::Upside => self.mitigation_upsides.push(item),
            MitigationKind::Downside => self.mitigation_downsides.push(item),
        }
    }

    /// Removes a mitigation note by id, returning whether anything was removed.
    pub(crate) fn remove_mitigation_item(
        &mut self,
        kind: MitigationKind,
        id: MitigationItemId,
    ) -> bool {
        let list = match kind {
            MitigationKind::Upside => &mut self.mitigation_upsides,
            MitigationKind::Downside => &mut self.mitigation_downsides,
        };
        let before = list.len();
        list.retain(|item| item.id() != id);
        list.len() != before
    }
}
