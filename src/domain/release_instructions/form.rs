//! Release instructions form state and document assembly.

use crate::domain::foundation::{normalize_release_date, DocumentType, FieldError};
use crate::domain::wizard::{non_blank, push_chip, StepRules, WizardForm};

use super::document::{ManualChange, ReleaseInstructionsDocument};
use super::steps;

/// Category value that asks for a free-text override.
pub const CUSTOM_CATEGORY: &str = "Custom";

/// One manual-change card on step 2.
///
/// Yes/no selects are `None` until answered. Turning a flag off clears the
/// field it guards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualChangeForm {
    /// Raw input; parsed to an integer on build.
    pub sequence_id: String,
    pub phase: String,
    category: String,
    custom_category: String,
    pub jira_ref: String,
    pub owner: String,
    pub description: String,
    pub namespaces: String,
    pub components: Vec<String>,
    pub restart_required: Option<bool>,
    downtime_required: Option<bool>,
    estimated_downtime: String,
    pub rollback_possible: Option<bool>,
    pub risk_level: String,
    automation: Option<bool>,
    automation_script: String,
    pub prerequisites: Vec<String>,
    pub execution_steps: Vec<String>,
    pub validation_steps: Vec<String>,
    pub rollback_steps: Vec<String>,
    pub responsible_team: String,
}

impl ManualChangeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn custom_category(&self) -> &str {
        &self.custom_category
    }

    /// Selects a category; leaving `Custom` clears the override text.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        if !self.is_custom() {
            self.custom_category.clear();
        }
    }

    pub fn set_custom_category(&mut self, text: impl Into<String>) {
        if self.is_custom() {
            self.custom_category = text.into();
        }
    }

    pub fn is_custom(&self) -> bool {
        self.category == CUSTOM_CATEGORY
    }

    pub fn downtime_required(&self) -> Option<bool> {
        self.downtime_required
    }

    pub fn estimated_downtime(&self) -> &str {
        &self.estimated_downtime
    }

    pub fn set_downtime_required(&mut self, required: Option<bool>) {
        self.downtime_required = required;
        if required != Some(true) {
            self.estimated_downtime.clear();
        }
    }

    pub fn set_estimated_downtime(&mut self, value: impl Into<String>) {
        if self.downtime_required == Some(true) {
            self.estimated_downtime = value.into();
        }
    }

    pub fn automation(&self) -> Option<bool> {
        self.automation
    }

    pub fn automation_script(&self) -> &str {
        &self.automation_script
    }

    pub fn set_automation(&mut self, automated: Option<bool>) {
        self.automation = automated;
        if automated != Some(true) {
            self.automation_script.clear();
        }
    }

    pub fn set_automation_script(&mut self, script: impl Into<String>) {
        if self.automation == Some(true) {
            self.automation_script = script.into();
        }
    }

    pub fn add_component(&mut self, name: &str) -> bool {
        push_chip(&mut self.components, name)
    }

    pub fn remove_component(&mut self, name: &str) {
        self.components.retain(|c| c != name);
    }

    /// Whole-number value of the sequence input. `2.0` and `1e2` count as
    /// whole numbers; blank, fractional and non-numeric input give `None`.
    pub fn sequence_number(&self) -> Option<i64> {
        let raw = self.sequence_id.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(n) = raw.parse::<i64>() {
            return Some(n);
        }
        let value = raw.parse::<f64>().ok()?;
        let in_range = value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value < i64::MAX as f64;
        in_range.then_some(value as i64)
    }

    /// Integer value written to the document; `0` when there is none.
    pub fn parsed_sequence_id(&self) -> i64 {
        self.sequence_number().unwrap_or(0)
    }

    /// Category written to the document; `Custom` resolves to its override.
    pub fn effective_category(&self) -> String {
        if self.is_custom() {
            self.custom_category.trim().to_string()
        } else {
            self.category.trim().to_string()
        }
    }

    fn build(&self) -> ManualChange {
        ManualChange {
            sequence_id: self.parsed_sequence_id(),
            phase: self.phase.trim().to_string(),
            category: self.effective_category(),
            jira_ref: self.jira_ref.trim().to_string(),
            owner: self.owner.trim().to_string(),
            description: self.description.trim().to_string(),
            namespaces: self.namespaces.trim().to_string(),
            components: non_blank(&self.components),
            restart_required: self.restart_required == Some(true),
            downtime_required: self.downtime_required == Some(true),
            estimated_downtime: self.estimated_downtime.trim().to_string(),
            rollback_possible: self.rollback_possible == Some(true),
            risk_level: self.risk_level.trim().to_string(),
            automation: self.automation == Some(true),
            automation_script: self.automation_script.trim().to_string(),
            prerequisites: non_blank(&self.prerequisites),
            execution_steps: non_blank(&self.execution_steps),
            validation_steps: non_blank(&self.validation_steps),
            rollback_steps: non_blank(&self.rollback_steps),
            responsible_team: self.responsible_team.trim().to_string(),
        }
    }
}

/// Everything the release instructions wizard collects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseInstructionsForm {
    pub release_version: String,
    pub release_date: String,
    pub release_by: String,
    pub changes: Vec<ManualChangeForm>,
}

impl ReleaseInstructionsForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a change card and returns its index.
    pub fn add_change(&mut self) -> usize {
        self.changes.push(ManualChangeForm::new());
        self.changes.len() - 1
    }

    pub fn remove_change(&mut self, index: usize) -> bool {
        if index >= self.changes.len() {
            return false;
        }
        self.changes.remove(index);
        true
    }
}

impl WizardForm for ReleaseInstructionsForm {
    type Document = ReleaseInstructionsDocument;

    const DOCUMENT_TYPE: DocumentType = DocumentType::ReleaseInstructions;

    fn build(&self) -> ReleaseInstructionsDocument {
        ReleaseInstructionsDocument {
            file_type: Self::DOCUMENT_TYPE,
            release_version: self.release_version.trim().to_string(),
            release_date: normalize_release_date(&self.release_date),
            release_by: self.release_by.trim().to_string(),
            manual_changes: self.changes.iter().map(ManualChangeForm::build).collect(),
        }
    }

    fn validate_step(&self, step: usize, _rules: &StepRules) -> Vec<FieldError> {
        match step {
            1 => steps::release_info(self),
            2 => steps::manual_changes(self),
            _ => Vec::new(),
        }
    }
}
