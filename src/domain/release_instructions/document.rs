//! Release instructions document - ordered manual-change runbook.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DocumentType;

/// One manual change in the runbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualChange {
    /// Unique across the runbook; `0` means the input was blank or not a number.
    pub sequence_id: i64,
    pub phase: String,
    pub category: String,
    pub jira_ref: String,
    pub owner: String,
    pub description: String,
    pub namespaces: String,
    pub components: Vec<String>,
    pub restart_required: bool,
    pub downtime_required: bool,
    pub estimated_downtime: String,
    pub rollback_possible: bool,
    pub risk_level: String,
    pub automation: bool,
    pub automation_script: String,
    pub prerequisites: Vec<String>,
    pub execution_steps: Vec<String>,
    pub validation_steps: Vec<String>,
    pub rollback_steps: Vec<String>,
    pub responsible_team: String,
}

/// The release instructions document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInstructionsDocument {
    pub file_type: DocumentType,
    pub release_version: String,
    pub release_date: String,
    pub release_by: String,
    pub manual_changes: Vec<ManualChange>,
}
