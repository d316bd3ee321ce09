//! Release notes form state and document assembly.

use indexmap::IndexMap;

use crate::domain::foundation::{
    normalize_percentage, normalize_release_date, DocumentType, FieldError,
};
use crate::domain::wizard::{non_blank, push_chip, StepRules, WizardForm};

use super::document::{
    CustomerNotification, ImpactInfo, ImpactLevel, Module, QualityAssurance,
    ReleaseNotesDocument, TestAutomation,
};
use super::steps;

/// Top-level release metadata collected on step 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseInfo {
    pub version: String,
    pub date: String,
    pub release_type: String,
    pub summary: String,
    pub manager: String,
}

/// One module card on step 3.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleForm {
    pub namespace: String,
    pub version: String,
    pub jira_ref: String,
    pub owner: String,
    pub repo: String,
    pub liquibase_repo: String,
    pub applications: Vec<String>,
}

impl ModuleForm {
    pub fn add_application(&mut self, name: &str) -> bool {
        push_chip(&mut self.applications, name)
    }

    pub fn remove_application(&mut self, name: &str) {
        self.applications.retain(|a| a != name);
    }

    fn build(&self) -> Module {
        Module {
            namespace: self.namespace.trim().to_string(),
            version: self.version.trim().to_string(),
            jira_ref: self.jira_ref.trim().to_string(),
            owner: self.owner.trim().to_string(),
            repo: self.repo.trim().to_string(),
            liquibase_repo: self.liquibase_repo.trim().to_string(),
            applications: non_blank(&self.applications),
        }
    }
}

/// One coverage row on step 4.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageRow {
    /// `unit_tests`, `integration_tests`, `end_to_end_tests` or blank.
    pub kind: String,
    pub percentage: String,
}

impl CoverageRow {
    pub fn new(kind: impl Into<String>, percentage: &str) -> Self {
        Self {
            kind: kind.into(),
            percentage: normalize_percentage(percentage),
        }
    }
}

/// Quality-assurance fields on step 4.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QaForm {
    pub conducted_by: String,
    pub results: String,
    pub status_notes: String,
    pub point_of_contact: String,
    pub approved_by: String,
    pub status: String,
    pub crs_status: String,
    pub crs_status_notes: String,
    pub rollback_status: String,
    pub rollback_status_notes: String,
}

/// Everything the release notes wizard collects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseNotesForm {
    pub release: ReleaseInfo,
    pub vulnerability_scan: String,
    pub security_approval: String,
    pub data_leak_check: String,
    /// `None` until the user picks yes or no.
    customer_notification: Option<bool>,
    customer_notification_message: String,
    impact_level: Option<ImpactLevel>,
    pub affected_services: Vec<String>,
    pub expected_downtime: String,
    pub impact_details: String,
    pub modules: Vec<ModuleForm>,
    pub qa: QaForm,
    pub coverage: Vec<CoverageRow>,
    pub testing_stages: Vec<String>,
    pub sanity_automated: Option<bool>,
    pub automation_tools: Vec<String>,
    pub qa_observations: Vec<String>,
}

impl ReleaseNotesForm {
    /// A fresh form with one empty service row, module card and coverage
    /// row, the way the wizard opens.
    pub fn new() -> Self {
        Self {
            affected_services: vec![String::new()],
            modules: vec![ModuleForm::default()],
            coverage: vec![CoverageRow::default()],
            ..Default::default()
        }
    }

    pub fn customer_notification(&self) -> Option<bool> {
        self.customer_notification
    }

    pub fn customer_notification_message(&self) -> &str {
        &self.customer_notification_message
    }

    /// Sets the notification choice; anything but "yes" clears the message.
    pub fn set_customer_notification(&mut self, required: Option<bool>) {
        self.customer_notification = required;
        if required != Some(true) {
            self.customer_notification_message.clear();
        }
    }

    /// The message is only kept while notification is required.
    pub fn set_customer_notification_message(&mut self, message: impl Into<String>) {
        if self.customer_notification == Some(true) {
            self.customer_notification_message = message.into();
        }
    }

    pub fn impact_level(&self) -> Option<ImpactLevel> {
        self.impact_level
    }

    /// Sets the impact level; `None` clears downtime and details.
    pub fn set_impact_level(&mut self, level: Option<ImpactLevel>) {
        self.impact_level = level;
        if level == Some(ImpactLevel::None) {
            self.expected_downtime.clear();
            self.impact_details.clear();
        }
    }

    /// Stores a coverage percentage, appending `%` to a bare number.
    pub fn set_coverage(&mut self, row: usize, kind: impl Into<String>, percentage: &str) {
        if row >= self.coverage.len() {
            self.coverage.resize_with(row + 1, CoverageRow::default);
        }
        self.coverage[row] = CoverageRow::new(kind, percentage);
    }

    pub fn add_testing_stage(&mut self, stage: &str) -> bool {
        push_chip(&mut self.testing_stages, stage)
    }

    pub fn add_automation_tool(&mut self, tool: &str) -> bool {
        push_chip(&mut self.automation_tools, tool)
    }

    /// Removes a QA observation row; the last row always stays.
    pub fn remove_qa_observation(&mut self, index: usize) -> bool {
        if self.qa_observations.len() <= 1 || index >= self.qa_observations.len() {
            return false;
        }
        self.qa_observations.remove(index);
        true
    }

    fn build_coverage(&self) -> IndexMap<String, String> {
        let mut coverage = IndexMap::new();
        for row in &self.coverage {
            let kind = row.kind.trim();
            if !kind.is_empty() {
                coverage.insert(kind.to_string(), normalize_percentage(&row.percentage));
            }
        }
        coverage
    }
}

impl WizardForm for ReleaseNotesForm {
    type Document = ReleaseNotesDocument;

    const DOCUMENT_TYPE: DocumentType = DocumentType::ReleaseNotes;

    fn build(&self) -> ReleaseNotesDocument {
        let qa = &self.qa;
        ReleaseNotesDocument {
            file_type: Self::DOCUMENT_TYPE,
            release_version: self.release.version.trim().to_string(),
            release_date: normalize_release_date(&self.release.date),
            release_type: self.release.release_type.trim().to_string(),
            release_summary: self.release.summary.trim().to_string(),
            release_manager: self.release.manager.trim().to_string(),
            vulnerability_scan: self.vulnerability_scan.trim().to_string(),
            security_approval_status: self.security_approval.trim().to_string(),
            cross_tenant_dataleak_check: self.data_leak_check.trim().to_string(),
            customer_notification: CustomerNotification {
                notification_required: self.customer_notification == Some(true),
            },
            impact_info: ImpactInfo {
                affected_services: non_blank(&self.affected_services),
                expected_downtime: self.expected_downtime.trim().to_string(),
                impact_level: self
                    .impact_level
                    .map(|l| l.as_str().to_string())
                    .unwrap_or_default(),
                details: self.impact_details.trim().to_string(),
            },
            modules: self.modules.iter().map(ModuleForm::build).collect(),
            quality_assurance: QualityAssurance {
                conducted_by: qa.conducted_by.trim().to_string(),
                results: qa.results.trim().to_string(),
                status_notes: qa.status_notes.trim().to_string(),
                point_of_contact: qa.point_of_contact.trim().to_string(),
                approved_by: qa.approved_by.trim().to_string(),
                status: qa.status.trim().to_string(),
                crs_test_status: qa.crs_status.trim().to_string(),
                crs_test_status_notes: qa.crs_status_notes.trim().to_string(),
                rollback_test_status: qa.rollback_status.trim().to_string(),
                rollback_test_status_notes: qa.rollback_status_notes.trim().to_string(),
                coverage: self.build_coverage(),
            },
            testing_stages: non_blank(&self.testing_stages),
            test_automation: TestAutomation {
                is_sanity_automated: self.sanity_automated == Some(true),
                automation_tools: non_blank(&self.automation_tools),
            },
            qa_observations: non_blank(&self.qa_observations),
        }
    }

    fn validate_step(&self, step: usize, rules: &StepRules) -> Vec<FieldError> {
        match step {
            1 => steps::release_info(self, rules),
            2 => steps::impact(self, rules),
            3 => steps::modules(self),
            4 => steps::quality_assurance(self),
            5 => steps::testing(self),
            _ => Vec::new(),
        }
    }
}
