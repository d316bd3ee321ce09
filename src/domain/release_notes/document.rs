//! Release notes document - the canonical `release_notes.json` shape.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::DocumentType;

/// Impact level of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactLevel {
    None,
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn all() -> &'static [ImpactLevel] {
        &[
            ImpactLevel::None,
            ImpactLevel::Low,
            ImpactLevel::Medium,
            ImpactLevel::High,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::None => "None",
            ImpactLevel::Low => "Low",
            ImpactLevel::Medium => "Medium",
            ImpactLevel::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<ImpactLevel> {
        Self::all().iter().copied().find(|l| l.as_str() == value)
    }

    /// Levels above `None` require downtime and details.
    pub fn requires_details(&self) -> bool {
        !matches!(self, ImpactLevel::None)
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerNotification {
    pub notification_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactInfo {
    pub affected_services: Vec<String>,
    /// `HH:MM:SS`; empty when the level is `None`.
    pub expected_downtime: String,
    pub impact_level: String,
    pub details: String,
}

/// One deployable module of the release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub namespace: String,
    pub version: String,
    pub jira_ref: String,
    pub owner: String,
    pub repo: String,
    pub liquibase_repo: String,
    pub applications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssurance {
    pub conducted_by: String,
    pub results: String,
    pub status_notes: String,
    pub point_of_contact: String,
    pub approved_by: String,
    pub status: String,
    pub crs_test_status: String,
    pub crs_test_status_notes: String,
    pub rollback_test_status: String,
    pub rollback_test_status_notes: String,
    /// Test kind to percentage string, in row order.
    pub coverage: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestAutomation {
    pub is_sanity_automated: bool,
    pub automation_tools: Vec<String>,
}

/// The release notes document.
///
/// Two keys keep their historic spelling on the wire: `vulerability_scan`
/// and `Cross_tenant_dataleak_check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseNotesDocument {
    pub file_type: DocumentType,
    pub release_version: String,
    pub release_date: String,
    pub release_type: String,
    pub release_summary: String,
    pub release_manager: String,
    #[serde(rename = "vulerability_scan")]
    pub vulnerability_scan: String,
    pub security_approval_status: String,
    #[serde(rename = "Cross_tenant_dataleak_check")]
    pub cross_tenant_dataleak_check: String,
    pub customer_notification: CustomerNotification,
    pub impact_info: ImpactInfo,
    pub modules: Vec<Module>,
    pub quality_assurance: QualityAssurance,
    pub testing_stages: Vec<String>,
    pub test_automation: TestAutomation,
    pub qa_observations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_level_parses_exact_names() {
        assert_eq!(ImpactLevel::parse("High"), Some(ImpactLevel::High));
        assert_eq!(ImpactLevel::parse("high"), None);
    }

    #[test]
    fn only_none_skips_details() {
        assert!(!ImpactLevel::None.requires_details());
        assert!(ImpactLevel::Low.requires_details());
        assert!(ImpactLevel::High.requires_details());
    }

    #[test]
    fn historic_key_spellings_are_kept_on_the_wire() {
        let doc = ReleaseNotesDocument {
            file_type: DocumentType::ReleaseNotes,
            release_version: "R6.12.0".into(),
            release_date: "2024-05-01".into(),
            release_type: "Major".into(),
            release_summary: String::new(),
            release_manager: String::new(),
            vulnerability_scan: "Passed".into(),
            security_approval_status: "Approved".into(),
            cross_tenant_dataleak_check: "Passed".into(),
            customer_notification: CustomerNotification {
                notification_required: false,
            },
            impact_info: ImpactInfo {
                affected_services: vec![],
                expected_downtime: String::new(),
                impact_level: "None".into(),
                details: String::new(),
            },
            modules: vec![],
            quality_assurance: QualityAssurance {
                conducted_by: String::new(),
                results: String::new(),
                status_notes: String::new(),
                point_of_contact: String::new(),
                approved_by: String::new(),
                status: String::new(),
                crs_test_status: String::new(),
                crs_test_status_notes: String::new(),
                rollback_test_status: String::new(),
                rollback_test_status_notes: String::new(),
                coverage: IndexMap::new(),
            },
            testing_stages: vec![],
            test_automation: TestAutomation {
                is_sanity_automated: false,
                automation_tools: vec![],
            },
            qa_observations: vec![],
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["file_type"], "release_notes");
        assert_eq!(value["vulerability_scan"], "Passed");
        assert_eq!(value["Cross_tenant_dataleak_check"], "Passed");
        assert!(value.get("vulnerability_scan").is_none());
    }
}
