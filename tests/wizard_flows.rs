//! Integration tests for the four wizards.
//!
//! Each test drives a wizard the way a user would:
//! 1. Fill every step and pass its guards
//! 2. Validate the review pane through the shared validator
//! 3. Save `<file_type>.json` through the local storage adapter
//! 4. Re-validate the written file with the file handler

use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use release_wizard::adapters::{LocalDocumentStorage, SharedValidator};
use release_wizard::application::{
    SessionError, ValidateFileCommand, ValidateFileHandler, WizardSession,
};
use release_wizard::config::ValidationConfig;
use release_wizard::domain::foundation::DocumentType;
use release_wizard::domain::release_instructions::{ManualChangeForm, ReleaseInstructionsForm};
use release_wizard::domain::release_monitoring::{
    EntryDetail, MonitoringCategory, ReleaseMonitoringForm,
};
use release_wizard::domain::release_notes::{ImpactLevel, ModuleForm, ReleaseNotesForm};
use release_wizard::domain::release_tags::{EntryMode, ReleaseTagsForm, TagRow};
use release_wizard::domain::wizard::{ExportStatus, WizardForm};
use release_wizard::ports::{DocumentStorage, DocumentValidator};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn validator() -> Arc<dyn DocumentValidator> {
    Arc::new(SharedValidator::new())
}

fn words(n: usize) -> String {
    vec!["release"; n].join(" ")
}

/// Walks every step with `next`, failing loudly on the first blocked guard.
fn walk_to_review<F: WizardForm>(session: &mut WizardSession<F>) {
    while !session.state().is_review() {
        let step = session.state().current_step();
        assert!(
            session.next(),
            "step {} blocked: {:?}",
            step,
            session.step_errors()
        );
    }
}

fn validate_and_save<F: WizardForm>(
    session: &mut WizardSession<F>,
    storage: &LocalDocumentStorage,
) -> Value {
    let errors = session.validate().unwrap();
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    assert_eq!(session.status(), ExportStatus::Validated);

    let meta = session.save(storage).unwrap();
    let written = std::fs::read_to_string(meta.path()).unwrap();
    assert_eq!(meta.size_bytes, written.len() as u64);

    let result = ValidateFileHandler::new(validator())
        .handle(ValidateFileCommand {
            contents: written.clone(),
            file_type: None,
        })
        .unwrap();
    assert!(result.is_valid(), "{:?}", result.errors);

    serde_json::from_str(&written).unwrap()
}

fn filled_notes() -> ReleaseNotesForm {
    let mut form = ReleaseNotesForm::new();
    form.release.version = "R6.12.0".into();
    form.release.date = "2024-05-01".into();
    form.release.release_type = "Major".into();
    form.release.summary = words(50);
    form.release.manager = "rm@cisco.com".into();
    form.vulnerability_scan = "Passed".into();
    form.security_approval = "Approved".into();
    form.data_leak_check = "Passed".into();
    form.set_customer_notification(Some(false));

    form.set_impact_level(Some(ImpactLevel::High));
    form.affected_services = vec!["webex".into()];
    form.expected_downtime = "00:15:00".into();
    form.impact_details = words(60);

    form.modules[0] = ModuleForm {
        namespace: "commonapps".into(),
        version: "1.2.0".into(),
        jira_ref: "WXCNCT-1".into(),
        owner: "dev@cisco.com".into(),
        repo: "https://github.com/org/commonapps".into(),
        liquibase_repo: String::new(),
        applications: vec!["api".into()],
    };

    form.qa.conducted_by = "QA team".into();
    form.qa.results = "https://qa.example.com/runs/42".into();
    form.qa.status_notes = "All suites green".into();
    form.qa.status = "Passed".into();
    form.qa.crs_status = "Passed".into();
    form.qa.rollback_status = "Passed".into();
    form.set_coverage(0, "unit_tests", "85");

    form.add_testing_stage("QA");
    form.add_testing_stage("Staging");
    form.sanity_automated = Some(true);
    form.add_automation_tool("Cypress");
    form
}

fn filled_change(id: &str) -> ManualChangeForm {
    let mut change = ManualChangeForm::new();
    change.sequence_id = id.into();
    change.phase = "Deployment".into();
    change.set_category("Configuration");
    change.description = "Enable the feature flag".into();
    change.namespaces = "commonapps".into();
    change.add_component("api");
    change.restart_required = Some(false);
    change.set_downtime_required(Some(false));
    change.rollback_possible = Some(true);
    change.rollback_steps = vec!["Disable the flag".into()];
    change.risk_level = "Low".into();
    change.set_automation(Some(false));
    change.execution_steps = vec!["Flip the flag".into()];
    change.validation_steps = vec!["Check the dashboard".into()];
    change.responsible_team = "Platform".into();
    change
}

// =============================================================================
// Release notes
// =============================================================================

#[test]
fn release_notes_end_to_end() {
    let dir = TempDir::new().unwrap();
    let storage = LocalDocumentStorage::new(dir.path());
    let mut session = WizardSession::new(filled_notes(), validator());

    walk_to_review(&mut session);
    let doc = validate_and_save(&mut session, &storage);

    assert_eq!(doc["file_type"], "release_notes");
    assert_eq!(doc["vulerability_scan"], "Passed");
    assert_eq!(doc["Cross_tenant_dataleak_check"], "Passed");
    assert_eq!(doc["quality_assurance"]["coverage"]["unit_tests"], "85%");
    assert_eq!(doc["test_automation"]["is_sanity_automated"], true);
    assert!(storage.exists(DocumentType::ReleaseNotes));
}

#[test]
fn release_notes_summary_word_count_blocks_step_one() {
    let mut form = filled_notes();
    form.release.summary = words(49);
    let mut session = WizardSession::new(form, validator());

    assert!(!session.next());
    let fields: Vec<&str> = session
        .step_errors()
        .iter()
        .map(|e| e.field.as_str())
        .collect();
    assert_eq!(fields, vec!["release_summary"]);
}

#[test]
fn configured_word_count_governs_the_summary_guard() {
    let config = ValidationConfig { min_word_count: 5 };
    let mut form = filled_notes();
    form.release.summary = words(5);
    let mut session = WizardSession::new(form, validator()).with_rules(config.step_rules());

    assert!(session.next(), "blocked: {:?}", session.step_errors());

    let mut form = filled_notes();
    form.release.summary = words(4);
    let mut session = WizardSession::new(form, validator()).with_rules(config.step_rules());

    assert!(!session.next());
    assert_eq!(session.step_errors()[0].message, "Minimum 5 words required");
}

#[test]
fn release_notes_short_summary_still_passes_the_validator() {
    let mut form = filled_notes();
    form.release.summary = "Short summary".into();
    let mut session = WizardSession::new(form, validator());

    assert!(session.validate().unwrap().is_empty());
}

// =============================================================================
// Release tags
// =============================================================================

#[test]
fn release_tags_manual_rows_group_by_namespace() {
    let dir = TempDir::new().unwrap();
    let storage = LocalDocumentStorage::new(dir.path());

    let mut form = ReleaseTagsForm::new();
    form.release_version = "R6.12.0".into();
    form.release_date = "2024-5-1".into();
    form.release_type = "Minor".into();
    form.release_manager = "rm@cisco.com".into();
    form.set_entry_mode(Some(EntryMode::Manual));
    form.rows[0] = TagRow::new("commonapps", "WXCNCT-29921", "api", "v1", "");
    form.add_row(TagRow::new("billing", "WXCNCT-3", "worker", "v7", "SET X=1"));
    form.add_row(TagRow::new("commonapps", "WXCNCT-29921", "httpd", "v2", ""));

    let mut session = WizardSession::new(form, validator());
    walk_to_review(&mut session);
    let doc = validate_and_save(&mut session, &storage);

    let namespaces: Vec<&String> = doc["namespaces"].as_object().unwrap().keys().collect();
    assert_eq!(namespaces, vec!["commonapps", "billing"]);
    let components = doc["namespaces"]["commonapps"]["components"]
        .as_array()
        .unwrap();
    assert_eq!(components.len(), 2);
    assert_eq!(components[1]["component_name"], "httpd");
    assert_eq!(doc["release_date"], "2024-05-01");
}

#[test]
fn release_tags_file_mode_requires_upload() {
    let mut form = ReleaseTagsForm::new();
    form.release_version = "R1".into();
    form.release_date = "2024-05-01".into();
    form.release_type = "Minor".into();
    form.release_manager = "rm@cisco.com".into();
    form.set_entry_mode(Some(EntryMode::File));

    let mut session = WizardSession::new(form, validator());
    assert!(session.next());
    assert!(!session.next());
    assert_eq!(session.step_errors()[0].message, "Please upload a CSV file.");
}

// =============================================================================
// Release instructions
// =============================================================================

#[test]
fn release_instructions_end_to_end() {
    let dir = TempDir::new().unwrap();
    let storage = LocalDocumentStorage::new(dir.path());

    let mut form = ReleaseInstructionsForm::new();
    form.release_version = "R6.12.0".into();
    form.release_date = "2024-05-01".into();
    form.release_by = "rm@cisco.com".into();
    form.changes.push(filled_change("1"));
    let mut custom = filled_change("2");
    custom.set_category("Custom");
    custom.set_custom_category("Certificate rotation");
    form.changes.push(custom);

    let mut session = WizardSession::new(form, validator());
    walk_to_review(&mut session);
    let doc = validate_and_save(&mut session, &storage);

    assert_eq!(doc["manual_changes"][0]["sequence_id"], 1);
    assert_eq!(doc["manual_changes"][1]["category"], "Certificate rotation");
    assert_eq!(doc["manual_changes"][0]["automation"], false);
}

#[test]
fn release_instructions_duplicate_ids_block_the_step() {
    let mut form = ReleaseInstructionsForm::new();
    form.release_version = "R6.12.0".into();
    form.release_date = "2024-05-01".into();
    form.release_by = "rm@cisco.com".into();
    form.changes.push(filled_change("3"));
    form.changes.push(filled_change("3"));

    let mut session = WizardSession::new(form, validator());
    assert!(session.next());
    assert!(!session.next());
    let unique: Vec<String> = session
        .step_errors()
        .iter()
        .filter(|e| e.message == "Sequence ID must be unique")
        .map(|e| e.field.clone())
        .collect();
    assert_eq!(unique, vec!["changes[1].sequence_id", "changes[2].sequence_id"]);

    let errors = session.validate().unwrap();
    assert_eq!(
        errors,
        vec![
            "Instruction 1: sequence_id must be unique",
            "Instruction 2: sequence_id must be unique"
        ]
    );
}

// =============================================================================
// Release monitoring
// =============================================================================

#[test]
fn release_monitoring_end_to_end() {
    let dir = TempDir::new().unwrap();
    let storage = LocalDocumentStorage::new(dir.path());

    let mut form = ReleaseMonitoringForm::new();
    form.release_version = "R6.12.0".into();
    form.release_date = "2024-05-01".into();
    form.environment = "production".into();
    form.monitored_by = "SRE".into();

    form.select_category(Some(MonitoringCategory::AwsServices));
    let entry = form
        .entry_mut(MonitoringCategory::AwsServices, 0)
        .unwrap();
    entry.alert.alert_source = vec!["CloudWatch".into()];
    entry.alert.alert_channel = vec!["Slack".into()];
    entry.alert.alert_action = "Page on-call".into();
    entry.alert.alert_priority = "P1".into();
    entry.alert.alert_condition = "CPU above threshold".into();
    entry.alert.alert_reason = "Saturation".into();
    entry.alert.add_remediation("Scale out");
    if let EntryDetail::AwsServices(aws) = &mut entry.detail {
        aws.service_name = "EC2".into();
        aws.metric_name = "CPUUtilization".into();
        aws.namespace = "AWS/EC2".into();
        aws.threshold = "0".into();
        aws.comparison_operator = "GreaterThanThreshold".into();
    }

    form.validation.validated_by = "SRE".into();
    form.validation.validation_status = "Validated".into();
    form.validation.last_validated_on = "2024-05-01T10:30".into();

    let mut session = WizardSession::new(form, validator());
    walk_to_review(&mut session);
    let doc = validate_and_save(&mut session, &storage);

    let aws = &doc["monitoring_categories"]["aws_services_monitoring"][0];
    assert_eq!(aws["threshold"], 0);
    assert_eq!(aws["remediation_actions"][0], "Scale out");
    assert_eq!(
        doc["validation_summary"]["last_validated_on"],
        "2024-05-01 10:30:00"
    );
    assert_eq!(
        doc["monitoring_categories"]["api_health_monitoring"]
            .as_array()
            .unwrap()
            .len(),
        0
    );
}

#[test]
fn release_monitoring_blank_threshold_is_null_and_rejected() {
    let mut form = ReleaseMonitoringForm::new();
    form.release_version = "R1".into();
    form.release_date = "2024-05-01".into();
    form.environment = "staging".into();
    form.monitored_by = "SRE".into();
    form.add_entry(MonitoringCategory::Alb);

    let doc = serde_json::to_value(form.build()).unwrap();
    assert!(doc["monitoring_categories"]["alb_exceptions"][0]["threshold_value"].is_null());

    let errors = SharedValidator::new().validate(&doc, "release_monitoring");
    assert!(errors.contains(&"ALB Exceptions Entry 1: Missing threshold_value".to_string()));
}

// =============================================================================
// Export gate
// =============================================================================

#[test]
fn export_before_validation_is_refused_for_every_wizard() {
    let notes = WizardSession::new(filled_notes(), validator());
    let tags = WizardSession::new(ReleaseTagsForm::new(), validator());
    let instructions = WizardSession::new(ReleaseInstructionsForm::new(), validator());
    let monitoring = WizardSession::new(ReleaseMonitoringForm::new(), validator());

    assert_eq!(notes.export(), Err(SessionError::NotValidated));
    assert_eq!(tags.export(), Err(SessionError::NotValidated));
    assert_eq!(instructions.export(), Err(SessionError::NotValidated));
    assert_eq!(monitoring.export(), Err(SessionError::NotValidated));
}

#[test]
fn storage_checksum_matches_export() {
    let dir = TempDir::new().unwrap();
    let storage = LocalDocumentStorage::new(dir.path());
    let mut session = WizardSession::new(filled_notes(), validator());
    session.validate().unwrap();

    let meta = session.save(&storage).unwrap();

    assert_eq!(
        storage.checksum(DocumentType::ReleaseNotes).unwrap(),
        meta.checksum
    );
}
