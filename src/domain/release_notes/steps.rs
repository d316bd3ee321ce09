//! Step guards for the release notes wizard.
//!
//! These gate navigation between steps and run before the shared
//! validator ever sees a document. Word-count checks live only here.

use std::collections::HashMap;

use crate::domain::foundation::{
    has_min_words, is_valid_downtime, is_valid_email, is_valid_percentage, is_valid_url,
    normalize_percentage, FieldError,
};
use crate::domain::wizard::StepRules;

use super::form::ReleaseNotesForm;

fn require(errors: &mut Vec<FieldError>, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(FieldError::required(field));
        return false;
    }
    true
}

pub(super) fn release_info(form: &ReleaseNotesForm, rules: &StepRules) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let release = &form.release;

    require(&mut errors, "release_version", &release.version);
    require(&mut errors, "release_date", &release.date);
    require(&mut errors, "release_type", &release.release_type);

    if require(&mut errors, "release_summary", &release.summary)
        && !has_min_words(&release.summary, rules.min_word_count)
    {
        errors.push(FieldError::new(
            "release_summary",
            format!("Minimum {} words required", rules.min_word_count),
        ));
    }

    if require(&mut errors, "release_manager", &release.manager)
        && !is_valid_email(release.manager.trim())
    {
        errors.push(FieldError::new(
            "release_manager",
            "Enter a valid @cisco.com email",
        ));
    }

    require(&mut errors, "vulerability_scan", &form.vulnerability_scan);
    require(&mut errors, "security_approval_status", &form.security_approval);
    require(&mut errors, "Cross_tenant_dataleak_check", &form.data_leak_check);

    if form.customer_notification().is_none() {
        errors.push(FieldError::required("customer_notification"));
    }

    errors
}

pub(super) fn impact(form: &ReleaseNotesForm, rules: &StepRules) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let level = match form.impact_level() {
        Some(level) => Some(level),
        None => {
            errors.push(FieldError::required("impact_level"));
            None
        }
    };

    if form.affected_services.iter().all(|s| s.trim().is_empty()) {
        errors.push(FieldError::new(
            "affected_services",
            "At least one affected service is required",
        ));
    }

    if level.is_some_and(|l| l.requires_details()) {
        if require(&mut errors, "expected_downtime", &form.expected_downtime)
            && !is_valid_downtime(form.expected_downtime.trim())
        {
            errors.push(FieldError::new("expected_downtime", "Format: HH:MM:SS"));
        }

        if require(&mut errors, "details", &form.impact_details)
            && !has_min_words(&form.impact_details, rules.min_word_count)
        {
            errors.push(FieldError::new(
                "details",
                format!("Minimum {} words required", rules.min_word_count),
            ));
        }
    }

    errors
}

pub(super) fn modules(form: &ReleaseNotesForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.modules.is_empty() {
        errors.push(FieldError::new("modules", "At least one module is required"));
        return errors;
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    for module in &form.modules {
        let ns = module.namespace.trim();
        if !ns.is_empty() {
            *seen.entry(ns.to_string()).or_default() += 1;
        }
    }

    for (i, module) in form.modules.iter().enumerate() {
        let n = i + 1;
        let field = |name: &str| format!("modules[{}].{}", n, name);

        let ns = module.namespace.trim();
        if ns.is_empty() {
            errors.push(FieldError::required(field("namespace")));
        } else if seen.get(ns).copied().unwrap_or(0) > 1 {
            errors.push(FieldError::new(field("namespace"), "Namespace must be unique"));
        }

        require(&mut errors, &field("jira_ref"), &module.jira_ref);

        if require(&mut errors, &field("owner"), &module.owner)
            && !is_valid_email(module.owner.trim())
        {
            errors.push(FieldError::new(field("owner"), "Enter a valid @cisco.com email"));
        }

        if require(&mut errors, &field("repo"), &module.repo) && !is_valid_url(module.repo.trim())
        {
            errors.push(FieldError::new(field("repo"), "Enter a valid URL"));
        }

        let liquibase = module.liquibase_repo.trim();
        if !liquibase.is_empty() && !is_valid_url(liquibase) {
            errors.push(FieldError::new(field("liquibase_repo"), "Enter a valid URL"));
        }

        if module.applications.iter().all(|a| a.trim().is_empty()) {
            errors.push(FieldError::new(
                field("applications"),
                "At least one application is required",
            ));
        }
    }

    errors
}

pub(super) fn quality_assurance(form: &ReleaseNotesForm) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let qa = &form.qa;

    require(&mut errors, "conducted_by", &qa.conducted_by);
    if require(&mut errors, "results", &qa.results) && !is_valid_url(qa.results.trim()) {
        errors.push(FieldError::new("results", "Enter a valid URL"));
    }
    require(&mut errors, "status_notes", &qa.status_notes);
    require(&mut errors, "status", &qa.status);
    require(&mut errors, "crs_test_status", &qa.crs_status);
    require(&mut errors, "rollback_test_status", &qa.rollback_status);

    if form.coverage.is_empty() {
        errors.push(FieldError::new(
            "coverage",
            "At least one coverage row is required",
        ));
    }

    for (i, row) in form.coverage.iter().enumerate() {
        let n = i + 1;
        if row.kind.trim().is_empty() {
            errors.push(FieldError::required(format!("coverage[{}].type", n)));
        }
        let pct = normalize_percentage(&row.percentage);
        if pct.is_empty() {
            errors.push(FieldError::required(format!("coverage[{}].percentage", n)));
        } else if !is_valid_percentage(&pct) {
            errors.push(FieldError::new(
                format!("coverage[{}].percentage", n),
                "Format: 80%",
            ));
        }
    }

    errors
}

pub(super) fn testing(form: &ReleaseNotesForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.testing_stages.iter().all(|s| s.trim().is_empty()) {
        errors.push(FieldError::new(
            "testing_stages",
            "At least one testing stage is required",
        ));
    }

    if form.sanity_automated.is_none() {
        errors.push(FieldError::required("is_sanity_automated"));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::release_notes::{CoverageRow, ImpactLevel, ModuleForm};
    use crate::domain::wizard::WizardForm;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    fn step_one_form() -> ReleaseNotesForm {
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
        form
    }

    fn valid_module(ns: &str) -> ModuleForm {
        let mut module = ModuleForm {
            namespace: ns.into(),
            version: "1.0.0".into(),
            jira_ref: "WXCNCT-1".into(),
            owner: "dev@cisco.com".into(),
            repo: "https://github.com/org/repo".into(),
            liquibase_repo: String::new(),
            applications: vec![],
        };
        module.add_application("api");
        module
    }

    // ════════════════════════════════════════════════════════════════
    // Step 1
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn complete_release_info_passes() {
        let form = step_one_form();
        assert!(form.validate_step(1, &StepRules::default()).is_empty());
    }

    #[test]
    fn short_summary_is_rejected() {
        let mut form = step_one_form();
        form.release.summary = words(49);
        let errors = form.validate_step(1, &StepRules::default());
        assert_eq!(fields(&errors), vec!["release_summary"]);
    }

    #[test]
    fn word_count_follows_rules() {
        let mut form = step_one_form();
        form.release.summary = words(5);
        let rules = StepRules { min_word_count: 5 };
        assert!(form.validate_step(1, &rules).is_empty());
    }

    #[test]
    fn non_cisco_manager_is_rejected() {
        let mut form = step_one_form();
        form.release.manager = "rm@gmail.com".into();
        let errors = form.validate_step(1, &StepRules::default());
        assert_eq!(fields(&errors), vec!["release_manager"]);
    }

    #[test]
    fn unanswered_notification_is_rejected() {
        let mut form = step_one_form();
        form.set_customer_notification(None);
        let errors = form.validate_step(1, &StepRules::default());
        assert_eq!(fields(&errors), vec!["customer_notification"]);
    }

    // ════════════════════════════════════════════════════════════════
    // Step 2
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn impact_none_only_needs_a_service() {
        let mut form = ReleaseNotesForm::new();
        form.set_impact_level(Some(ImpactLevel::None));
        form.affected_services = vec!["webex".into()];
        assert!(form.validate_step(2, &StepRules::default()).is_empty());
    }

    #[test]
    fn impact_above_none_requires_downtime_and_details() {
        let mut form = ReleaseNotesForm::new();
        form.set_impact_level(Some(ImpactLevel::Medium));
        form.affected_services = vec!["webex".into()];
        let errors = form.validate_step(2, &StepRules::default());
        assert_eq!(fields(&errors), vec!["expected_downtime", "details"]);

        form.expected_downtime = "1:00".into();
        form.impact_details = words(10);
        let errors = form.validate_step(2, &StepRules::default());
        assert_eq!(errors[0].message, "Format: HH:MM:SS");
        assert!(errors[1].message.contains("50 words"));

        form.expected_downtime = "01:00:00".into();
        form.impact_details = words(50);
        assert!(form.validate_step(2, &StepRules::default()).is_empty());
    }

    #[test]
    fn blank_service_rows_do_not_count() {
        let mut form = ReleaseNotesForm::new();
        form.set_impact_level(Some(ImpactLevel::None));
        let errors = form.validate_step(2, &StepRules::default());
        assert_eq!(fields(&errors), vec!["affected_services"]);
    }

    // ════════════════════════════════════════════════════════════════
    // Step 3
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn valid_modules_pass() {
        let mut form = ReleaseNotesForm::new();
        form.modules = vec![valid_module("commonapps"), valid_module("billing")];
        assert!(form.validate_step(3, &StepRules::default()).is_empty());
    }

    #[test]
    fn duplicate_namespaces_flag_every_module() {
        let mut form = ReleaseNotesForm::new();
        form.modules = vec![valid_module("commonapps"), valid_module("commonapps")];
        let errors = form.validate_step(3, &StepRules::default());
        assert_eq!(
            fields(&errors),
            vec!["modules[1].namespace", "modules[2].namespace"]
        );
    }

    #[test]
    fn optional_liquibase_must_still_be_a_url() {
        let mut form = ReleaseNotesForm::new();
        let mut module = valid_module("commonapps");
        module.liquibase_repo = "not a url".into();
        form.modules = vec![module];
        let errors = form.validate_step(3, &StepRules::default());
        assert_eq!(fields(&errors), vec!["modules[1].liquibase_repo"]);
    }

    #[test]
    fn module_without_applications_is_rejected() {
        let mut form = ReleaseNotesForm::new();
        let mut module = valid_module("commonapps");
        module.remove_application("api");
        form.modules = vec![module];
        let errors = form.validate_step(3, &StepRules::default());
        assert_eq!(fields(&errors), vec!["modules[1].applications"]);
    }

    // ════════════════════════════════════════════════════════════════
    // Step 4
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn quality_assurance_checks_url_and_coverage() {
        let mut form = ReleaseNotesForm::new();
        form.qa.conducted_by = "QA team".into();
        form.qa.results = "ftp://results".into();
        form.qa.status_notes = "All green".into();
        form.qa.status = "Passed".into();
        form.qa.crs_status = "Passed".into();
        form.qa.rollback_status = "Passed".into();
        form.coverage = vec![CoverageRow::new("unit_tests", "abc")];

        let errors = form.validate_step(4, &StepRules::default());
        assert_eq!(fields(&errors), vec!["results", "coverage[1].percentage"]);

        form.qa.results = "https://qa.example.com/run/1".into();
        form.coverage = vec![CoverageRow::new("unit_tests", "80")];
        assert!(form.validate_step(4, &StepRules::default()).is_empty());
    }

    #[test]
    fn coverage_row_needs_a_kind() {
        let mut form = ReleaseNotesForm::new();
        form.coverage = vec![CoverageRow::new("", "80")];
        let errors = form.validate_step(4, &StepRules::default());
        assert!(fields(&errors).contains(&"coverage[1].type"));
    }

    // ════════════════════════════════════════════════════════════════
    // Step 5 and review
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn testing_step_requires_stage_and_selection() {
        let mut form = ReleaseNotesForm::new();
        let errors = form.validate_step(5, &StepRules::default());
        assert_eq!(fields(&errors), vec!["testing_stages", "is_sanity_automated"]);

        form.add_testing_stage("QA");
        form.sanity_automated = Some(false);
        assert!(form.validate_step(5, &StepRules::default()).is_empty());
    }

    #[test]
    fn review_step_has_no_guards() {
        let form = ReleaseNotesForm::new();
        assert!(form.validate_step(6, &StepRules::default()).is_empty());
    }
}
