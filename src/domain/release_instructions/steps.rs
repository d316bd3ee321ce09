//! Step guards for the release instructions wizard.

use std::collections::HashMap;

use crate::domain::foundation::{is_valid_email, FieldError};

use super::form::{ManualChangeForm, ReleaseInstructionsForm};

pub(super) fn release_info(form: &ReleaseInstructionsForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.release_version.trim().is_empty() {
        errors.push(FieldError::required("release_version"));
    }
    if form.release_date.trim().is_empty() {
        errors.push(FieldError::required("release_date"));
    }

    let release_by = form.release_by.trim();
    if release_by.is_empty() {
        errors.push(FieldError::required("release_by"));
    } else if !is_valid_email(release_by) {
        errors.push(FieldError::new("release_by", "Invalid email"));
    }

    errors
}

pub(super) fn manual_changes(form: &ReleaseInstructionsForm) -> Vec<FieldError> {
    if form.changes.is_empty() {
        return vec![FieldError::new(
            "manual_changes",
            "At least one instruction is required.",
        )];
    }

    let mut errors = Vec::new();
    for (i, change) in form.changes.iter().enumerate() {
        check_change(&mut errors, i + 1, change);
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    for change in &form.changes {
        if let Some(key) = sequence_key(change) {
            *seen.entry(key).or_default() += 1;
        }
    }
    for (i, change) in form.changes.iter().enumerate() {
        let count = sequence_key(change)
            .and_then(|key| seen.get(&key).copied())
            .unwrap_or(0);
        if count > 1 {
            errors.push(FieldError::new(
                format!("changes[{}].sequence_id", i + 1),
                "Sequence ID must be unique",
            ));
        }
    }

    errors
}

/// `2` and `2.0` name the same sequence id.
fn sequence_key(change: &ManualChangeForm) -> Option<String> {
    let raw = change.sequence_id.trim();
    if raw.is_empty() {
        return None;
    }
    Some(
        change
            .sequence_number()
            .map(|n| n.to_string())
            .unwrap_or_else(|| raw.to_string()),
    )
}

fn check_change(errors: &mut Vec<FieldError>, n: usize, change: &ManualChangeForm) {
    let field = |name: &str| format!("changes[{}].{}", n, name);

    for (name, value) in [
        ("sequence_id", change.sequence_id.as_str()),
        ("phase", change.phase.as_str()),
        ("category", change.category()),
        ("description", change.description.as_str()),
        ("namespaces", change.namespaces.as_str()),
        ("responsible_team", change.responsible_team.as_str()),
        ("risk_level", change.risk_level.as_str()),
    ] {
        if value.trim().is_empty() {
            errors.push(FieldError::required(field(name)));
        }
    }

    if !change.sequence_id.trim().is_empty() && change.sequence_number().is_none() {
        errors.push(FieldError::new(
            field("sequence_id"),
            "Sequence ID must be a whole number",
        ));
    }

    for (name, value) in [
        ("automation", change.automation()),
        ("restart_required", change.restart_required),
        ("downtime_required", change.downtime_required()),
        ("rollback_possible", change.rollback_possible),
    ] {
        if value.is_none() {
            errors.push(FieldError::required(field(name)));
        }
    }

    if change.is_custom() && change.custom_category().trim().is_empty() {
        errors.push(FieldError::required(field("custom_category")));
    }

    let owner = change.owner.trim();
    if !owner.is_empty() && !is_valid_email(owner) {
        errors.push(FieldError::new(field("owner"), "Invalid email"));
    }

    if change.automation() == Some(true) && change.automation_script().trim().is_empty() {
        errors.push(FieldError::required(field("automation_script")));
    }

    if change.downtime_required() == Some(true) && change.estimated_downtime().trim().is_empty() {
        errors.push(FieldError::required(field("estimated_downtime")));
    }

    if change.components.iter().all(|c| c.trim().is_empty()) {
        errors.push(FieldError::new(
            field("components"),
            "At least one component is required",
        ));
    }

    if change.execution_steps.iter().all(|s| s.trim().is_empty()) {
        errors.push(FieldError::new(
            field("execution_steps"),
            "At least one execution step is required",
        ));
    }

    if change.validation_steps.iter().all(|s| s.trim().is_empty()) {
        errors.push(FieldError::new(
            field("validation_steps"),
            "At least one validation step is required",
        ));
    }

    if change.rollback_possible == Some(true)
        && change.rollback_steps.iter().all(|s| s.trim().is_empty())
    {
        errors.push(FieldError::new(
            field("rollback_steps"),
            "Rollback steps are required when rollback is possible",
        ));
    }
}
