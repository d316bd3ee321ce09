//! Step guards for the release tags wizard.

use crate::domain::foundation::{is_valid_email, FieldError};

use super::form::{EntryMode, ReleaseTagsForm};

pub(super) fn release_info(form: &ReleaseTagsForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("release_version", &form.release_version),
        ("release_date", &form.release_date),
        ("release_type", &form.release_type),
    ] {
        if value.trim().is_empty() {
            errors.push(FieldError::required(field));
        }
    }

    let manager = form.release_manager.trim();
    if manager.is_empty() {
        errors.push(FieldError::required("release_manager"));
    } else if !is_valid_email(manager) {
        errors.push(FieldError::new(
            "release_manager",
            "Enter a valid Cisco email address",
        ));
    }

    errors
}

pub(super) fn tag_entries(form: &ReleaseTagsForm) -> Vec<FieldError> {
    match form.entry_mode() {
        None => vec![FieldError::new("entry_mode", "Select entry mode")],
        Some(EntryMode::Manual) if form.rows.iter().all(|r| r.is_blank()) => vec![FieldError::new(
            "rows",
            "At least one tag row is required.",
        )],
        Some(EntryMode::File) if !form.csv_imported() => vec![FieldError::new(
            "csv_input",
            "Please upload a CSV file.",
        )],
        _ => Vec::new(),
    }
}
