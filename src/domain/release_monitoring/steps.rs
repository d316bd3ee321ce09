//! Step guards for the release monitoring wizard.

use crate::domain::foundation::{is_valid_url, FieldError};

use super::form::{parse_number, EntryDetail, MonitoringEntryForm, ReleaseMonitoringForm};

pub(super) fn release_info(form: &ReleaseMonitoringForm) -> Vec<FieldError> {
    [
        ("release_version", &form.release_version),
        ("release_date", &form.release_date),
        ("environment", &form.environment),
        ("monitored_by", &form.monitored_by),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| FieldError::required(field))
    .collect()
}

pub(super) fn category_entries(form: &ReleaseMonitoringForm) -> Vec<FieldError> {
    let Some(category) = form.selected_category() else {
        return vec![FieldError::new("category", "Select a category")];
    };

    let entries: Vec<&MonitoringEntryForm> = form.entries(category).collect();
    if entries.is_empty() {
        return vec![FieldError::new("category", "Add at least one entry")];
    }

    let mut errors = Vec::new();
    for (i, entry) in entries.into_iter().enumerate() {
        EntryGuard {
            errors: &mut errors,
            n: i + 1,
        }
        .check(entry);
    }
    errors
}

pub(super) fn validation_summary(form: &ReleaseMonitoringForm) -> Vec<FieldError> {
    let summary = &form.validation;
    let mut errors = Vec::new();

    if summary.validated_by.trim().is_empty() {
        errors.push(FieldError::required("validated_by"));
    }
    if summary.validation_status.trim().is_empty() {
        errors.push(FieldError::required("validation_status"));
    }
    if !summary.timestamp_is_valid() {
        errors.push(FieldError::new(
            "last_validated_on",
            "Format must be YYYY-MM-DD HH:MM:SS",
        ));
    }

    errors
}

struct EntryGuard<'a> {
    errors: &'a mut Vec<FieldError>,
    n: usize,
}

impl EntryGuard<'_> {
    fn field(&self, name: &str) -> String {
        format!("entries[{}].{}", self.n, name)
    }

    fn text(&mut self, name: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            let field = self.field(name);
            self.errors.push(FieldError::new(field, "Required"));
            return false;
        }
        true
    }

    fn multi(&mut self, name: &str, values: &[String]) {
        if values.iter().all(|v| v.trim().is_empty()) {
            let field = self.field(name);
            self.errors.push(FieldError::new(field, "Required"));
        }
    }

    fn number(&mut self, name: &str, value: &str) {
        if self.text(name, value) && parse_number(value).is_none() {
            let field = self.field(name);
            self.errors.push(FieldError::new(field, "Must be a number"));
        }
    }

    fn check(mut self, entry: &MonitoringEntryForm) {
        let alert = &entry.alert;
        self.text("alert_action", &alert.alert_action);
        self.text("alert_priority", &alert.alert_priority);
        self.text("alert_condition", &alert.alert_condition);
        self.text("alert_reason", &alert.alert_reason);
        self.multi("alert_source", &alert.alert_source);
        self.multi("alert_channel", &alert.alert_channel);

        match &entry.detail {
            EntryDetail::ApiHealth(d) => {
                self.text("endpoint_name", &d.endpoint_name);
                if self.text("check_type", &d.check_type)
                    && !matches!(d.check_type.trim(), "HTTP" | "HTTPS")
                {
                    let field = self.field("check_type");
                    self.errors
                        .push(FieldError::new(field, "Must be HTTP or HTTPS"));
                }
                if self.text("endpoint_url", &d.endpoint_url)
                    && !is_valid_url(d.endpoint_url.trim())
                {
                    let field = self.field("endpoint_url");
                    self.errors.push(FieldError::new(field, "Invalid URL"));
                }
            }
            EntryDetail::Exception(d) => {
                self.text("index_name", &d.index_name);
                self.text("timestamp_field", &d.timestamp_field);
            }
            EntryDetail::Infrastructure(d) => {
                self.text("dashboard_name", &d.dashboard_name);
                self.text("panel_name", &d.panel_name);
                self.text("metric_query", &d.metric_query);
            }
            EntryDetail::Log(d) => {
                self.text("index_name", &d.index_name);
                self.text("timestamp_field", &d.timestamp_field);
            }
            EntryDetail::AwsServices(d) => {
                self.text("service_name", &d.service_name);
                self.text("metric_name", &d.metric_name);
                self.text("namespace", &d.namespace);
                self.number("threshold", &d.threshold);
                self.text("comparison_operator", &d.comparison_operator);
            }
            EntryDetail::Queue(d) => {
                self.text("queue_name", &d.queue_name);
                self.text("index_name", &d.index_name);
                self.number("threshold_value", &d.threshold_value);
                self.text("threshold_unit", &d.threshold_unit);
            }
            EntryDetail::Alb(d) => {
                self.text("alb_name", &d.alb_name);
                self.text("metric_name", &d.metric_name);
                self.number("threshold_value", &d.threshold_value);
            }
        }

        if alert.remediation_actions.iter().all(|a| a.trim().is_empty()) {
            let field = self.field("remediation_actions");
            self.errors
                .push(FieldError::new(field, "At least one action required"));
        }
    }
}
