//! Shared Validator - Implementation of DocumentValidator.
//!
//! One rule engine for all four release documents. Rules run over the
//! parsed `serde_json::Value` so that hand-edited or externally produced
//! files are checked exactly like wizard output.
//!
//! Every applicable rule is evaluated; errors are collected in document
//! order and never short-circuit. A missing parent object yields a single
//! `Missing <field>` error and its children are not inspected.

use std::collections::HashMap;
use std::fmt::Display;

use serde_json::{Map, Value};

use crate::domain::foundation::{
    is_valid_downtime, is_valid_email, is_valid_percentage, is_valid_timestamp, is_valid_url,
    DocumentType,
};
use crate::domain::release_instructions::CUSTOM_CATEGORY;
use crate::domain::release_monitoring::MonitoringCategory;
use crate::domain::release_notes::ImpactLevel;
use crate::ports::DocumentValidator;

type Object = Map<String, Value>;

/// Rule engine for release documents.
///
/// Stateless; one instance can be shared across threads and wizards.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedValidator;

impl SharedValidator {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    // Release notes
    // =========================================================================

    fn validate_release_notes(&self, root: &Object, errors: &mut Vec<String>) {
        let mut scope = Scope::root(errors);

        for field in [
            "release_version",
            "release_date",
            "release_type",
            "release_summary",
        ] {
            scope.text(root, field);
        }
        scope.email(root, "release_manager");
        for field in [
            "vulerability_scan",
            "security_approval_status",
            "Cross_tenant_dataleak_check",
        ] {
            scope.text(root, field);
        }

        if let Some(notification) = root.get("customer_notification") {
            match notification.as_object() {
                Some(obj) => {
                    if let Some(flag) = obj.get("notification_required") {
                        if !flag.is_boolean() {
                            scope.push("customer_notification.notification_required must be a boolean");
                        }
                    }
                }
                None => scope.push("customer_notification must be an object"),
            }
        }

        if let Some(impact) = scope.object(root, "impact_info") {
            Self::validate_impact(&mut scope.nested("Impact Info: "), impact);
        }

        if let Some(modules) = scope.non_empty_array(root, "modules") {
            Self::validate_modules(&mut *scope.errors, modules);
        }

        if let Some(qa) = scope.object(root, "quality_assurance") {
            Self::validate_quality_assurance(&mut scope.nested("Quality Assurance: "), qa);
        }

        scope.non_empty_array(root, "testing_stages");

        if let Some(automation) = scope.object(root, "test_automation") {
            scope
                .nested("Test Automation: ")
                .boolean(automation, "is_sanity_automated");
        }

        if let Some(observations) = root.get("qa_observations") {
            if !observations.is_array() {
                scope.push("qa_observations must be an array");
            }
        }
    }

    fn validate_impact(scope: &mut Scope<'_>, impact: &Object) {
        let Some(level) = scope.text(impact, "impact_level") else {
            return;
        };
        let Some(level) = ImpactLevel::parse(level) else {
            scope.push("impact_level must be one of None, Low, Medium, High");
            return;
        };
        if level.requires_details() {
            if let Some(downtime) = scope.text(impact, "expected_downtime") {
                if !is_valid_downtime(downtime) {
                    scope.push("expected_downtime must be HH:MM:SS");
                }
            }
            scope.text(impact, "details");
        }
    }

    fn validate_modules(errors: &mut Vec<String>, modules: &[Value]) {
        let namespaces: Vec<Option<&str>> = modules
            .iter()
            .map(|m| present_str(m.get("namespace")))
            .collect();
        let counts = occurrences(namespaces.iter().flatten().copied());

        for (i, module) in modules.iter().enumerate() {
            let mut scope = Scope::with_prefix(errors, format!("Module {}: ", i + 1));
            let Some(obj) = scope.entry(module) else {
                continue;
            };

            if scope.text(obj, "namespace").is_some() {
                if let Some(ns) = namespaces[i] {
                    if counts.get(ns).copied().unwrap_or(0) > 1 {
                        scope.push("namespace must be unique");
                    }
                }
            }
            scope.text(obj, "jira_ref");
            scope.email(obj, "owner");
            scope.url(obj, "repo");
            scope.optional_url(obj, "liquibase_repo");
            scope.non_empty_array(obj, "applications");
        }
    }

    fn validate_quality_assurance(scope: &mut Scope<'_>, qa: &Object) {
        scope.text(qa, "conducted_by");
        scope.url(qa, "results");
        for field in [
            "status_notes",
            "status",
            "crs_test_status",
            "rollback_test_status",
        ] {
            scope.text(qa, field);
        }

        let Some(coverage) = scope.object(qa, "coverage") else {
            return;
        };
        if coverage.is_empty() {
            scope.push("coverage must contain at least one entry");
        }
        for (kind, pct) in coverage {
            match pct.as_str() {
                Some(p) if is_valid_percentage(p) => {}
                _ => scope.push(format!("coverage.{} must be a percentage like 80%", kind)),
            }
        }
    }

    // =========================================================================
    // Release tags
    // =========================================================================

    fn validate_release_tags(&self, root: &Object, errors: &mut Vec<String>) {
        let mut scope = Scope::root(errors);

        for field in ["release_version", "release_date", "release_type"] {
            scope.text(root, field);
        }
        scope.email(root, "release_manager");

        let Some(namespaces) = scope.object(root, "namespaces") else {
            return;
        };
        if namespaces.is_empty() {
            scope.push("namespaces must contain at least one namespace");
        }

        for (ns, block) in namespaces {
            if ns.trim().is_empty() {
                scope.push("namespaces contains an empty namespace name");
            }
            let mut block_scope = scope.nested(format!("Namespace {}: ", ns));
            let Some(block) = block_scope.entry(block) else {
                continue;
            };
            block_scope.text(block, "jira_ref");

            let Some(components) = block_scope.non_empty_array(block, "components") else {
                continue;
            };
            for (i, component) in components.iter().enumerate() {
                let mut component_scope =
                    scope.nested(format!("Namespace {}, component {}: ", ns, i + 1));
                if let Some(component) = component_scope.entry(component) {
                    component_scope.text(component, "component_name");
                    component_scope.text(component, "component_tag");
                }
            }
        }
    }

    // =========================================================================
    // Release instructions
    // =========================================================================

    fn validate_release_instructions(&self, root: &Object, errors: &mut Vec<String>) {
        let mut scope = Scope::root(errors);

        scope.text(root, "release_version");
        scope.text(root, "release_date");
        scope.email(root, "release_by");

        let Some(changes) = scope.non_empty_array(root, "manual_changes") else {
            return;
        };

        let ids: Vec<Option<i64>> = changes
            .iter()
            .map(|c| c.get("sequence_id").and_then(Value::as_i64).filter(|id| *id != 0))
            .collect();
        let counts = occurrences(ids.iter().flatten().copied());

        for (i, change) in changes.iter().enumerate() {
            let mut change_scope = scope.nested(format!("Instruction {}: ", i + 1));
            let Some(obj) = change_scope.entry(change) else {
                continue;
            };

            if change_scope.sequence_id(obj) {
                if let Some(id) = ids[i] {
                    if counts.get(&id).copied().unwrap_or(0) > 1 {
                        change_scope.push("sequence_id must be unique");
                    }
                }
            }
            Self::validate_change(&mut change_scope, obj);
        }
    }

    fn validate_change(scope: &mut Scope<'_>, change: &Object) {
        scope.text(change, "phase");
        if let Some(category) = scope.text(change, "category") {
            if category == CUSTOM_CATEGORY {
                scope.push("category Custom requires a custom category name");
            }
        }
        scope.text(change, "description");
        scope.text(change, "namespaces");
        scope.optional_email(change, "owner");
        scope.non_empty_array(change, "components");
        scope.text(change, "risk_level");

        scope.flag(change, "restart_required");
        let downtime = scope.flag(change, "downtime_required");
        let rollback = scope.flag(change, "rollback_possible");
        let automation = scope.flag(change, "automation");

        if downtime == Some(true) && !has_text(change.get("estimated_downtime")) {
            scope.push("estimated_downtime required because downtime_required is true");
        }
        if automation == Some(true) && !has_text(change.get("automation_script")) {
            scope.push("automation_script required because automation is true");
        }

        scope.non_empty_array(change, "execution_steps");
        scope.non_empty_array(change, "validation_steps");

        if rollback == Some(true) && !has_items(change.get("rollback_steps")) {
            scope.push("rollback_steps required because rollback_possible is true");
        }
    }

    // =========================================================================
    // Release monitoring
    // =========================================================================

    fn validate_release_monitoring(&self, root: &Object, errors: &mut Vec<String>) {
        let mut scope = Scope::root(errors);

        for field in [
            "release_version",
            "release_date",
            "environment",
            "monitored_by",
        ] {
            scope.text(root, field);
        }

        if let Some(categories) = scope.object(root, "monitoring_categories") {
            let mut total = 0;
            for category in MonitoringCategory::all() {
                let Some(value) = categories.get(category.wire_key()) else {
                    continue;
                };
                let Some(entries) = value.as_array() else {
                    scope.push(format!("{} must be an array", category.wire_key()));
                    continue;
                };
                total += entries.len();
                for (i, entry) in entries.iter().enumerate() {
                    let mut entry_scope =
                        scope.nested(format!("{} Entry {}: ", category.label(), i + 1));
                    if let Some(obj) = entry_scope.entry(entry) {
                        Self::validate_monitoring_entry(&mut entry_scope, *category, obj);
                    }
                }
            }
            if total == 0 {
                scope.push("monitoring_categories must contain at least one entry");
            }
        }

        if let Some(summary) = scope.object(root, "validation_summary") {
            let mut summary_scope = scope.nested("Validation Summary: ");
            summary_scope.text(summary, "validated_by");
            summary_scope.text(summary, "validation_status");
            if let Some(ts) = present_str(summary.get("last_validated_on")) {
                if !is_valid_timestamp(ts) {
                    summary_scope.push("last_validated_on must be YYYY-MM-DD HH:MM:SS");
                }
            }
        }
    }

    fn validate_monitoring_entry(scope: &mut Scope<'_>, category: MonitoringCategory, entry: &Object) {
        scope.non_empty_array(entry, "alert_source");
        scope.non_empty_array(entry, "alert_channel");
        for field in [
            "alert_action",
            "alert_priority",
            "alert_condition",
            "alert_reason",
        ] {
            scope.text(entry, field);
        }

        match category {
            MonitoringCategory::ApiHealth => {
                scope.text(entry, "endpoint_name");
                if let Some(check_type) = scope.text(entry, "check_type") {
                    if !matches!(check_type, "HTTP" | "HTTPS") {
                        scope.push("check_type must be HTTP or HTTPS");
                    }
                }
                scope.url(entry, "endpoint_url");
                scope.optional_number(entry, "latency_threshold_ms");
                scope.optional_number(entry, "check_frequency_sec");
            }
            MonitoringCategory::Exception => {
                scope.text(entry, "index_name");
                scope.text(entry, "timestamp_field");
            }
            MonitoringCategory::Infrastructure => {
                scope.text(entry, "dashboard_name");
                scope.text(entry, "panel_name");
                scope.text(entry, "metric_query");
                scope.optional_number(entry, "threshold_value");
            }
            MonitoringCategory::Log => {
                scope.text(entry, "index_name");
                scope.text(entry, "timestamp_field");
                scope.optional_number(entry, "threshold_count");
                scope.optional_number(entry, "threshold_period_min");
            }
            MonitoringCategory::AwsServices => {
                scope.text(entry, "metric_name");
                scope.text(entry, "namespace");
                scope.number(entry, "threshold");
                scope.text(entry, "comparison_operator");
            }
            MonitoringCategory::Queue => {
                scope.text(entry, "queue_name");
                scope.text(entry, "index_name");
                scope.number(entry, "threshold_value");
                scope.text(entry, "threshold_unit");
            }
            MonitoringCategory::Alb => {
                scope.text(entry, "alb_name");
                scope.text(entry, "metric_name");
                scope.number(entry, "threshold_value");
            }
        }

        // Older exports spell the list in the singular.
        if entry.contains_key("remediation_actions") {
            scope.non_empty_array(entry, "remediation_actions");
        } else if entry.contains_key("remediation_action") {
            scope.non_empty_array(entry, "remediation_action");
        } else {
            scope.push("Missing remediation_actions");
        }
    }
}

impl DocumentValidator for SharedValidator {
    fn validate(&self, document: &Value, file_type: &str) -> Vec<String> {
        let Some(document_type) = DocumentType::from_file_type(file_type) else {
            tracing::debug!(file_type, "unknown document type");
            return vec![format!("Unknown file_type: {}", file_type)];
        };
        let Some(root) = document.as_object() else {
            return vec!["Invalid JSON object".to_string()];
        };

        let mut errors = Vec::new();
        match document_type {
            DocumentType::ReleaseNotes => self.validate_release_notes(root, &mut errors),
            DocumentType::ReleaseTags => self.validate_release_tags(root, &mut errors),
            DocumentType::ReleaseInstructions => {
                self.validate_release_instructions(root, &mut errors)
            }
            DocumentType::ReleaseMonitoring => self.validate_release_monitoring(root, &mut errors),
        }

        tracing::debug!(file_type, error_count = errors.len(), "document validated");
        errors
    }
}

// =============================================================================
// Rule helpers
// =============================================================================

/// Error sink with the message prefix of the record being checked.
struct Scope<'a> {
    errors: &'a mut Vec<String>,
    prefix: String,
}

impl<'a> Scope<'a> {
    fn root(errors: &'a mut Vec<String>) -> Self {
        Self::with_prefix(errors, String::new())
    }

    fn with_prefix(errors: &'a mut Vec<String>, prefix: String) -> Self {
        Self { errors, prefix }
    }

    fn nested(&mut self, prefix: impl Into<String>) -> Scope<'_> {
        Scope {
            errors: &mut *self.errors,
            prefix: prefix.into(),
        }
    }

    fn push(&mut self, message: impl Display) {
        self.errors.push(format!("{}{}", self.prefix, message));
    }

    /// An array element that must be an object.
    fn entry<'v>(&mut self, value: &'v Value) -> Option<&'v Object> {
        let obj = value.as_object();
        if obj.is_none() {
            self.push("must be an object");
        }
        obj
    }

    /// Required text: a string that is non-empty after trimming.
    fn text<'v>(&mut self, obj: &'v Object, field: &str) -> Option<&'v str> {
        match obj.get(field) {
            None | Some(Value::Null) => {
                self.push(format_args!("Missing {}", field));
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.push(format_args!("Missing {}", field));
                None
            }
            Some(Value::String(s)) => Some(s.trim()),
            Some(_) => {
                self.push(format_args!("{} must be a string", field));
                None
            }
        }
    }

    fn email(&mut self, obj: &Object, field: &str) {
        if let Some(value) = self.text(obj, field) {
            if !is_valid_email(value) {
                self.push(format_args!("{} must be a valid @cisco.com email", field));
            }
        }
    }

    fn optional_email(&mut self, obj: &Object, field: &str) {
        if let Some(value) = present_str(obj.get(field)) {
            if !is_valid_email(value) {
                self.push(format_args!("{} must be a valid @cisco.com email", field));
            }
        }
    }

    fn url(&mut self, obj: &Object, field: &str) {
        if let Some(value) = self.text(obj, field) {
            if !is_valid_url(value) {
                self.push(format_args!("{} must be a valid URL", field));
            }
        }
    }

    fn optional_url(&mut self, obj: &Object, field: &str) {
        if let Some(value) = present_str(obj.get(field)) {
            if !is_valid_url(value) {
                self.push(format_args!("{} must be a valid URL", field));
            }
        }
    }

    fn object<'v>(&mut self, obj: &'v Object, field: &str) -> Option<&'v Object> {
        match obj.get(field) {
            None | Some(Value::Null) => {
                self.push(format_args!("Missing {}", field));
                None
            }
            Some(Value::Object(inner)) => Some(inner),
            Some(_) => {
                self.push(format_args!("{} must be an object", field));
                None
            }
        }
    }

    fn non_empty_array<'v>(&mut self, obj: &'v Object, field: &str) -> Option<&'v [Value]> {
        match obj.get(field) {
            None | Some(Value::Null) => {
                self.push(format_args!("Missing {}", field));
                None
            }
            Some(Value::Array(items)) if items.is_empty() => {
                self.push(format_args!("{} must contain at least one item", field));
                None
            }
            Some(Value::Array(items)) => Some(items),
            Some(_) => {
                self.push(format_args!("{} must be an array", field));
                None
            }
        }
    }

    fn boolean(&mut self, obj: &Object, field: &str) -> Option<bool> {
        match obj.get(field) {
            None | Some(Value::Null) => {
                self.push(format_args!("Missing {}", field));
                None
            }
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                self.push(format_args!("{} must be a boolean", field));
                None
            }
        }
    }

    /// A yes/no flag: a boolean, or the strings `"true"` / `"false"`.
    fn flag(&mut self, obj: &Object, field: &str) -> Option<bool> {
        match obj.get(field) {
            None | Some(Value::Null) => {
                self.push(format_args!("Missing {}", field));
                None
            }
            Some(Value::Bool(b)) => Some(*b),
            Some(Value::String(s)) if s == "true" => Some(true),
            Some(Value::String(s)) if s == "false" => Some(false),
            Some(_) => {
                self.push(format_args!("{} must be true or false", field));
                None
            }
        }
    }

    /// Required number; zero counts as present.
    fn number(&mut self, obj: &Object, field: &str) {
        match obj.get(field) {
            None | Some(Value::Null) => self.push(format_args!("Missing {}", field)),
            Some(Value::Number(_)) => {}
            Some(_) => self.push(format_args!("{} must be a number", field)),
        }
    }

    fn optional_number(&mut self, obj: &Object, field: &str) {
        match obj.get(field) {
            None | Some(Value::Null) | Some(Value::Number(_)) => {}
            Some(_) => self.push(format_args!("{} must be a number", field)),
        }
    }

    /// `sequence_id` must be a non-zero integer. Returns true when it is.
    fn sequence_id(&mut self, obj: &Object) -> bool {
        match obj.get("sequence_id") {
            None | Some(Value::Null) => self.push("Missing sequence_id"),
            Some(v) if v.as_i64() == Some(0) => self.push("Missing sequence_id"),
            Some(v) if v.as_i64().is_some() => return true,
            Some(_) => self.push("sequence_id must be an integer"),
        }
        false
    }
}

fn present_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn has_text(value: Option<&Value>) -> bool {
    present_str(value).is_some()
}

fn has_items(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

fn occurrences<K, I>(keys: I) -> HashMap<K, usize>
where
    K: std::hash::Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut counts = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}
