//! Release monitoring document - category-keyed monitoring-alert entries.
//!
//! Numeric thresholds are `null` when the input was blank or not a number;
//! integers stay integers on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::domain::foundation::DocumentType;

/// Alert fields every category entry carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertFields {
    pub alert_source: Vec<String>,
    pub alert_action: String,
    pub alert_channel: Vec<String>,
    pub alert_owner: String,
    pub alert_priority: String,
    pub alert_condition: String,
    pub alert_reason: String,
    pub remediation_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiHealthEntry {
    #[serde(flatten)]
    pub alert: AlertFields,
    pub endpoint_name: String,
    pub endpoint_url: String,
    /// `HTTP` or `HTTPS`.
    pub check_type: String,
    pub expected_status_codes: String,
    pub latency_threshold_ms: Option<Number>,
    pub check_frequency_sec: Option<Number>,
    pub monitoring_interval: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionEntry {
    #[serde(flatten)]
    pub alert: AlertFields,
    pub index_name: String,
    pub timestamp_field: String,
    pub monitoring_fields: String,
    pub monitoring_interval: String,
    pub sample_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureEntry {
    #[serde(flatten)]
    pub alert: AlertFields,
    pub dashboard_name: String,
    pub panel_name: String,
    pub datasource: String,
    pub metric_query: String,
    pub threshold_value: Option<Number>,
    pub threshold_unit: String,
    pub evaluation_interval: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(flatten)]
    pub alert: AlertFields,
    pub index_name: String,
    pub timestamp_field: String,
    pub monitoring_fields: String,
    pub monitoring_interval: String,
    pub sample_query: String,
    pub threshold_count: Option<Number>,
    pub threshold_period_min: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsServicesEntry {
    #[serde(flatten)]
    pub alert: AlertFields,
    pub service_name: String,
    pub metric_name: String,
    pub namespace: String,
    pub threshold: Option<Number>,
    pub comparison_operator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    #[serde(flatten)]
    pub alert: AlertFields,
    pub queue_name: String,
    pub index_name: String,
    pub threshold_value: Option<Number>,
    pub threshold_unit: String,
    pub monitoring_interval: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbEntry {
    #[serde(flatten)]
    pub alert: AlertFields,
    pub alb_name: String,
    pub metric_name: String,
    pub threshold_value: Option<Number>,
    pub threshold_unit: String,
    pub evaluation_interval: String,
    pub athena_query: String,
}

/// The seven category arrays. Unused categories are empty arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitoringCategories {
    pub api_health_monitoring: Vec<ApiHealthEntry>,
    pub exception_monitoring: Vec<ExceptionEntry>,
    pub infrastructure_monitoring: Vec<InfrastructureEntry>,
    pub log_monitoring: Vec<LogEntry>,
    pub aws_services_monitoring: Vec<AwsServicesEntry>,
    pub queue_monitoring: Vec<QueueEntry>,
    pub alb_exceptions: Vec<AlbEntry>,
}

impl MonitoringCategories {
    pub fn entry_count(&self) -> usize {
        self.api_health_monitoring.len()
            + self.exception_monitoring.len()
            + self.infrastructure_monitoring.len()
            + self.log_monitoring.len()
            + self.aws_services_monitoring.len()
            + self.queue_monitoring.len()
            + self.alb_exceptions.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub validated_by: String,
    pub validation_status: String,
    /// `YYYY-MM-DD HH:MM:SS` or empty.
    pub last_validated_on: String,
    pub validation_comments: String,
}

/// The release monitoring document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseMonitoringDocument {
    pub file_type: DocumentType,
    pub release_version: String,
    pub release_date: String,
    pub environment: String,
    pub monitored_by: String,
    pub monitoring_summary: String,
    pub monitoring_categories: MonitoringCategories,
    pub validation_summary: ValidationSummary,
}
