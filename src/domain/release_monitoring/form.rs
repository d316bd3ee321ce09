//! Release monitoring form state and document assembly.

use serde_json::Number;

use crate::domain::foundation::{
    normalize_release_date, DocumentType, FieldError, ValidationTimestamp,
};
use crate::domain::wizard::{non_blank, push_chip, StepRules, WizardForm};

use super::category::MonitoringCategory;
use super::document::{
    AlbEntry, AlertFields, ApiHealthEntry, AwsServicesEntry, ExceptionEntry,
    InfrastructureEntry, LogEntry, MonitoringCategories, QueueEntry, ReleaseMonitoringDocument,
    ValidationSummary,
};
use super::steps;

/// Parses a numeric input. Blank, non-numeric and non-finite input give `None`.
pub fn parse_number(raw: &str) -> Option<Number> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Number::from(n));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Alert inputs shared by every entry card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertForm {
    pub alert_source: Vec<String>,
    pub alert_action: String,
    pub alert_channel: Vec<String>,
    pub alert_owner: String,
    pub alert_priority: String,
    pub alert_condition: String,
    pub alert_reason: String,
    pub remediation_actions: Vec<String>,
}

impl AlertForm {
    pub fn add_remediation(&mut self, action: &str) -> bool {
        push_chip(&mut self.remediation_actions, action)
    }

    pub fn remove_remediation(&mut self, action: &str) {
        self.remediation_actions.retain(|a| a != action);
    }

    fn build(&self) -> AlertFields {
        AlertFields {
            alert_source: non_blank(&self.alert_source),
            alert_action: self.alert_action.trim().to_string(),
            alert_channel: non_blank(&self.alert_channel),
            alert_owner: self.alert_owner.trim().to_string(),
            alert_priority: self.alert_priority.trim().to_string(),
            alert_condition: self.alert_condition.trim().to_string(),
            alert_reason: self.alert_reason.trim().to_string(),
            remediation_actions: non_blank(&self.remediation_actions),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiHealthForm {
    pub endpoint_name: String,
    pub endpoint_url: String,
    pub check_type: String,
    pub expected_status_codes: String,
    pub latency_threshold_ms: String,
    pub check_frequency_sec: String,
    pub monitoring_interval: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExceptionForm {
    pub index_name: String,
    pub timestamp_field: String,
    pub monitoring_fields: String,
    pub monitoring_interval: String,
    pub sample_query: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfrastructureForm {
    pub dashboard_name: String,
    pub panel_name: String,
    pub datasource: String,
    pub metric_query: String,
    pub threshold_value: String,
    pub threshold_unit: String,
    pub evaluation_interval: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogForm {
    pub index_name: String,
    pub timestamp_field: String,
    pub monitoring_fields: String,
    pub monitoring_interval: String,
    pub sample_query: String,
    pub threshold_count: String,
    pub threshold_period_min: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AwsServicesForm {
    pub service_name: String,
    pub metric_name: String,
    pub namespace: String,
    pub threshold: String,
    pub comparison_operator: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueForm {
    pub queue_name: String,
    pub index_name: String,
    pub threshold_value: String,
    pub threshold_unit: String,
    pub monitoring_interval: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbForm {
    pub alb_name: String,
    pub metric_name: String,
    pub threshold_value: String,
    pub threshold_unit: String,
    pub evaluation_interval: String,
    pub athena_query: String,
}

/// Category-specific inputs of one entry card.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryDetail {
    ApiHealth(ApiHealthForm),
    Exception(ExceptionForm),
    Infrastructure(InfrastructureForm),
    Log(LogForm),
    AwsServices(AwsServicesForm),
    Queue(QueueForm),
    Alb(AlbForm),
}

impl EntryDetail {
    /// Empty inputs for a category.
    pub fn blank(category: MonitoringCategory) -> Self {
        match category {
            MonitoringCategory::ApiHealth => EntryDetail::ApiHealth(Default::default()),
            MonitoringCategory::Exception => EntryDetail::Exception(Default::default()),
            MonitoringCategory::Infrastructure => {
                EntryDetail::Infrastructure(Default::default())
            }
            MonitoringCategory::Log => EntryDetail::Log(Default::default()),
            MonitoringCategory::AwsServices => EntryDetail::AwsServices(Default::default()),
            MonitoringCategory::Queue => EntryDetail::Queue(Default::default()),
            MonitoringCategory::Alb => EntryDetail::Alb(Default::default()),
        }
    }

    pub fn category(&self) -> MonitoringCategory {
        match self {
            EntryDetail::ApiHealth(_) => MonitoringCategory::ApiHealth,
            EntryDetail::Exception(_) => MonitoringCategory::Exception,
            EntryDetail::Infrastructure(_) => MonitoringCategory::Infrastructure,
            EntryDetail::Log(_) => MonitoringCategory::Log,
            EntryDetail::AwsServices(_) => MonitoringCategory::AwsServices,
            EntryDetail::Queue(_) => MonitoringCategory::Queue,
            EntryDetail::Alb(_) => MonitoringCategory::Alb,
        }
    }
}

/// One entry card: shared alert inputs plus category inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoringEntryForm {
    pub alert: AlertForm,
    pub detail: EntryDetail,
}

impl MonitoringEntryForm {
    pub fn new(category: MonitoringCategory) -> Self {
        Self {
            alert: AlertForm::default(),
            detail: EntryDetail::blank(category),
        }
    }

    pub fn category(&self) -> MonitoringCategory {
        self.detail.category()
    }
}

fn text(value: &str) -> String {
    value.trim().to_string()
}

/// Validation summary inputs on step 3.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationSummaryForm {
    pub validated_by: String,
    pub validation_status: String,
    /// Raw picker value, `YYYY-MM-DDTHH:MM[:SS]`; an already formatted
    /// `YYYY-MM-DD HH:MM:SS` is accepted too.
    pub last_validated_on: String,
    pub validation_comments: String,
}

impl ValidationSummaryForm {
    fn parsed_timestamp(&self) -> Option<ValidationTimestamp> {
        let raw = self.last_validated_on.trim();
        ValidationTimestamp::from_datetime_local(raw)
            .or_else(|_| ValidationTimestamp::parse(raw))
            .ok()
    }

    /// True when the timestamp is blank or parses.
    pub fn timestamp_is_valid(&self) -> bool {
        self.last_validated_on.trim().is_empty() || self.parsed_timestamp().is_some()
    }

    /// `YYYY-MM-DD HH:MM:SS`, or empty when blank or unparseable.
    pub fn formatted_last_validated_on(&self) -> String {
        self.parsed_timestamp()
            .map(|ts| ts.to_string())
            .unwrap_or_default()
    }

    fn build(&self) -> ValidationSummary {
        ValidationSummary {
            validated_by: text(&self.validated_by),
            validation_status: text(&self.validation_status),
            last_validated_on: self.formatted_last_validated_on(),
            validation_comments: text(&self.validation_comments),
        }
    }
}

/// Everything the release monitoring wizard collects.
///
/// Entries of every category are kept and exported, not only those of
/// the selected category; the selection decides which cards step 2 shows
/// and guards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseMonitoringForm {
    pub release_version: String,
    pub release_date: String,
    pub environment: String,
    pub monitored_by: String,
    pub monitoring_summary: String,
    selected_category: Option<MonitoringCategory>,
    entries: Vec<MonitoringEntryForm>,
    pub validation: ValidationSummaryForm,
}

impl ReleaseMonitoringForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_category(&self) -> Option<MonitoringCategory> {
        self.selected_category
    }

    /// Selects a category; the first selection of a category opens one
    /// empty entry card.
    pub fn select_category(&mut self, category: Option<MonitoringCategory>) {
        self.selected_category = category;
        if let Some(category) = category {
            if self.entries(category).next().is_none() {
                self.add_entry(category);
            }
        }
    }

    /// Appends an entry card to a category.
    pub fn add_entry(&mut self, category: MonitoringCategory) -> &mut MonitoringEntryForm {
        self.entries.push(MonitoringEntryForm::new(category));
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    pub fn entries(
        &self,
        category: MonitoringCategory,
    ) -> impl Iterator<Item = &MonitoringEntryForm> {
        self.entries.iter().filter(move |e| e.category() == category)
    }

    pub fn entry_mut(
        &mut self,
        category: MonitoringCategory,
        index: usize,
    ) -> Option<&mut MonitoringEntryForm> {
        self.entries
            .iter_mut()
            .filter(|e| e.category() == category)
            .nth(index)
    }

    pub fn remove_entry(&mut self, category: MonitoringCategory, index: usize) -> bool {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.category() == category)
            .nth(index)
            .map(|(i, _)| i);
        match position {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    fn build_categories(&self) -> MonitoringCategories {
        let mut categories = MonitoringCategories::default();
        for entry in &self.entries {
            let alert = entry.alert.build();
            match &entry.detail {
                EntryDetail::ApiHealth(d) => categories.api_health_monitoring.push(ApiHealthEntry {
                    alert,
                    endpoint_name: text(&d.endpoint_name),
                    endpoint_url: text(&d.endpoint_url),
                    check_type: text(&d.check_type),
                    expected_status_codes: text(&d.expected_status_codes),
                    latency_threshold_ms: parse_number(&d.latency_threshold_ms),
                    check_frequency_sec: parse_number(&d.check_frequency_sec),
                    monitoring_interval: text(&d.monitoring_interval),
                }),
                EntryDetail::Exception(d) => categories.exception_monitoring.push(ExceptionEntry {
                    alert,
                    index_name: text(&d.index_name),
                    timestamp_field: text(&d.timestamp_field),
                    monitoring_fields: text(&d.monitoring_fields),
                    monitoring_interval: text(&d.monitoring_interval),
                    sample_query: text(&d.sample_query),
                }),
                EntryDetail::Infrastructure(d) => {
                    categories
                        .infrastructure_monitoring
                        .push(InfrastructureEntry {
                            alert,
                            dashboard_name: text(&d.dashboard_name),
                            panel_name: text(&d.panel_name),
                            datasource: text(&d.datasource),
                            metric_query: text(&d.metric_query),
                            threshold_value: parse_number(&d.threshold_value),
                            threshold_unit: text(&d.threshold_unit),
                            evaluation_interval: text(&d.evaluation_interval),
                        })
                }
                EntryDetail::Log(d) => categories.log_monitoring.push(LogEntry {
                    alert,
                    index_name: text(&d.index_name),
                    timestamp_field: text(&d.timestamp_field),
                    monitoring_fields: text(&d.monitoring_fields),
                    monitoring_interval: text(&d.monitoring_interval),
                    sample_query: text(&d.sample_query),
                    threshold_count: parse_number(&d.threshold_count),
                    threshold_period_min: parse_number(&d.threshold_period_min),
                }),
                EntryDetail::AwsServices(d) => {
                    categories.aws_services_monitoring.push(AwsServicesEntry {
                        alert,
                        service_name: text(&d.service_name),
                        metric_name: text(&d.metric_name),
                        namespace: text(&d.namespace),
                        threshold: parse_number(&d.threshold),
                        comparison_operator: text(&d.comparison_operator),
                    })
                }
                EntryDetail::Queue(d) => categories.queue_monitoring.push(QueueEntry {
                    alert,
                    queue_name: text(&d.queue_name),
                    index_name: text(&d.index_name),
                    threshold_value: parse_number(&d.threshold_value),
                    threshold_unit: text(&d.threshold_unit),
                    monitoring_interval: text(&d.monitoring_interval),
                }),
                EntryDetail::Alb(d) => categories.alb_exceptions.push(AlbEntry {
                    alert,
                    alb_name: text(&d.alb_name),
                    metric_name: text(&d.metric_name),
                    threshold_value: parse_number(&d.threshold_value),
                    threshold_unit: text(&d.threshold_unit),
                    evaluation_interval: text(&d.evaluation_interval),
                    athena_query: text(&d.athena_query),
                }),
            }
        }
        categories
    }
}

impl WizardForm for ReleaseMonitoringForm {
    type Document = ReleaseMonitoringDocument;

    const DOCUMENT_TYPE: DocumentType = DocumentType::ReleaseMonitoring;

    fn build(&self) -> ReleaseMonitoringDocument {
        ReleaseMonitoringDocument {
            file_type: Self::DOCUMENT_TYPE,
            release_version: text(&self.release_version),
            release_date: normalize_release_date(&self.release_date),
            environment: text(&self.environment),
            monitored_by: text(&self.monitored_by),
            monitoring_summary: text(&self.monitoring_summary),
            monitoring_categories: self.build_categories(),
            validation_summary: self.validation.build(),
        }
    }

    fn validate_step(&self, step: usize, _rules: &StepRules) -> Vec<FieldError> {
        match step {
            1 => steps::release_info(self),
            2 => steps::category_entries(self),
            3 => steps::validation_summary(self),
            _ => Vec::new(),
        }
    }
}
