//! Release monitoring wizard - category-keyed monitoring-alert entries.
//!
//! Four steps: release info, category entries, validation summary and
//! review.

mod category;
mod document;
mod form;
mod steps;

pub use category::MonitoringCategory;
pub use document::{
    AlbEntry, AlertFields, ApiHealthEntry, AwsServicesEntry, ExceptionEntry,
    InfrastructureEntry, LogEntry, MonitoringCategories, QueueEntry, ReleaseMonitoringDocument,
    ValidationSummary,
};
pub use form::{
    parse_number, AlbForm, AlertForm, ApiHealthForm, AwsServicesForm, EntryDetail,
    ExceptionForm, InfrastructureForm, LogForm, MonitoringEntryForm, QueueForm,
    ReleaseMonitoringForm, ValidationSummaryForm,
};
