//! Domain layer containing the document model and wizard form state.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (document type, format guards, errors)
//! - `wizard` - Step navigation, export gate and the `WizardForm` trait
//! - `release_notes` - Summary, impact, modules and QA
//! - `release_tags` - Namespace to component tag mapping
//! - `release_instructions` - Manual-change runbook
//! - `release_monitoring` - Monitoring-alert entries by category

pub mod foundation;
pub mod release_instructions;
pub mod release_monitoring;
pub mod release_notes;
pub mod release_tags;
pub mod wizard;
