//! Release instructions wizard - ordered manual-change runbook entries.
//!
//! Three steps: release info, manual changes and review.

mod document;
mod form;
mod steps;

pub use document::{ManualChange, ReleaseInstructionsDocument};
pub use form::{ManualChangeForm, ReleaseInstructionsForm, CUSTOM_CATEGORY};
