//! Release notes wizard - summary, impact, modules and QA.
//!
//! Six steps: release info, impact, modules, quality assurance, testing
//! and review.

mod document;
mod form;
mod steps;

pub use document::{
    CustomerNotification, ImpactInfo, ImpactLevel, Module, QualityAssurance,
    ReleaseNotesDocument, TestAutomation,
};
pub use form::{CoverageRow, ModuleForm, QaForm, ReleaseInfo, ReleaseNotesForm};
