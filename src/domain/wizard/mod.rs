//! Wizard plumbing shared by the four document builders.
//!
//! - `WizardState` / `compute_visibility` - explicit step position
//! - `ExportStatus` - validated-before-export gate
//! - `WizardForm` - form state that can build a document and guard steps

mod export_status;
mod form;
mod navigation;

pub use export_status::ExportStatus;
pub use form::{non_blank, push_chip, StepRules, WizardForm};
pub use navigation::{compute_visibility, StepVisibility, WizardState};
