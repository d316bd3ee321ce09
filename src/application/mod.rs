//! Application layer - Wizard sessions, commands and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
pub mod wizard_session;

pub use handlers::{
    ImportTagsCommand, ImportTagsError, ImportTagsHandler, ImportTagsResult, ValidateFileCommand,
    ValidateFileError, ValidateFileHandler, ValidateFileResult,
};
pub use wizard_session::{ExportedDocument, SessionError, WizardSession};
