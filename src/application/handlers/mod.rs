//! Application handlers.
//!
//! Command handlers that run document checks and headless imports.

mod import_tags;
mod validate_file;

pub use import_tags::{ImportTagsCommand, ImportTagsError, ImportTagsHandler, ImportTagsResult};
pub use validate_file::{
    ValidateFileCommand, ValidateFileError, ValidateFileHandler, ValidateFileResult,
};
