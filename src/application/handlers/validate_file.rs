//! ValidateFileHandler - Command handler for checking an existing document.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::ports::DocumentValidator;

/// Command to validate JSON text produced outside the wizards.
#[derive(Debug, Clone)]
pub struct ValidateFileCommand {
    /// Raw file contents.
    pub contents: String,
    /// Type to validate as; defaults to the document's own `file_type`.
    pub file_type: Option<String>,
}

/// Outcome of a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateFileResult {
    pub file_type: String,
    pub errors: Vec<String>,
}

impl ValidateFileResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateFileError {
    #[error("Invalid JSON format")]
    InvalidJson,
}

/// Handler for validating document files.
pub struct ValidateFileHandler {
    validator: Arc<dyn DocumentValidator>,
}

impl ValidateFileHandler {
    pub fn new(validator: Arc<dyn DocumentValidator>) -> Self {
        Self { validator }
    }

    pub fn handle(&self, cmd: ValidateFileCommand) -> Result<ValidateFileResult, ValidateFileError> {
        let document: Value =
            serde_json::from_str(&cmd.contents).map_err(|_| ValidateFileError::InvalidJson)?;

        let file_type = match cmd.file_type {
            Some(file_type) => file_type,
            None => document
                .get("file_type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        };

        let errors = self.validator.validate(&document, &file_type);
        tracing::debug!(file_type = %file_type, errors = errors.len(), "file validated");

        Ok(ValidateFileResult { file_type, errors })
    }
}
