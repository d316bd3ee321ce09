//! ImportTagsHandler - Command handler for building release tags from CSV.
//!
//! Runs the tags wizard headless: CSV rows in, validated
//! `release_tags.json` out.

use std::sync::Arc;

use thiserror::Error;

use crate::application::wizard_session::{SessionError, WizardSession};
use crate::domain::release_tags::{CsvImportError, EntryMode, ReleaseTagsForm};
use crate::ports::{DocumentStorage, DocumentValidator, FileMetadata};

/// Command to import a tags CSV with its release metadata.
#[derive(Debug, Clone)]
pub struct ImportTagsCommand {
    pub csv: String,
    pub release_version: String,
    pub release_date: String,
    pub release_type: String,
    pub release_manager: String,
}

/// Result of an import. `metadata` is set only when the file was written.
#[derive(Debug, Clone)]
pub struct ImportTagsResult {
    pub rows_imported: usize,
    pub errors: Vec<String>,
    pub metadata: Option<FileMetadata>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportTagsError {
    #[error(transparent)]
    Csv(#[from] CsvImportError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Handler for CSV tag imports.
pub struct ImportTagsHandler {
    validator: Arc<dyn DocumentValidator>,
    storage: Arc<dyn DocumentStorage>,
}

impl ImportTagsHandler {
    pub fn new(validator: Arc<dyn DocumentValidator>, storage: Arc<dyn DocumentStorage>) -> Self {
        Self { validator, storage }
    }

    pub fn handle(&self, cmd: ImportTagsCommand) -> Result<ImportTagsResult, ImportTagsError> {
        // 1. Fill the form the way the upload flow does
        let mut form = ReleaseTagsForm::new();
        form.release_version = cmd.release_version;
        form.release_date = cmd.release_date;
        form.release_type = cmd.release_type;
        form.release_manager = cmd.release_manager;
        form.set_entry_mode(Some(EntryMode::File));
        let rows_imported = form.load_csv(&cmd.csv)?;

        // 2. Validate the assembled document
        let mut session = WizardSession::new(form, Arc::clone(&self.validator));
        let errors = session.validate()?;
        if !errors.is_empty() {
            tracing::warn!(errors = errors.len(), "imported tags failed validation");
            return Ok(ImportTagsResult {
                rows_imported,
                errors,
                metadata: None,
            });
        }

        // 3. Write release_tags.json
        let metadata = session.save(self.storage.as_ref())?;

        Ok(ImportTagsResult {
            rows_imported,
            errors,
            metadata: Some(metadata),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalDocumentStorage;
    use crate::adapters::validation::SharedValidator;
    use crate::domain::foundation::DocumentType;
    use crate::domain::release_tags::SAMPLE_CSV;
    use tempfile::TempDir;

    fn handler(dir: &TempDir) -> (ImportTagsHandler, Arc<LocalDocumentStorage>) {
        let storage = Arc::new(LocalDocumentStorage::new(dir.path()));
        let handler = ImportTagsHandler::new(Arc::new(SharedValidator::new()), storage.clone());
        (handler, storage)
    }

    fn command(csv: &str, manager: &str) -> ImportTagsCommand {
        ImportTagsCommand {
            csv: csv.to_string(),
            release_version: "R6.12.0".to_string(),
            release_date: "2024-5-1".to_string(),
            release_type: "Minor".to_string(),
            release_manager: manager.to_string(),
        }
    }

    #[test]
    fn sample_csv_is_imported_and_written() {
        let dir = TempDir::new().unwrap();
        let (handler, storage) = handler(&dir);

        let result = handler.handle(command(SAMPLE_CSV, "rm@cisco.com")).unwrap();

        assert_eq!(result.rows_imported, 2);
        assert!(result.errors.is_empty());
        assert!(result.metadata.is_some());

        let written: serde_json::Value =
            serde_json::from_str(&storage.read(DocumentType::ReleaseTags).unwrap()).unwrap();
        assert_eq!(written["release_date"], "2024-05-01");
        assert_eq!(
            written["namespaces"]["commonapps"]["components"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn invalid_metadata_reports_errors_without_writing() {
        let dir = TempDir::new().unwrap();
        let (handler, storage) = handler(&dir);

        let result = handler.handle(command(SAMPLE_CSV, "rm@example.com")).unwrap();

        assert_eq!(
            result.errors,
            vec!["release_manager must be a valid @cisco.com email"]
        );
        assert!(result.metadata.is_none());
        assert!(!storage.exists(DocumentType::ReleaseTags));
    }

    #[test]
    fn missing_columns_fail_the_import() {
        let dir = TempDir::new().unwrap();
        let (handler, _storage) = handler(&dir);

        let result = handler.handle(command("namespace,jira_ref\nns,J-1", "rm@cisco.com"));

        assert!(matches!(
            result,
            Err(ImportTagsError::Csv(CsvImportError::MissingColumns(_)))
        ));
    }
}
