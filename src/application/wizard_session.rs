//! WizardSession - one wizard's form, step position and export gate.
//!
//! Flow: edit form → step guards on `next` → review pane JSON →
//! `validate` through the shared rule engine → `export` / `save`.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::{FieldError, ValidationError};
use crate::domain::wizard::{ExportStatus, StepRules, StepVisibility, WizardForm, WizardState};
use crate::ports::{DocumentStorage, DocumentValidator, FileMetadata, StorageError};

/// Errors raised by the review and export actions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Invalid JSON format")]
    InvalidJson,

    #[error("Please validate the JSON before downloading.")]
    NotValidated,

    #[error("Could not serialize document: {0}")]
    Serialization(String),

    #[error(transparent)]
    InvalidTransition(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A document ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    /// `<file_type>.json`
    pub file_name: String,
    /// Pretty-printed JSON, two-space indent.
    pub contents: String,
}

/// Drives one wizard from first step to export.
pub struct WizardSession<F: WizardForm> {
    form: F,
    state: WizardState,
    status: ExportStatus,
    rules: StepRules,
    validator: Arc<dyn DocumentValidator>,
    step_errors: Vec<FieldError>,
    document_errors: Vec<String>,
    /// Review pane text; `None` until the review step is reached or after an edit.
    json_text: Option<String>,
}

impl<F: WizardForm> WizardSession<F> {
    pub fn new(form: F, validator: Arc<dyn DocumentValidator>) -> Self {
        Self {
            form,
            state: WizardState::new(F::total_steps()),
            status: ExportStatus::Draft,
            rules: StepRules::default(),
            validator,
            step_errors: Vec::new(),
            document_errors: Vec::new(),
            json_text: None,
        }
    }

    pub fn with_rules(mut self, rules: StepRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn visibility(&self) -> StepVisibility {
        self.state.visibility()
    }

    pub fn status(&self) -> ExportStatus {
        self.status
    }

    /// Guard errors from the last `next` attempt.
    pub fn step_errors(&self) -> &[FieldError] {
        &self.step_errors
    }

    /// Rule-engine errors from the last `validate`.
    pub fn document_errors(&self) -> &[String] {
        &self.document_errors
    }

    /// Edits the form. Any edit invalidates a previous validation.
    pub fn update<R>(&mut self, edit: impl FnOnce(&mut F) -> R) -> R {
        let result = edit(&mut self.form);
        self.mark_draft();
        self.json_text = None;
        result
    }

    /// Runs the current step's guards and advances when they pass.
    pub fn next(&mut self) -> bool {
        let step = self.state.current_step();
        self.step_errors = self.form.validate_step(step, &self.rules);
        let moved = self.state.advance(self.step_errors.is_empty());
        tracing::debug!(
            document_type = F::DOCUMENT_TYPE.as_str(),
            step,
            errors = self.step_errors.len(),
            moved,
            "step guard evaluated"
        );
        if moved {
            self.enter_step();
        }
        moved
    }

    pub fn back(&mut self) -> bool {
        self.step_errors.clear();
        let moved = self.state.back();
        if moved {
            self.enter_step();
        }
        moved
    }

    /// Sidebar navigation; guards are not run.
    pub fn jump_to(&mut self, step: usize) -> Result<(), SessionError> {
        self.state.jump_to(step)?;
        self.step_errors.clear();
        self.enter_step();
        Ok(())
    }

    /// The document as the form currently describes it.
    pub fn document(&self) -> F::Document {
        self.form.build()
    }

    /// Review pane text, rebuilt from the form when not edited.
    pub fn json_text(&mut self) -> Result<&str, SessionError> {
        if self.json_text.is_none() {
            self.json_text = Some(self.render()?);
        }
        Ok(self.json_text.as_deref().unwrap_or_default())
    }

    /// Replaces the review pane text with a hand edit.
    pub fn set_json_text(&mut self, text: impl Into<String>) {
        self.json_text = Some(text.into());
        self.mark_draft();
    }

    /// Validates the review pane text with the shared rule engine.
    ///
    /// Malformed JSON is the only `Err`; rule violations come back as the
    /// `Ok` list and leave the session in `Draft`.
    pub fn validate(&mut self) -> Result<Vec<String>, SessionError> {
        let text = self.json_text()?.to_string();
        let document: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "review pane is not valid JSON");
                self.document_errors.clear();
                self.mark_draft();
                return Err(SessionError::InvalidJson);
            }
        };

        self.document_errors = self.validator.validate_as(&document, F::DOCUMENT_TYPE);
        self.status = ExportStatus::after_validation(&self.document_errors);

        tracing::debug!(
            document_type = F::DOCUMENT_TYPE.as_str(),
            errors = self.document_errors.len(),
            status = %self.status,
            "document validated"
        );
        Ok(self.document_errors.clone())
    }

    /// The validated document, ready to download.
    pub fn export(&self) -> Result<ExportedDocument, SessionError> {
        if !self.status.can_export() {
            tracing::warn!(
                document_type = F::DOCUMENT_TYPE.as_str(),
                "export refused before validation"
            );
            return Err(SessionError::NotValidated);
        }
        let contents = match &self.json_text {
            Some(text) => text.clone(),
            None => self.render()?,
        };
        Ok(ExportedDocument {
            file_name: F::DOCUMENT_TYPE.file_name(),
            contents,
        })
    }

    /// Exports and writes the document through the storage port.
    pub fn save(&self, storage: &dyn DocumentStorage) -> Result<FileMetadata, SessionError> {
        let exported = self.export()?;
        Ok(storage.write(F::DOCUMENT_TYPE, &exported.contents)?)
    }

    fn render(&self) -> Result<String, SessionError> {
        serde_json::to_string_pretty(&self.form.build())
            .map_err(|e| SessionError::Serialization(e.to_string()))
    }

    fn enter_step(&mut self) {
        // The review step always shows a fresh derivation.
        if self.state.is_review() {
            self.json_text = None;
            self.mark_draft();
        }
    }

    fn mark_draft(&mut self) {
        self.status = ExportStatus::Draft;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::validation::SharedValidator;
    use crate::domain::release_tags::{EntryMode, ReleaseTagsForm, TagRow};
    use std::path::PathBuf;
    use std::sync::Mutex;

    fn session() -> WizardSession<ReleaseTagsForm> {
        WizardSession::new(ReleaseTagsForm::new(), Arc::new(SharedValidator::new()))
    }

    fn fill(form: &mut ReleaseTagsForm) {
        form.release_version = "R6.12.0".into();
        form.release_date = "2024-05-01".into();
        form.release_type = "Minor".into();
        form.release_manager = "rm@cisco.com".into();
        form.set_entry_mode(Some(EntryMode::Manual));
        form.rows[0] = TagRow::new("commonapps", "WXCNCT-1", "api", "v1", "");
    }

    struct RecordingStorage {
        writes: Mutex<Vec<String>>,
    }

    impl DocumentStorage for RecordingStorage {
        fn write(
            &self,
            document_type: crate::domain::foundation::DocumentType,
            content: &str,
        ) -> Result<FileMetadata, StorageError> {
            self.writes.lock().unwrap().push(content.to_string());
            Ok(FileMetadata::new(
                document_type.file_name(),
                content.len() as u64,
                chrono::Utc::now(),
                "checksum",
            ))
        }

        fn read(
            &self,
            document_type: crate::domain::foundation::DocumentType,
        ) -> Result<String, StorageError> {
            Err(StorageError::not_found(document_type.file_name()))
        }

        fn exists(&self, _document_type: crate::domain::foundation::DocumentType) -> bool {
            false
        }

        fn checksum(
            &self,
            document_type: crate::domain::foundation::DocumentType,
        ) -> Result<String, StorageError> {
            Err(StorageError::not_found(document_type.file_name()))
        }

        fn file_path(&self, document_type: crate::domain::foundation::DocumentType) -> PathBuf {
            PathBuf::from(document_type.file_name())
        }
    }

    // ════════════════════════════════════════════════════════════════
    // Navigation
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn next_is_blocked_by_step_guards() {
        let mut session = session();
        assert!(!session.next());
        assert_eq!(session.state().current_step(), 1);
        assert!(!session.step_errors().is_empty());
    }

    #[test]
    fn next_moves_when_guards_pass() {
        let mut session = session();
        session.update(fill);
        assert!(session.next());
        assert!(session.next());
        assert!(session.state().is_review());
        assert!(!session.visibility().next_visible);
    }

    #[test]
    fn jump_skips_guards_but_checks_range() {
        let mut session = session();
        assert!(session.jump_to(3).is_ok());
        assert_eq!(session.state().current_step(), 3);
        assert!(matches!(
            session.jump_to(9),
            Err(SessionError::InvalidTransition(_))
        ));
    }

    #[test]
    fn back_clears_step_errors() {
        let mut session = session();
        session.jump_to(2).unwrap();
        assert!(!session.next());
        assert!(session.back());
        assert!(session.step_errors().is_empty());
    }

    // ════════════════════════════════════════════════════════════════
    // Export gate
    // ════════════════════════════════════════════════════════════════

    #[test]
    fn export_requires_validation() {
        let mut session = session();
        session.update(fill);
        assert_eq!(session.export(), Err(SessionError::NotValidated));
        assert_eq!(
            SessionError::NotValidated.to_string(),
            "Please validate the JSON before downloading."
        );
    }

    #[test]
    fn successful_validation_enables_export() {
        let mut session = session();
        session.update(fill);
        assert_eq!(session.validate().unwrap(), Vec::<String>::new());
        assert_eq!(session.status(), ExportStatus::Validated);

        let exported = session.export().unwrap();
        assert_eq!(exported.file_name, "release_tags.json");
        assert!(exported.contents.contains("\n  \"file_type\": \"release_tags\""));
    }

    #[test]
    fn any_edit_returns_to_draft() {
        let mut session = session();
        session.update(fill);
        session.validate().unwrap();
        session.update(|f| f.release_type = "Major".into());
        assert_eq!(session.status(), ExportStatus::Draft);
        assert_eq!(session.export(), Err(SessionError::NotValidated));
    }

    #[test]
    fn failing_validation_keeps_draft_and_reports_errors() {
        let mut session = session();
        let errors = session.validate().unwrap();
        assert!(errors.contains(&"Missing release_version".to_string()));
        assert_eq!(session.status(), ExportStatus::Draft);
        assert_eq!(session.document_errors(), errors.as_slice());
    }

    #[test]
    fn malformed_review_text_is_invalid_json() {
        let mut session = session();
        session.update(fill);
        session.set_json_text("{ not json");
        assert_eq!(session.validate(), Err(SessionError::InvalidJson));
        assert_eq!(SessionError::InvalidJson.to_string(), "Invalid JSON format");
    }

    #[test]
    fn hand_edited_text_is_what_gets_exported() {
        let mut session = session();
        session.update(fill);
        let mut value: Value = serde_json::from_str(session.json_text().unwrap()).unwrap();
        value["release_type"] = Value::String("Hotfix".into());
        let edited = serde_json::to_string_pretty(&value).unwrap();
        session.set_json_text(edited.clone());

        assert!(session.validate().unwrap().is_empty());
        assert_eq!(session.export().unwrap().contents, edited);
    }

    #[test]
    fn entering_review_discards_stale_validation() {
        let mut session = session();
        session.update(fill);
        session.validate().unwrap();
        session.jump_to(3).unwrap();
        assert_eq!(session.status(), ExportStatus::Draft);
    }

    #[test]
    fn save_writes_exported_contents() {
        let storage = RecordingStorage {
            writes: Mutex::new(Vec::new()),
        };
        let mut session = session();
        session.update(fill);
        assert!(matches!(
            session.save(&storage),
            Err(SessionError::NotValidated)
        ));

        session.validate().unwrap();
        let meta = session.save(&storage).unwrap();
        assert_eq!(meta.path(), PathBuf::from("release_tags.json"));
        assert_eq!(storage.writes.lock().unwrap().len(), 1);
    }
}
