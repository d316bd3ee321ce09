//! Document Validator Port - Shared validation interface.
//!
//! This port defines the contract for validating assembled release
//! documents. Wizards depend on this trait, while adapters (like
//! SharedValidator) provide the rule engine.

use serde_json::Value;

use crate::domain::foundation::DocumentType;

/// Port for validating a parsed document against its type's rules.
///
/// # Contract
///
/// Implementations must:
/// - Return every violation in one pass (never stop at the first)
/// - Keep error order stable for the same input
/// - Never panic and never fail: an unknown type is reported as the single
///   error `"Unknown file_type: <type>"`
/// - Hold no state between calls
///
/// # Usage
///
/// ```rust,ignore
/// let validator: &dyn DocumentValidator = &SharedValidator::new();
///
/// let errors = validator.validate(&document, "release_notes");
/// if errors.is_empty() {
///     enable_export();
/// }
/// ```
pub trait DocumentValidator: Send + Sync {
    /// Validates `document` as `file_type`. An empty list means valid.
    fn validate(&self, document: &Value, file_type: &str) -> Vec<String>;

    /// Validates using the document's own `file_type` discriminator.
    fn validate_self_described(&self, document: &Value) -> Vec<String> {
        let file_type = document
            .get("file_type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        self.validate(document, file_type)
    }

    /// Validates against a known document type.
    fn validate_as(&self, document: &Value, document_type: DocumentType) -> Vec<String> {
        self.validate(document, document_type.as_str())
    }
}
