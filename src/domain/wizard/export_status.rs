//! ExportStatus - whether the current document may be exported.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Export gate for one wizard.
///
/// `Validated` is only reachable through a validation run with zero errors;
/// any edit of the form state drops back to `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    #[default]
    Draft,
    Validated,
}

impl ExportStatus {
    pub fn can_export(&self) -> bool {
        matches!(self, ExportStatus::Validated)
    }

    /// Status after a validation run that reported `errors`.
    pub fn after_validation(errors: &[String]) -> Self {
        if errors.is_empty() {
            ExportStatus::Validated
        } else {
            ExportStatus::Draft
        }
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportStatus::Draft => "Draft",
            ExportStatus::Validated => "Validated",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_draft() {
        assert_eq!(ExportStatus::default(), ExportStatus::Draft);
    }

    #[test]
    fn only_validated_can_export() {
        assert!(!ExportStatus::Draft.can_export());
        assert!(ExportStatus::Validated.can_export());
    }

    #[test]
    fn clean_run_validates_and_any_error_keeps_draft() {
        assert_eq!(ExportStatus::after_validation(&[]), ExportStatus::Validated);
        assert_eq!(
            ExportStatus::after_validation(&["Missing release_version".to_string()]),
            ExportStatus::Draft
        );
    }
}
