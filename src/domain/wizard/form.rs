//! WizardForm trait - the seam between form state and document assembly.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::domain::foundation::{DocumentType, FieldError, MIN_WORD_COUNT};

/// Tunables for the step guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRules {
    /// Minimum tokens for the long free-text fields.
    pub min_word_count: usize,
}

impl Default for StepRules {
    fn default() -> Self {
        Self {
            min_word_count: MIN_WORD_COUNT,
        }
    }
}

/// Form state owned by one wizard.
///
/// `build` is a pure re-derivation: calling it twice on the same state
/// yields equal documents, and nothing is cached between calls.
pub trait WizardForm: Debug {
    /// The canonical document this form assembles.
    type Document: Serialize + DeserializeOwned + PartialEq + Debug;

    /// Discriminator written into `file_type`.
    const DOCUMENT_TYPE: DocumentType;

    /// Assembles the document from the current state.
    fn build(&self) -> Self::Document;

    /// Runs the entry guards for one step. An empty list lets the user move on.
    ///
    /// Steps outside the wizard's range have no guards.
    fn validate_step(&self, step: usize, rules: &StepRules) -> Vec<FieldError>;

    /// Number of steps; the last one is the review step.
    fn total_steps() -> usize {
        Self::DOCUMENT_TYPE.total_steps()
    }
}

/// Adds a chip (one element of a set-valued field).
///
/// The value is trimmed; blanks and exact duplicates are ignored. Returns
/// true if the chip was added.
pub fn push_chip(chips: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || chips.iter().any(|c| c == value) {
        return false;
    }
    chips.push(value.to_string());
    true
}

/// Trims every entry and drops the blank ones, keeping order.
pub fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
