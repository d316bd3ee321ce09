//! Step-guard configuration

use serde::Deserialize;

use crate::domain::foundation::MIN_WORD_COUNT;
use crate::domain::wizard::StepRules;

use super::error::ConfigValidationError;

/// Tunables for the wizards' step guards
///
/// Only interactive sessions run step guards. The CLI commands validate
/// whole documents and never consult this section; embedders pass
/// `step_rules()` to `WizardSession::with_rules`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Minimum words for the summary and impact details fields
    #[serde(default = "default_min_word_count")]
    pub min_word_count: usize,
}

impl ValidationConfig {
    pub fn step_rules(&self) -> StepRules {
        StepRules {
            min_word_count: self.min_word_count,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.min_word_count == 0 {
            return Err(ConfigValidationError::InvalidWordCount);
        }
        Ok(())
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_word_count: default_min_word_count(),
        }
    }
}

fn default_min_word_count() -> usize {
    MIN_WORD_COUNT
}
