//! Export configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::adapters::storage::DEFAULT_MAX_FILE_SIZE_BYTES;

use super::error::ConfigValidationError;

/// Where and how exported documents are written
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving `<file_type>.json` files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Largest document the storage adapter accepts
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingRequired("export.output_dir"));
        }
        if self.max_file_size_bytes == 0 {
            return Err(ConfigValidationError::InvalidMaxFileSize);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_file_size_bytes: default_max_file_size(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE_BYTES
}
