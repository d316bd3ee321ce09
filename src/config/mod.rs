//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RELEASE_WIZARD` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use release_wizard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Exporting to {}", config.export.output_dir.display());
//! ```

mod error;
mod export;
mod logging;
mod validation;

pub use error::{ConfigError, ConfigValidationError};
pub use export::ExportConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use validation::ValidationConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads successfully.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Log level and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Export directory and size limit
    #[serde(default)]
    pub export: ExportConfig,

    /// Step-guard tunables
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RELEASE_WIZARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RELEASE_WIZARD__LOGGING__FORMAT=json` -> `logging.format = json`
    /// - `RELEASE_WIZARD__EXPORT__OUTPUT_DIR=./out` -> `export.output_dir = ./out`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RELEASE_WIZARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for an empty log level, an empty
    /// output directory, a zero size limit or a zero word count.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.logging.validate()?;
        self.export.validate()?;
        self.validation.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("RELEASE_WIZARD__LOGGING__LEVEL");
        env::remove_var("RELEASE_WIZARD__LOGGING__FORMAT");
        env::remove_var("RELEASE_WIZARD__EXPORT__OUTPUT_DIR");
        env::remove_var("RELEASE_WIZARD__VALIDATION__MIN_WORD_COUNT");
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.validation.min_word_count, 50);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RELEASE_WIZARD__LOGGING__FORMAT", "json");
        env::set_var("RELEASE_WIZARD__EXPORT__OUTPUT_DIR", "/tmp/release-exports");
        env::set_var("RELEASE_WIZARD__VALIDATION__MIN_WORD_COUNT", "10");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.logging.is_json());
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/release-exports"));
        assert_eq!(config.validation.step_rules().min_word_count, 10);
    }

    #[test]
    fn test_invalid_word_count_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RELEASE_WIZARD__VALIDATION__MIN_WORD_COUNT", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidWordCount));
    }
}
