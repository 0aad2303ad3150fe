//! Application configuration module
//!
//! Typed configuration read from the environment via the `config` and
//! `dotenvy` crates. Variables carry the `DECISION_MASTER` prefix with
//! `__` separating nested sections, and every value has a default so
//! the wizard runs out of the box.
//!
//! # Example
//!
//! ```no_run
//! use decision_master::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("State files live in {}", config.storage.data_dir);
//! ```

mod ai;
mod error;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Decision Master wizard.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storage configuration (data directory, slot name)
    #[serde(default)]
    pub storage: StorageConfig,

    /// AI provider configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first when one
    /// exists, then prefixed variables override it:
    ///
    /// - `DECISION_MASTER__STORAGE__DATA_DIR=./data` -> `storage.data_dir = ./data`
    /// - `DECISION_MASTER__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    ///
    /// An empty environment loads fine; every value has a default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // .env is a development convenience, ignored when absent
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DECISION_MASTER")
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
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}
