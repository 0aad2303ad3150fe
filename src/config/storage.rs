//! Storage configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::ports::DEFAULT_STATE_KEY;

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory the state files live in
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Slot name the wizard persists under
    #[serde(default = "default_key")]
    pub key: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.trim().is_empty() {
            return Err(ValidationError::Blank("DECISION_MASTER__STORAGE__DATA_DIR"));
        }
        if self.key.trim().is_empty() {
            return Err(ValidationError::Blank("DECISION_MASTER__STORAGE__KEY"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key: default_key(),
        }
    }
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_key() -> String {
    DEFAULT_STATE_KEY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, "./data");
        assert_eq!(config.key, "decision_master_data");
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_blank_data_dir() {
        let config = StorageConfig {
            data_dir: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_key() {
        let config = StorageConfig {
            key: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
