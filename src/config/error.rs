//! Configuration error types

use thiserror::Error;

/// Errors surfaced while getting the environment into a usable `AppConfig`.
///
/// Both halves of startup funnel into this one type: parsing the
/// environment and the semantic checks that follow.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration invalid: {0}")]
    Invalid(#[from] ValidationError),
}

/// Semantic checks applied after loading.
///
/// Every field has a default, so a value can only be wrong when someone
/// set it; the messages name the variable to fix.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("DECISION_MASTER__AI__TIMEOUT_SECS must be at least one second")]
    ZeroTimeout,
}
