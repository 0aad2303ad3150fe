//! AI Provider Port - Interface for LLM provider integrations.
//!
//! Everything the wizard asks of an LLM goes through this port, so the
//! suggestion flows never couple to a specific vendor API. Gemini is
//! the shipped implementation; tests script the port directly.
//!
//! # Design
//!
//! - Single-shot prompt-in, text-out generation; no streaming
//! - Optional structured output (ask the provider for JSON)
//! - Error types for common failure modes (rate limits, auth, timeouts)
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct MockProvider;
//!
//! #[async_trait]
//! impl AiProvider for MockProvider {
//!     async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AiError> {
//!         Ok(GenerationResponse {
//!             text: "Hello!".to_string(),
//!             model: "mock".to_string(),
//!         })
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("mock", "mock-1")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for AI/LLM provider interactions.
///
/// Implementations connect to external AI services and translate between
/// the provider-specific API and these provider-agnostic types.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generate a single completion for the request's prompt.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AiError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for AI generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The full prompt text.
    pub prompt: String,
    /// Expected shape of the response.
    pub format: ResponseFormat,
    /// Temperature for response randomness (0.0 = deterministic, 1.0+ = creative).
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_output_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Creates a new plain-text generation request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            format: ResponseFormat::Text,
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Sets the expected response format.
    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

/// Expected shape of the provider's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free-form prose.
    Text,
    /// The provider should emit a JSON document.
    Json,
}

/// Response from AI generation.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Generated text.
    pub text: String,
    /// Model that generated the response.
    pub model: String,
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini").
    pub name: String,
    /// Model identifier (e.g., "gemini-2.5-flash").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No API key configured.
    #[error("missing credentials: no API key configured")]
    MissingCredentials,

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl AiError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AiError::RateLimited { .. }
                | AiError::Unavailable { .. }
                | AiError::Network(_)
                | AiError::Timeout { .. }
        )
    }
}
