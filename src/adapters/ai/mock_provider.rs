//! Scripted AiProvider implementation for tests.
//!
//! Suggestion-flow tests queue the exact responses the flow should see
//! and assert on the prompts it sent, without touching a real API. The
//! queue is consumed front to back; once empty, a benign default text
//! is returned so unscripted calls never hang a test.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAiProvider::new()
//!     .with_json_response(json!(["A bold new option"]))
//!     .with_delay(Duration::from_millis(100));
//!
//! let response = provider.generate(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AiError, AiProvider, GenerationRequest, GenerationResponse, ProviderInfo};

/// Scriptable AI provider for tests.
///
/// Clones share the response queue and call history, so a test can hold
/// a clone as a recorder while the service under test owns the provider.
#[derive(Debug, Clone)]
pub struct MockAiProvider {
    /// Scripted responses, consumed front to back.
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    delay: Duration,
    /// Every request seen, in order.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return generated text.
    Success { text: String },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
    /// Simulate an unparseable response.
    Parse { message: String },
}

impl From<MockError> for AiError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AiError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AiError::unavailable(message),
            MockError::AuthenticationFailed => AiError::AuthenticationFailed,
            MockError::Network { message } => AiError::network(message),
            MockError::Timeout { timeout_secs } => AiError::Timeout { timeout_secs },
            MockError::Parse { message } => AiError::parse(message),
        }
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAiProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a text response to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        let mut responses = self.responses.lock().unwrap();
        responses.push_back(MockResponse::Success { text: text.into() });
        drop(responses);
        self
    }

    /// Adds a JSON document response to the queue.
    pub fn with_json_response(self, value: serde_json::Value) -> Self {
        self.with_response(value.to_string())
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        let mut responses = self.responses.lock().unwrap();
        responses.push_back(MockResponse::Error(error));
        drop(responses);
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the provider info.
    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Pops the next scripted response, or a benign default.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                text: "Mock response".to_string(),
            })
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AiError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success { text } => Ok(GenerationResponse {
                text,
                model: self.info.model.clone(),
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
