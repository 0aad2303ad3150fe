//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `StateStore` - Persisting and loading decision state payloads
//! - `AiProvider` - LLM-backed text and JSON generation

mod ai_provider;
mod state_store;

pub use ai_provider::{
    AiError, AiProvider, GenerationRequest, GenerationResponse, ProviderInfo, ResponseFormat,
};
pub use state_store::{StateStore, StateStoreError, DEFAULT_STATE_KEY};
