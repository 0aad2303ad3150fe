//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - State store implementations (file-based, in-memory)
//! - `ai` - AI provider implementations (Gemini, mock)
//! - `document` - Markdown record rendering

pub mod ai;
pub mod document;
pub mod storage;
