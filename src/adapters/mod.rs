//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Language model providers (OpenAI, Anthropic, mock)
//! - `extraction` - Model-backed criteria extraction

pub mod ai;
pub mod extraction;

pub use ai::{provider_from_config, MockAIProvider};
pub use extraction::LlmCriteriaExtractor;
