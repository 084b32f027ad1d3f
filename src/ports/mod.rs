//! Ports layer - interfaces to external collaborators.
//!
//! # Module Organization
//!
//! - `ai_provider` - Text-completion services (OpenAI, Anthropic)
//! - `criteria_extractor` - Primary extraction path used by the orchestrator

mod ai_provider;
mod criteria_extractor;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use criteria_extractor::{CriteriaExtractor, ExtractionError};
