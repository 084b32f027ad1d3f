//! Criteria Extractor Port - Interface for the primary extraction path.
//!
//! The orchestrator calls an implementation of this port first and falls
//! back to the deterministic classifier on any error it returns.

use async_trait::async_trait;
use thiserror::Error;

use super::ai_provider::AIError;
use crate::domain::intake::{ExtractionResult, ResponseParseError, Transcript};

/// Port for extracting intake criteria from a transcript.
#[async_trait]
pub trait CriteriaExtractor: Send + Sync {
    /// Classifies a transcript.
    ///
    /// # Errors
    ///
    /// Every error is recoverable: callers substitute the fallback result.
    async fn extract(&self, transcript: &Transcript) -> Result<ExtractionResult, ExtractionError>;

    /// Short name for logs (e.g. "openai").
    fn name(&self) -> String;
}

/// Failure of the primary extraction path.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("extraction timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("provider error: {0}")]
    Provider(String),
}

impl ExtractionError {
    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::Network(_) => "network",
            ExtractionError::Timeout { .. } => "timeout",
            ExtractionError::MalformedResponse(_) => "malformed_response",
            ExtractionError::Provider(_) => "provider",
        }
    }
}

impl From<AIError> for ExtractionError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::Network(message) => ExtractionError::Network(message),
            AIError::Timeout { timeout_secs } => ExtractionError::Timeout {
                timeout_secs: u64::from(timeout_secs),
            },
            AIError::Parse(message) => ExtractionError::MalformedResponse(message),
            other => ExtractionError::Provider(other.to_string()),
        }
    }
}

impl From<ResponseParseError> for ExtractionError {
    fn from(err: ResponseParseError) -> Self {
        ExtractionError::MalformedResponse(err.to_string())
    }
}
