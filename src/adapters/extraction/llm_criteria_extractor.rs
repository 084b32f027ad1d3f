//! LlmCriteriaExtractor - Model-backed intake classification

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::intake::prompt::{render_transcript, SYSTEM_PROMPT};
use crate::domain::intake::response::parse_model_reply;
use crate::domain::intake::{ExtractionResult, Transcript};
use crate::ports::{
    AIProvider, CompletionRequest, CriteriaExtractor, ExtractionError, MessageRole,
    RequestMetadata,
};

/// Token ceiling for the classification reply; the JSON object is small.
pub const EXTRACTION_MAX_TOKENS: u32 = 256;

const PURPOSE: &str = "criteria_extraction";

/// Asks a language model to classify the transcript against the intake
/// criteria and parses its JSON reply.
pub struct LlmCriteriaExtractor {
    provider: Arc<dyn AIProvider>,
}

impl LlmCriteriaExtractor {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    fn build_request(rendered: String) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(PURPOSE))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, rendered)
            .with_max_tokens(EXTRACTION_MAX_TOKENS)
            .with_temperature(0.0)
    }
}

#[async_trait]
impl CriteriaExtractor for LlmCriteriaExtractor {
    async fn extract(&self, transcript: &Transcript) -> Result<ExtractionResult, ExtractionError> {
        let rendered = render_transcript(transcript);
        let estimated_tokens = self.provider.estimate_tokens(SYSTEM_PROMPT)
            + self.provider.estimate_tokens(&rendered);
        let request = Self::build_request(rendered);
        let request_id = request.metadata.request_id;

        // Sizes only; transcript content stays out of the logs
        tracing::debug!(
            %request_id,
            provider = %self.name(),
            messages = transcript.len(),
            input_chars = request.input_len(),
            estimated_tokens,
            "requesting criteria extraction"
        );

        let response = self.provider.complete(request).await?;

        tracing::debug!(
            %request_id,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "criteria extraction reply received"
        );

        Ok(parse_model_reply(&response.content)?)
    }

    fn name(&self) -> String {
        self.provider.provider_info().name
    }
}
