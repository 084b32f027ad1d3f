//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for the model-backed extraction
//! path.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - OpenAI chat completions in JSON mode
//! - `AnthropicProvider` - Anthropic messages API

mod anthropic_provider;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{
    AnthropicConfig, AnthropicProvider, DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_ANTHROPIC_MODEL,
};
pub use mock_provider::{MockAIProvider, MockError, MockResponse, DEFAULT_MOCK_RESPONSE};
pub use openai_provider::{
    OpenAIConfig, OpenAIProvider, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::config::{AiConfig, AiProvider as ProviderKind};
use crate::ports::{AIError, AIProvider};

/// Builds the provider selected in configuration.
///
/// Returns `Ok(None)` when the selected provider has no API key, which puts
/// the analyzer in fallback-only mode.
///
/// # Errors
///
/// Returns `AIError` if the HTTP client cannot be constructed.
pub fn provider_from_config(config: &AiConfig) -> Result<Option<Arc<dyn AIProvider>>, AIError> {
    if !config.is_configured() {
        return Ok(None);
    }

    let provider: Arc<dyn AIProvider> = match config.provider {
        ProviderKind::OpenAI => {
            let Some(key) = config.openai_api_key.as_ref() else {
                return Ok(None);
            };
            let mut openai = OpenAIConfig::new(key.expose_secret().clone())
                .with_timeout(config.request_timeout());
            if let Some(ref model) = config.model {
                openai = openai.with_model(model.clone());
            }
            if let Some(ref url) = config.base_url {
                openai = openai.with_base_url(url.clone());
            }
            Arc::new(OpenAIProvider::new(openai)?)
        }
        ProviderKind::Anthropic => {
            let Some(key) = config.anthropic_api_key.as_ref() else {
                return Ok(None);
            };
            let mut anthropic = AnthropicConfig::new(key.expose_secret().clone())
                .with_timeout(config.request_timeout());
            if let Some(ref model) = config.model {
                anthropic = anthropic.with_model(model.clone());
            }
            if let Some(ref url) = config.base_url {
                anthropic = anthropic.with_base_url(url.clone());
            }
            Arc::new(AnthropicProvider::new(anthropic)?)
        }
    };

    Ok(Some(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn unconfigured_provider_yields_none() {
        let provider = provider_from_config(&AiConfig::default()).unwrap();
        assert!(provider.is_none());
    }

    #[test]
    fn openai_is_built_with_model_override() {
        let config = AiConfig {
            openai_api_key: Some(Secret::new("sk-test".to_string())),
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };

        let provider = provider_from_config(&config).unwrap().unwrap();
        let info = provider.provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o");
    }

    #[test]
    fn anthropic_uses_default_model() {
        let config = AiConfig {
            provider: ProviderKind::Anthropic,
            anthropic_api_key: Some(Secret::new("sk-ant-test".to_string())),
            ..Default::default()
        };

        let provider = provider_from_config(&config).unwrap().unwrap();
        let info = provider.provider_info();
        assert_eq!(info.name, "anthropic");
        assert_eq!(info.model, DEFAULT_ANTHROPIC_MODEL);
    }
}
