//! Configuration error types

use thiserror::Error;

use crate::domain::intake::VocabularyError;

/// Errors that can occur while loading configuration or wiring from it
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    #[error("AI provider setup failed: {0}")]
    Provider(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must be within range, got {value}")]
    InvalidTimeout { field: &'static str, value: u64 },

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Unknown log level '{0}'")]
    InvalidLogLevel(String),
}
