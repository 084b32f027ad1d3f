//! Analyzer configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Analyzer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Use the model-backed extractor when credentials are present
    #[serde(default = "default_primary_enabled")]
    pub primary_enabled: bool,

    /// Upper bound on one primary extraction, in seconds
    #[serde(default = "default_primary_timeout")]
    pub primary_timeout_secs: u64,

    /// YAML file overriding the built-in vocabulary
    pub vocabulary_path: Option<PathBuf>,
}

impl AnalyzerConfig {
    /// Get primary timeout as Duration
    pub fn primary_timeout(&self) -> Duration {
        Duration::from_secs(self.primary_timeout_secs)
    }

    /// Validate analyzer configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=120).contains(&self.primary_timeout_secs) {
            return Err(ValidationError::InvalidTimeout {
                field: "analyzer.primary_timeout_secs",
                value: self.primary_timeout_secs,
            });
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            primary_enabled: default_primary_enabled(),
            primary_timeout_secs: default_primary_timeout(),
            vocabulary_path: None,
        }
    }
}

fn default_primary_enabled() -> bool {
    true
}

fn default_primary_timeout() -> u64 {
    15
}
