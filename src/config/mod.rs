//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `PET_INTAKE` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use pet_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod analyzer;
mod error;
mod logging;

pub use ai::{AiConfig, AiProvider};
pub use analyzer::AnalyzerConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// fallback-only analyzer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI provider configuration (OpenAI/Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Analyzer behavior (timeouts, vocabulary override)
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PET_INTAKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PET_INTAKE__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key`
    /// - `PET_INTAKE__ANALYZER__PRIMARY_TIMEOUT_SECS=10` -> `analyzer.primary_timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PET_INTAKE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.analyzer.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// True when the primary path should be wired
    pub fn primary_path_available(&self) -> bool {
        self.analyzer.primary_enabled && self.ai.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize tests that touch them
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "PET_INTAKE__AI__PROVIDER",
        "PET_INTAKE__AI__ANTHROPIC_API_KEY",
        "PET_INTAKE__ANALYZER__PRIMARY_TIMEOUT_SECS",
        "PET_INTAKE__ANALYZER__PRIMARY_ENABLED",
        "PET_INTAKE__LOGGING__LEVEL",
        "PET_INTAKE__LOGGING__JSON",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.analyzer.primary_timeout_secs, 15);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PET_INTAKE__AI__PROVIDER", "anthropic");
        env::set_var("PET_INTAKE__AI__ANTHROPIC_API_KEY", "sk-ant-xxx");
        env::set_var("PET_INTAKE__ANALYZER__PRIMARY_TIMEOUT_SECS", "10");
        env::set_var("PET_INTAKE__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Anthropic);
        assert!(config.ai.is_configured());
        assert_eq!(config.analyzer.primary_timeout_secs, 10);
        assert!(config.logging.json);
        assert!(config.primary_path_available());
    }

    #[test]
    fn test_primary_disabled_by_flag() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PET_INTAKE__AI__PROVIDER", "anthropic");
        env::set_var("PET_INTAKE__AI__ANTHROPIC_API_KEY", "sk-ant-xxx");
        env::set_var("PET_INTAKE__ANALYZER__PRIMARY_ENABLED", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.is_configured());
        assert!(!config.primary_path_available());
    }

    #[test]
    fn test_validate_reports_bad_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PET_INTAKE__LOGGING__LEVEL", "loud");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_default_config_is_fallback_only() {
        let config = AppConfig::default();
        assert!(!config.primary_path_available());
        assert!(config.validate().is_ok());
    }
}
