//! Application configuration management.

use serde::Deserialize;

use crate::token::IntegrityPolicy;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Attachment token configuration.
    pub token: TokenConfig,
}

/// Attachment token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Secret key for authenticating tokens.
    pub secret: String,
    /// Policy for tokens that fail verification.
    #[serde(default)]
    pub integrity_policy: IntegrityPolicy,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            integrity_policy: IntegrityPolicy::Ignore,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ATTACHE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
