//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CROSSPAY_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use crosspay_server::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Talking to {}", config.client.api_base_url());
//! ```

mod client;
mod error;
mod webhook;

pub use client::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ConfigError, ValidationError};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Outbound API client configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Webhook verification configuration
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CROSSPAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CROSSPAY__CLIENT__API_KEY=...` -> `client.api_key = ...`
    /// - `CROSSPAY__WEBHOOK__MAX_CLOCK_SKEW_SECS=120` -> `webhook.max_clock_skew_secs = 120`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or cannot be
    /// parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CROSSPAY")
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
        self.client.validate()?;
        self.webhook.validate()?;
        Ok(())
    }

    /// Validate only what webhook verification needs.
    ///
    /// The API client settings are not checked.
    pub fn validate_webhook(&self) -> Result<(), ValidationError> {
        self.webhook.validate()
    }
}

fn default_log_level() -> String {
    "info,crosspay_server=debug".to_string()
}
