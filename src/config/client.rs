//! Crosspay API client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Default Crosspay API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.crosspay.dev";

/// Outbound client configuration.
///
/// Passed to each client at construction, so independently configured
/// clients can coexist in one process.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Server API key, sent as the `api-key` header
    pub api_key: SecretString,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl ClientConfig {
    /// Create a configuration for the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: default_base_url(),
        }
    }

    /// Set a custom API base URL. An empty URL keeps the current one.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.base_url = url;
        }
        self
    }

    /// Base URL without a trailing slash.
    pub fn api_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validate client configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("CLIENT__API_KEY"));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    /// No API key; only usable for commands that never call the API.
    fn default() -> Self {
        Self::new("")
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
