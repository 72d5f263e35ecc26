//! Webhook verification configuration

use chrono::Duration;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::webhook::{VerificationContext, DEFAULT_MAX_CLOCK_SKEW_SECS};

/// Webhook verification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// PEM public key distributed by Crosspay. Literal `\n` sequences are
    /// accepted so the key fits in a single environment variable.
    pub public_key_pem: Option<String>,

    /// Freshness window in seconds
    #[serde(default = "default_max_clock_skew_secs")]
    pub max_clock_skew_secs: i64,
}

impl WebhookConfig {
    /// Build the verification context, if a key is configured.
    pub fn verification_context(&self) -> Option<VerificationContext> {
        self.public_key_pem.as_ref().map(|pem| {
            VerificationContext::new(pem.replace("\\n", "\n"))
                .with_max_clock_skew(Duration::seconds(self.max_clock_skew_secs))
        })
    }

    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=3600).contains(&self.max_clock_skew_secs) {
            return Err(ValidationError::InvalidClockSkew);
        }
        Ok(())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            public_key_pem: None,
            max_clock_skew_secs: default_max_clock_skew_secs(),
        }
    }
}

fn default_max_clock_skew_secs() -> i64 {
    DEFAULT_MAX_CLOCK_SKEW_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_config_defaults() {
        let config = WebhookConfig::default();
        assert_eq!(config.max_clock_skew_secs, 300);
        assert!(config.verification_context().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unescapes_single_line_pem() {
        let config = WebhookConfig {
            public_key_pem: Some("-----BEGIN PUBLIC KEY-----\\nAAAA\\n-----END PUBLIC KEY-----".to_string()),
            ..Default::default()
        };

        let context = config.verification_context().unwrap();
        assert_eq!(
            context.public_key_pem(),
            "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----"
        );
        assert_eq!(context.max_clock_skew(), Duration::minutes(5));
    }

    #[test]
    fn test_validation_rejects_zero_skew() {
        let config = WebhookConfig {
            max_clock_skew_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidClockSkew));
    }

    #[test]
    fn test_validation_rejects_huge_skew() {
        let config = WebhookConfig {
            max_clock_skew_secs: 86_400,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidClockSkew));
    }
}
