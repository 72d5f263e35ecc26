//! Webhook verification error types.
//!
//! Every failure the verification pipeline can produce, with HTTP status code
//! mapping for endpoints that answer the platform's delivery attempt.

use http::StatusCode;
use thiserror::Error;

/// Errors that occur while authenticating a Crosspay webhook delivery.
///
/// All variants are terminal for a single verification call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Timestamp header is not a valid RFC 3339 date-time.
    #[error("Invalid timestamp header: {0}")]
    TimestampParse(String),

    /// Timestamp is further from the current time than the allowed skew.
    #[error("Timestamp is outside the {window_secs}-second window (skew {skew_secs}s)")]
    TimestampExpired { skew_secs: i64, window_secs: i64 },

    /// Signature header is not valid standard base64.
    #[error("Failed to decode signature: {0}")]
    SignatureDecode(String),

    /// PEM armor or SubjectPublicKeyInfo structure could not be decoded.
    #[error("Failed to parse public key: {0}")]
    PublicKeyParse(String),

    /// Key decoded fine but uses an algorithm without a verification scheme.
    #[error("Unsupported public key type: {0}")]
    UnsupportedKeyType(String),

    /// Cryptographic check failed. Deliberately carries no cause.
    #[error("Signature verification failed")]
    SignatureVerification,

    /// Verified payload is not a well-formed event.
    #[error("Failed to parse webhook payload: {0}")]
    PayloadDecode(String),
}

impl WebhookError {
    /// Stable machine-readable name for logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookError::TimestampParse(_) => "timestamp_parse",
            WebhookError::TimestampExpired { .. } => "timestamp_expired",
            WebhookError::SignatureDecode(_) => "signature_decode",
            WebhookError::PublicKeyParse(_) => "public_key_parse",
            WebhookError::UnsupportedKeyType(_) => "unsupported_key_type",
            WebhookError::SignatureVerification => "signature_verification",
            WebhookError::PayloadDecode(_) => "payload_decode",
        }
    }

    /// Returns true if the same delivery could succeed when verified again.
    ///
    /// Verification is a pure function of its inputs, so nothing is.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Maps the error to the status code a webhook endpoint should return.
    ///
    /// - 401: the delivery could not be authenticated
    /// - 400: the delivery or local key material is malformed
    /// - 500: the configured key cannot be used at all
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Authenticity failures
            WebhookError::TimestampExpired { .. } | WebhookError::SignatureVerification => {
                StatusCode::UNAUTHORIZED
            }

            // Malformed delivery
            WebhookError::TimestampParse(_)
            | WebhookError::SignatureDecode(_)
            | WebhookError::PayloadDecode(_) => StatusCode::BAD_REQUEST,

            // Operator misconfiguration
            WebhookError::PublicKeyParse(_) | WebhookError::UnsupportedKeyType(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
