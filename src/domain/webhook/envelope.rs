//! Inputs to webhook verification.

use chrono::Duration;

/// Default freshness window for webhook deliveries (5 minutes).
pub const DEFAULT_MAX_CLOCK_SKEW_SECS: i64 = 300;

/// A webhook delivery exactly as received.
///
/// The body and timestamp are kept as received; the signed message is
/// rebuilt from these bytes, never from a parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEnvelope {
    raw_payload: Vec<u8>,
    signature_header: String,
    timestamp_header: String,
}

impl WebhookEnvelope {
    /// Captures a delivery from its raw body and the two signing headers.
    pub fn new(
        raw_payload: impl Into<Vec<u8>>,
        signature_header: impl Into<String>,
        timestamp_header: impl Into<String>,
    ) -> Self {
        Self {
            raw_payload: raw_payload.into(),
            signature_header: signature_header.into(),
            timestamp_header: timestamp_header.into(),
        }
    }

    /// The HTTP body bytes.
    pub fn raw_payload(&self) -> &[u8] {
        &self.raw_payload
    }

    /// The base64 signature header value.
    pub fn signature_header(&self) -> &str {
        &self.signature_header
    }

    /// The RFC 3339 timestamp header value.
    pub fn timestamp_header(&self) -> &str {
        &self.timestamp_header
    }
}

/// Key material and freshness policy used to verify deliveries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationContext {
    public_key_pem: String,
    max_clock_skew: Duration,
}

impl VerificationContext {
    /// Creates a context for the given PEM public key with the default window.
    pub fn new(public_key_pem: impl Into<String>) -> Self {
        Self {
            public_key_pem: public_key_pem.into(),
            max_clock_skew: Duration::seconds(DEFAULT_MAX_CLOCK_SKEW_SECS),
        }
    }

    /// Overrides the freshness window.
    pub fn with_max_clock_skew(mut self, max_clock_skew: Duration) -> Self {
        self.max_clock_skew = max_clock_skew;
        self
    }

    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    pub fn max_clock_skew(&self) -> Duration {
        self.max_clock_skew
    }
}
