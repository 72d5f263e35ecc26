//! Crosspay webhook verification facade.
//!
//! Runs the verification stages in a fixed, fail-fast order:
//!
//! 1. Check the timestamp is within the freshness window
//! 2. Decode the base64 signature
//! 3. Load the PEM public key and resolve its signature scheme
//! 4. Rebuild the canonical message from the received bytes
//! 5. Verify the signature with the scheme
//! 6. Decode the payload into the requested event type
//!
//! No state is kept between calls; a verifier can be shared across threads.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::billing::CustomerInfo;
use crate::domain::foundation::{Clock, SystemClock};

use super::canonical::CanonicalMessage;
use super::envelope::{VerificationContext, WebhookEnvelope};
use super::errors::WebhookError;
use super::payload::{decode_payload, VerifiedEvent};
use super::public_key::{KeyAlgorithm, VerifyingKey};
use super::signature::{decode_signature, RsaPkcs1v15Sha256, SignatureScheme};
use super::timestamp::validate_timestamp;

/// Verifier for Crosspay webhook deliveries.
///
/// The signature scheme is chosen from the key's algorithm and cannot be
/// swapped by callers:
///
/// ```compile_fail
/// use std::sync::Arc;
/// use crosspay_server::domain::webhook::{
///     RsaPkcs1v15Sha256, VerificationContext, WebhookVerifier,
/// };
///
/// let _ = WebhookVerifier::new(VerificationContext::new(""))
///     .with_rsa_scheme(Arc::new(RsaPkcs1v15Sha256));
/// ```
#[derive(Clone)]
pub struct WebhookVerifier {
    context: VerificationContext,
    clock: Arc<dyn Clock>,
    rsa_scheme: Arc<dyn SignatureScheme>,
}

impl WebhookVerifier {
    /// Creates a verifier bound to `context`, using the system clock.
    pub fn new(context: VerificationContext) -> Self {
        Self {
            context,
            clock: Arc::new(SystemClock),
            rsa_scheme: Arc::new(RsaPkcs1v15Sha256),
        }
    }

    /// Replaces the time source used for the freshness check.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the scheme used for RSA keys.
    #[cfg(test)]
    fn with_rsa_scheme(mut self, scheme: Arc<dyn SignatureScheme>) -> Self {
        self.rsa_scheme = scheme;
        self
    }

    pub fn context(&self) -> &VerificationContext {
        &self.context
    }

    /// Verifies a delivery and decodes it as extended customer info.
    pub fn verify(
        &self,
        envelope: &WebhookEnvelope,
    ) -> Result<VerifiedEvent<CustomerInfo>, WebhookError> {
        self.verify_as(envelope)
    }

    /// Verifies a delivery and decodes it as `T`.
    pub fn verify_as<T: DeserializeOwned>(
        &self,
        envelope: &WebhookEnvelope,
    ) -> Result<VerifiedEvent<T>, WebhookError> {
        self.verify_with_context(envelope, &self.context)
    }

    /// Verifies a delivery against a per-call context instead of the bound one.
    ///
    /// # Errors
    ///
    /// - `TimestampParse` / `TimestampExpired` - stale or malformed timestamp
    /// - `SignatureDecode` - signature header is not base64
    /// - `PublicKeyParse` / `UnsupportedKeyType` - unusable key
    /// - `SignatureVerification` - the signature does not match
    /// - `PayloadDecode` - authenticated body is not a valid event
    pub fn verify_with_context<T: DeserializeOwned>(
        &self,
        envelope: &WebhookEnvelope,
        context: &VerificationContext,
    ) -> Result<VerifiedEvent<T>, WebhookError> {
        match self.run(envelope, context) {
            Ok(event) => {
                tracing::info!(
                    delivered_at = %event.delivered_at(),
                    payload_bytes = envelope.raw_payload().len(),
                    "Webhook signature verified"
                );
                Ok(event)
            }
            Err(err) => {
                tracing::warn!(
                    kind = err.kind(),
                    error = %err,
                    timestamp_header = envelope.timestamp_header(),
                    "Webhook verification rejected"
                );
                Err(err)
            }
        }
    }

    fn run<T: DeserializeOwned>(
        &self,
        envelope: &WebhookEnvelope,
        context: &VerificationContext,
    ) -> Result<VerifiedEvent<T>, WebhookError> {
        let delivered_at = validate_timestamp(
            envelope.timestamp_header(),
            self.clock.now(),
            context.max_clock_skew(),
        )?;

        let signature = decode_signature(envelope.signature_header())?;

        let key = VerifyingKey::from_pem(context.public_key_pem())?;
        let scheme = self.scheme_for(&key);

        let message = CanonicalMessage::build(
            envelope.timestamp_header().as_bytes(),
            envelope.raw_payload(),
        );

        tracing::debug!(scheme = scheme.name(), "Verifying webhook signature");
        scheme.verify(&key, &message, &signature)?;

        decode_payload(envelope.raw_payload(), delivered_at)
    }

    fn scheme_for(&self, key: &VerifyingKey) -> &dyn SignatureScheme {
        match key.algorithm() {
            KeyAlgorithm::Rsa => self.rsa_scheme.as_ref(),
        }
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("context", &self.context)
            .field("rsa_scheme", &self.rsa_scheme.name())
            .finish()
    }
}

/// One-shot verification with the default five-minute window.
///
/// Convenience for callers that receive the key alongside each delivery.
pub fn construct_webhook_event(
    public_key_pem: &str,
    raw_payload: &[u8],
    signature_header: &str,
    timestamp_header: &str,
) -> Result<VerifiedEvent<CustomerInfo>, WebhookError> {
    let envelope = WebhookEnvelope::new(raw_payload, signature_header, timestamp_header);
    WebhookVerifier::new(VerificationContext::new(public_key_pem)).verify(&envelope)
}
