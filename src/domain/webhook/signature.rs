//! Signature decoding and verification schemes.
//!
//! Verification is modelled as a strategy selected by the key's algorithm,
//! so a new signature algorithm is a new [`SignatureScheme`] implementation
//! rather than a change to the orchestrating verifier.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256};

use super::canonical::CanonicalMessage;
use super::errors::WebhookError;
use super::public_key::VerifyingKey;

/// Decodes the signature header (standard alphabet, padded).
///
/// # Errors
///
/// Returns `WebhookError::SignatureDecode` if the header is not valid base64.
pub fn decode_signature(signature_header: &str) -> Result<Vec<u8>, WebhookError> {
    BASE64
        .decode(signature_header)
        .map_err(|e| WebhookError::SignatureDecode(e.to_string()))
}

/// A signature algorithm able to check a canonical message against a key.
pub trait SignatureScheme: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    /// Checks `signature` over `message` with `key`.
    ///
    /// Every failure, whatever its cause, must surface as
    /// `WebhookError::SignatureVerification`.
    fn verify(
        &self,
        key: &VerifyingKey,
        message: &CanonicalMessage,
        signature: &[u8],
    ) -> Result<(), WebhookError>;
}

/// RSASSA-PKCS1-v1_5 over a SHA-256 digest of the canonical message.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaPkcs1v15Sha256;

impl SignatureScheme for RsaPkcs1v15Sha256 {
    fn name(&self) -> &'static str {
        "rsa-pkcs1v15-sha256"
    }

    fn verify(
        &self,
        key: &VerifyingKey,
        message: &CanonicalMessage,
        signature: &[u8],
    ) -> Result<(), WebhookError> {
        match key {
            VerifyingKey::Rsa(public_key) => {
                let digest = Sha256::digest(message.as_bytes());
                public_key
                    .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
                    .map_err(|_| WebhookError::SignatureVerification)
            }
        }
    }
}
