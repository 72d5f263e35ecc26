//! Webhook domain module.
//!
//! Authenticates Crosspay webhook deliveries: freshness, signed-message
//! reconstruction, public-key signature verification, then decoding.
//!
//! # Module Structure
//!
//! - `envelope` - Received delivery and verification context
//! - `timestamp` - RFC 3339 parsing and skew-window check
//! - `canonical` - Signed message reconstruction
//! - `public_key` - PEM/SPKI key loading and algorithm dispatch
//! - `signature` - Signature decoding and verification schemes
//! - `payload` - Post-verification decoding into `VerifiedEvent`
//! - `verifier` - Orchestrating facade
//! - `errors` - `WebhookError`

mod canonical;
mod envelope;
mod errors;
mod payload;
mod public_key;
mod signature;
mod timestamp;
mod verifier;

pub use canonical::{CanonicalMessage, SEPARATOR};
pub use envelope::{VerificationContext, WebhookEnvelope, DEFAULT_MAX_CLOCK_SKEW_SECS};
pub use errors::WebhookError;
pub use payload::VerifiedEvent;
pub use public_key::{KeyAlgorithm, VerifyingKey};
pub use signature::{decode_signature, RsaPkcs1v15Sha256, SignatureScheme};
pub use timestamp::validate_timestamp;
pub use verifier::{construct_webhook_event, WebhookVerifier};
