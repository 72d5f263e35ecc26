//! Decoding of authenticated webhook bodies.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use super::errors::WebhookError;

/// A webhook event whose timestamp and signature have both been checked.
///
/// Only the verifier can construct one; holding a `VerifiedEvent` is proof
/// the body came from the platform within the freshness window.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedEvent<T> {
    event: T,
    delivered_at: DateTime<Utc>,
}

impl<T> VerifiedEvent<T> {
    /// The decoded event.
    pub fn event(&self) -> &T {
        &self.event
    }

    /// Delivery time claimed by the signed timestamp header.
    pub fn delivered_at(&self) -> DateTime<Utc> {
        self.delivered_at
    }

    pub fn into_inner(self) -> T {
        self.event
    }
}

/// Deserializes an authenticated body into `T`.
///
/// Must only be called once the signature over `raw_payload` has been
/// verified.
pub(super) fn decode_payload<T: DeserializeOwned>(
    raw_payload: &[u8],
    delivered_at: DateTime<Utc>,
) -> Result<VerifiedEvent<T>, WebhookError> {
    let event = serde_json::from_slice(raw_payload)
        .map_err(|e| WebhookError::PayloadDecode(e.to_string()))?;

    Ok(VerifiedEvent {
        event,
        delivered_at,
    })
}
