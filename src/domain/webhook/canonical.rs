//! Reconstruction of the byte sequence the platform signed.

/// Separator between the timestamp and the body in the signed message.
pub const SEPARATOR: u8 = b'.';

/// The exact bytes covered by a webhook signature:
/// `timestamp ++ "." ++ payload`, both taken verbatim from the delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMessage(Vec<u8>);

impl CanonicalMessage {
    /// Builds the signed message from the received header and body bytes.
    pub fn build(timestamp_header: &[u8], raw_payload: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(timestamp_header.len() + 1 + raw_payload.len());
        bytes.extend_from_slice(timestamp_header);
        bytes.push(SEPARATOR);
        bytes.extend_from_slice(raw_payload);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
