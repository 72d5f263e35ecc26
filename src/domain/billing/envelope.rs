//! Uniform response envelope used by every tenant endpoint.

use serde::{Deserialize, Serialize};

/// `{ data, error }` wrapper around an endpoint's payload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Splits the envelope into its payload or the remote error message.
    ///
    /// An empty `error` string is treated as no error.
    pub fn into_result(self) -> Result<Option<T>, String> {
        match self.error {
            Some(message) if !message.is_empty() => Err(message),
            _ => Ok(self.data),
        }
    }
}

impl<T> ApiEnvelope<Vec<T>> {
    /// Like [`ApiEnvelope::into_result`], but absent data is an empty list.
    pub fn into_list(self) -> Result<Vec<T>, String> {
        self.into_result().map(Option::unwrap_or_default)
    }
}
