//! Crosspay tenant API adapter.
//!
//! Implements the `BillingApi` port over HTTP, plus an in-memory mock.
//!
//! # Configuration
//!
//! Required environment variables:
//! - `CROSSPAY__CLIENT__API_KEY`: Server API key
//!
//! Optional:
//! - `CROSSPAY__CLIENT__BASE_URL`: API base URL (default `https://api.crosspay.dev`)

mod http_client;
mod mock_billing_api;

pub use http_client::{CrosspayHttpClient, API_KEY_HEADER};
pub use mock_billing_api::MockBillingApi;
