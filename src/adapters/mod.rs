//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `crosspay` - Crosspay tenant API over HTTP

pub mod crosspay;

pub use crosspay::{CrosspayHttpClient, MockBillingApi};
