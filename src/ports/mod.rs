//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `BillingApi` - Crosspay tenant endpoints (products, entitlements, customers)

mod billing_api;

pub use billing_api::{BillingApi, BillingApiError};
