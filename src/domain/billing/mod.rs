//! Billing domain module.
//!
//! Data returned by the Crosspay tenant API.
//!
//! # Module Structure
//!
//! - `envelope` - Uniform `{ data, error }` response wrapper
//! - `types` - Products, entitlements, subscriptions and customers

mod envelope;
mod types;

pub use envelope::ApiEnvelope;
pub use types::{CustomerInfo, CustomerPage, Subscription, TenantEntitlement, TenantProduct};
