//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (clock)
//! - `webhook` - Webhook authentication pipeline
//! - `billing` - Tenant API data (products, entitlements, customers)

pub mod billing;
pub mod foundation;
pub mod webhook;
