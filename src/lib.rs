//! Crosspay Server - server-side SDK for the Crosspay billing platform.
//!
//! Verifies signed webhook deliveries and reads a tenant's products,
//! entitlements, subscriptions and customers from the tenant API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
