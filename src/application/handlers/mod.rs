//! Application handlers.
//!
//! Query handlers that orchestrate calls across ports.

pub mod billing;

pub use billing::{
    GetActiveEntitlementHandler, GetActiveEntitlementQuery, GetActiveEntitlementResult,
    GetActiveProductHandler, GetActiveProductQuery, GetActiveProductResult,
};
