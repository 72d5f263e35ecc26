//! Billing handlers.
//!
//! ## Queries
//! - Resolve the product behind a customer's active subscription
//! - Resolve the entitlement granted by that product in an environment

mod get_active_entitlement;
mod get_active_product;

pub use get_active_entitlement::{
    GetActiveEntitlementHandler, GetActiveEntitlementQuery, GetActiveEntitlementResult,
};
pub use get_active_product::{
    GetActiveProductHandler, GetActiveProductQuery, GetActiveProductResult,
};
