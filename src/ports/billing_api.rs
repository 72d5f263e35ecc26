//! Billing API port for the Crosspay tenant endpoints.
//!
//! Defines the contract for reading a tenant's catalogue and customers.
//! Every endpoint is an independent request/response call; implementations
//! hold no state beyond their outbound credentials.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::billing::{
    CustomerInfo, CustomerPage, Subscription, TenantEntitlement, TenantProduct,
};

/// Port for the Crosspay tenant API.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// List all products configured for the tenant.
    async fn list_products(&self) -> Result<Vec<TenantProduct>, BillingApiError>;

    /// List the tenant's entitlements in `environment`.
    async fn list_entitlements(
        &self,
        environment: &str,
    ) -> Result<Vec<TenantEntitlement>, BillingApiError>;

    /// Get the active subscription for a customer, if any.
    async fn get_active_subscription(
        &self,
        customer_email: &str,
    ) -> Result<Option<Subscription>, BillingApiError>;

    /// List customers one page at a time.
    ///
    /// `limit` and `cursor` are omitted from the request when `None`.
    async fn list_customers(
        &self,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<CustomerPage, BillingApiError>;

    /// Get extended information for a customer, if known.
    async fn get_customer_info(
        &self,
        customer_email: &str,
    ) -> Result<Option<CustomerInfo>, BillingApiError>;
}

/// Errors from billing API operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The platform answered with a status other than 200.
    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The platform reported an error in the response envelope.
    #[error("{0}")]
    Remote(String),
}

impl BillingApiError {
    /// Check if this error is typically transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            BillingApiError::Network(_) => true,
            BillingApiError::UnexpectedStatus(status) => *status == 429 || *status >= 500,
            BillingApiError::Decode(_) | BillingApiError::Remote(_) => false,
        }
    }
}
