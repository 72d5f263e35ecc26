//! GetActiveProductHandler - Query handler resolving a customer's product.

use std::sync::Arc;

use crate::domain::billing::TenantProduct;
use crate::ports::{BillingApi, BillingApiError};

/// Query for the product behind a customer's active subscription.
#[derive(Debug, Clone)]
pub struct GetActiveProductQuery {
    pub customer_email: String,
}

/// Result of the product lookup.
pub type GetActiveProductResult = Option<TenantProduct>;

/// Handler joining the active subscription to the tenant's products.
///
/// Returns `None` when the customer has no active subscription or the
/// subscription references a product the tenant no longer lists.
pub struct GetActiveProductHandler {
    api: Arc<dyn BillingApi>,
}

impl GetActiveProductHandler {
    pub fn new(api: Arc<dyn BillingApi>) -> Self {
        Self { api }
    }

    pub async fn handle(
        &self,
        query: GetActiveProductQuery,
    ) -> Result<GetActiveProductResult, BillingApiError> {
        let Some(subscription) = self
            .api
            .get_active_subscription(&query.customer_email)
            .await?
        else {
            return Ok(None);
        };

        let products = self.api.list_products().await?;
        let product = products
            .into_iter()
            .find(|p| p.product_id == subscription.product_id);

        if product.is_none() {
            tracing::debug!(
                product_id = %subscription.product_id,
                "Active subscription references an unlisted product"
            );
        }

        Ok(product)
    }
}
