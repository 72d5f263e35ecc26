//! GetActiveEntitlementHandler - Query handler resolving a customer's entitlement.

use std::sync::Arc;

use crate::domain::billing::TenantEntitlement;
use crate::ports::{BillingApi, BillingApiError};

use super::get_active_product::{GetActiveProductHandler, GetActiveProductQuery};

/// Query for the entitlement a customer currently holds in an environment.
#[derive(Debug, Clone)]
pub struct GetActiveEntitlementQuery {
    pub customer_email: String,
    pub environment: String,
}

/// Result of the entitlement lookup.
pub type GetActiveEntitlementResult = Option<TenantEntitlement>;

/// Handler for the subscription → product → entitlement join.
///
/// Each step is a linear scan over small lists; the first match wins.
pub struct GetActiveEntitlementHandler {
    api: Arc<dyn BillingApi>,
    products: GetActiveProductHandler,
}

impl GetActiveEntitlementHandler {
    pub fn new(api: Arc<dyn BillingApi>) -> Self {
        Self {
            products: GetActiveProductHandler::new(api.clone()),
            api,
        }
    }

    pub async fn handle(
        &self,
        query: GetActiveEntitlementQuery,
    ) -> Result<GetActiveEntitlementResult, BillingApiError> {
        let product_query = GetActiveProductQuery {
            customer_email: query.customer_email,
        };
        let Some(product) = self.products.handle(product_query).await? else {
            return Ok(None);
        };

        let entitlements = self.api.list_entitlements(&query.environment).await?;

        Ok(entitlements
            .into_iter()
            .find(|e| e.id == product.entitlement_id))
    }
}
