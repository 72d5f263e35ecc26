//! Mock billing API for testing.
//!
//! Provides a configurable in-memory implementation of `BillingApi` for unit
//! and integration tests. Supports:
//! - Pre-configured catalogue and customers
//! - Error injection per method
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::billing::{
    CustomerInfo, CustomerPage, Subscription, TenantEntitlement, TenantProduct,
};
use crate::ports::{BillingApi, BillingApiError};

/// Mock billing API for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockBillingApi::new();
/// mock.add_product(product);
/// mock.fail_method("list_products", BillingApiError::UnexpectedStatus(500));
/// ```
#[derive(Default, Clone)]
pub struct MockBillingApi {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    products: Vec<TenantProduct>,
    entitlements: HashMap<String, Vec<TenantEntitlement>>,
    subscriptions: HashMap<String, Subscription>,
    customers: Vec<CustomerInfo>,
    method_errors: HashMap<&'static str, BillingApiError>,
    call_log: Vec<&'static str>,
}

impl MockBillingApi {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    pub fn add_product(&self, product: TenantProduct) {
        self.state().products.push(product);
    }

    pub fn add_entitlement(&self, environment: &str, entitlement: TenantEntitlement) {
        self.state()
            .entitlements
            .entry(environment.to_string())
            .or_default()
            .push(entitlement);
    }

    pub fn set_active_subscription(&self, customer_email: &str, subscription: Subscription) {
        self.state()
            .subscriptions
            .insert(customer_email.to_string(), subscription);
    }

    pub fn add_customer(&self, customer: CustomerInfo) {
        self.state().customers.push(customer);
    }

    /// Make every call to `method` fail with `error`.
    pub fn fail_method(&self, method: &'static str, error: BillingApiError) {
        self.state().method_errors.insert(method, error);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertion Helpers
    // ════════════════════════════════════════════════════════════════════════════

    /// Names of the methods called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state().call_log.clone()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, method: &'static str) -> Result<(), BillingApiError> {
        let mut state = self.state();
        state.call_log.push(method);
        match state.method_errors.get(method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BillingApi for MockBillingApi {
    async fn list_products(&self) -> Result<Vec<TenantProduct>, BillingApiError> {
        self.record("list_products")?;
        Ok(self.state().products.clone())
    }

    async fn list_entitlements(
        &self,
        environment: &str,
    ) -> Result<Vec<TenantEntitlement>, BillingApiError> {
        self.record("list_entitlements")?;
        Ok(self
            .state()
            .entitlements
            .get(environment)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_active_subscription(
        &self,
        customer_email: &str,
    ) -> Result<Option<Subscription>, BillingApiError> {
        self.record("get_active_subscription")?;
        Ok(self.state().subscriptions.get(customer_email).cloned())
    }

    async fn list_customers(
        &self,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<CustomerPage, BillingApiError> {
        self.record("list_customers")?;
        let state = self.state();

        let start = match cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| BillingApiError::Remote(format!("invalid cursor: {}", cursor)))?,
            None => 0,
        };
        let limit = limit.map(|l| l as usize).unwrap_or(state.customers.len());
        let end = (start + limit).min(state.customers.len());
        let start = start.min(end);

        Ok(CustomerPage {
            customers: state.customers[start..end].to_vec(),
            next_cursor: (end < state.customers.len()).then(|| end.to_string()),
        })
    }

    async fn get_customer_info(
        &self,
        customer_email: &str,
    ) -> Result<Option<CustomerInfo>, BillingApiError> {
        self.record("get_customer_info")?;
        Ok(self
            .state()
            .customers
            .iter()
            .find(|c| c.email == customer_email)
            .cloned())
    }
}
