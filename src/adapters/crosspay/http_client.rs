//! Crosspay tenant API adapter.
//!
//! Implements the `BillingApi` trait over HTTP with `reqwest`. Every request
//! carries the server API key in the `api-key` header; responses use the
//! `{ data, error }` envelope.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ClientConfig::new(api_key).with_base_url("http://localhost:8080");
//! let client = CrosspayHttpClient::new(config);
//! ```

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::domain::billing::{
    ApiEnvelope, CustomerInfo, CustomerPage, Subscription, TenantEntitlement, TenantProduct,
};
use crate::ports::{BillingApi, BillingApiError};

/// Header carrying the server API key.
pub const API_KEY_HEADER: &str = "api-key";

/// Request body for the customer lookup endpoints.
#[derive(Serialize)]
struct CustomerEmailBody<'a> {
    customer_email: &'a str,
}

/// Response body of the customer listing; pagination sits beside `data`.
#[derive(Deserialize)]
struct ListCustomersBody {
    #[serde(flatten)]
    page: CustomerPage,

    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the Crosspay tenant API.
pub struct CrosspayHttpClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl CrosspayHttpClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    pub fn with_http_client(config: ClientConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url(), path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .get(self.url(path))
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .post(self.url(path))
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
    }

    /// Sends the request and decodes a 200 response body as `T`.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BillingApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Crosspay request failed");
            BillingApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!(operation, status = status.as_u16(), "Crosspay returned unexpected status");
            return Err(BillingApiError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.json::<T>().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Failed to parse Crosspay response");
            BillingApiError::Decode(e.to_string())
        })?;

        tracing::debug!(operation, "Crosspay request succeeded");
        Ok(body)
    }
}

#[async_trait]
impl BillingApi for CrosspayHttpClient {
    async fn list_products(&self) -> Result<Vec<TenantProduct>, BillingApiError> {
        let envelope: ApiEnvelope<Vec<TenantProduct>> = self
            .send("list_products", self.get("/tenant/products"))
            .await?;

        envelope.into_list().map_err(BillingApiError::Remote)
    }

    async fn list_entitlements(
        &self,
        environment: &str,
    ) -> Result<Vec<TenantEntitlement>, BillingApiError> {
        let path = format!("/tenant/entitlements/{}", environment);
        let envelope: ApiEnvelope<Vec<TenantEntitlement>> =
            self.send("list_entitlements", self.get(&path)).await?;

        envelope.into_list().map_err(BillingApiError::Remote)
    }

    async fn get_active_subscription(
        &self,
        customer_email: &str,
    ) -> Result<Option<Subscription>, BillingApiError> {
        let request = self
            .post("/tenant/subscriptions/active")
            .json(&CustomerEmailBody { customer_email });
        let envelope: ApiEnvelope<Subscription> =
            self.send("get_active_subscription", request).await?;

        envelope.into_result().map_err(BillingApiError::Remote)
    }

    async fn list_customers(
        &self,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<CustomerPage, BillingApiError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor.to_string()));
        }

        let request = self.get("/tenant/server/customers").query(&params);
        let body: ListCustomersBody = self.send("list_customers", request).await?;

        match body.error {
            Some(message) if !message.is_empty() => Err(BillingApiError::Remote(message)),
            _ => Ok(body.page),
        }
    }

    async fn get_customer_info(
        &self,
        customer_email: &str,
    ) -> Result<Option<CustomerInfo>, BillingApiError> {
        let request = self
            .post("/tenant/server/customer")
            .json(&CustomerEmailBody { customer_email });
        let envelope: ApiEnvelope<CustomerInfo> = self.send("get_customer_info", request).await?;

        envelope.into_result().map_err(BillingApiError::Remote)
    }
}
