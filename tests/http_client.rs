//! Integration tests for the Crosspay HTTP client.
//!
//! Each test starts an in-process stub of the tenant API and points a
//! `CrosspayHttpClient` at it, checking:
//! 1. Requests carry the API key and the documented paths, bodies and queries
//! 2. The `{ data, error }` envelope maps onto results
//! 3. Transport-level failures map onto the right `BillingApiError`

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crosspay_server::adapters::crosspay::API_KEY_HEADER;
use crosspay_server::adapters::CrosspayHttpClient;
use crosspay_server::application::{GetActiveEntitlementHandler, GetActiveEntitlementQuery};
use crosspay_server::config::ClientConfig;
use crosspay_server::ports::{BillingApi, BillingApiError};

// =============================================================================
// Test Infrastructure
// =============================================================================

const API_KEY: &str = "sk_test_integration";

/// Serves `router` on an ephemeral port and returns its base URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> CrosspayHttpClient {
    CrosspayHttpClient::new(ClientConfig::new(API_KEY).with_base_url(base_url))
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == API_KEY)
        .unwrap_or(false)
}

fn ok(body: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(body))
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn list_products_sends_api_key_and_decodes_data() {
    let router = Router::new().route(
        "/tenant/products",
        get(|headers: HeaderMap| async move {
            if !authorized(&headers) {
                return (StatusCode::UNAUTHORIZED, Json(json!({})));
            }
            ok(json!({
                "data": [
                    {"product_id": "prod_basic", "name": "Basic", "entitlement_id": "ent_basic"},
                    {"product_id": "prod_pro", "entitlement_id": "ent_pro", "price_cents": 1900}
                ]
            }))
        }),
    );
    let base_url = spawn_stub(router).await;

    let products = client(&base_url).list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name.as_deref(), Some("Basic"));
    assert_eq!(products[1].entitlement_id, "ent_pro");
    assert_eq!(products[1].extra.get("price_cents"), Some(&json!(1900)));
}

#[tokio::test]
async fn envelope_error_becomes_remote_error() {
    let router = Router::new().route(
        "/tenant/products",
        get(|| async { ok(json!({"error": "tenant suspended"})) }),
    );
    let base_url = spawn_stub(router).await;

    let result = client(&base_url).list_products().await;

    assert_eq!(
        result,
        Err(BillingApiError::Remote("tenant suspended".to_string()))
    );
}

#[tokio::test]
async fn non_ok_status_is_reported_without_decoding() {
    let router = Router::new().route(
        "/tenant/products",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let base_url = spawn_stub(router).await;

    let result = client(&base_url).list_products().await;

    assert_eq!(result, Err(BillingApiError::UnexpectedStatus(503)));
    assert!(result.unwrap_err().is_retryable());
}

#[tokio::test]
async fn created_status_is_still_unexpected() {
    let router = Router::new().route(
        "/tenant/products",
        get(|| async { (StatusCode::CREATED, Json(json!({"data": []}))) }),
    );
    let base_url = spawn_stub(router).await;

    let result = client(&base_url).list_products().await;

    assert_eq!(result, Err(BillingApiError::UnexpectedStatus(201)));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let router = Router::new().route("/tenant/products", get(|| async { "<html>" }));
    let base_url = spawn_stub(router).await;

    let result = client(&base_url).list_products().await;

    assert!(matches!(result, Err(BillingApiError::Decode(_))));
}

// =============================================================================
// Entitlements
// =============================================================================

#[tokio::test]
async fn list_entitlements_uses_environment_path() {
    let router = Router::new().route(
        "/tenant/entitlements/:environment",
        get(|Path(environment): Path<String>| async move {
            ok(json!({"data": [{"id": "ent_pro", "environment": environment}]}))
        }),
    );
    let base_url = spawn_stub(router).await;

    let entitlements = client(&base_url).list_entitlements("sandbox").await.unwrap();

    assert_eq!(entitlements.len(), 1);
    assert_eq!(entitlements[0].environment.as_deref(), Some("sandbox"));
}

#[tokio::test]
async fn absent_data_is_empty_list() {
    let router = Router::new().route(
        "/tenant/entitlements/:environment",
        get(|| async { ok(json!({})) }),
    );
    let base_url = spawn_stub(router).await;

    let entitlements = client(&base_url).list_entitlements("production").await.unwrap();

    assert!(entitlements.is_empty());
}

// =============================================================================
// Customers and Subscriptions
// =============================================================================

#[tokio::test]
async fn active_subscription_posts_customer_email() {
    let received = Arc::new(Mutex::new(None));
    let captured = received.clone();
    let router = Router::new().route(
        "/tenant/subscriptions/active",
        post(move |Json(body): Json<Value>| async move {
            *captured.lock().unwrap() = Some(body);
            ok(json!({"data": {"id": "sub_1", "product_id": "prod_pro", "status": "active"}}))
        }),
    );
    let base_url = spawn_stub(router).await;

    let subscription = client(&base_url)
        .get_active_subscription("user@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(subscription.product_id, "prod_pro");
    assert_eq!(
        received.lock().unwrap().clone(),
        Some(json!({"customer_email": "user@example.com"}))
    );
}

#[tokio::test]
async fn missing_subscription_is_none() {
    let router = Router::new().route(
        "/tenant/subscriptions/active",
        post(|| async { ok(json!({"data": null})) }),
    );
    let base_url = spawn_stub(router).await;

    let subscription = client(&base_url)
        .get_active_subscription("nobody@example.com")
        .await
        .unwrap();

    assert!(subscription.is_none());
}

#[tokio::test]
async fn customer_info_keeps_unknown_fields() {
    let router = Router::new().route(
        "/tenant/server/customer",
        post(|| async {
            ok(json!({"data": {
                "id": "cus_1",
                "email": "user@example.com",
                "metadata": {"plan": "pro"}
            }}))
        }),
    );
    let base_url = spawn_stub(router).await;

    let customer = client(&base_url)
        .get_customer_info("user@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(customer.id, "cus_1");
    assert_eq!(customer.extra.get("metadata"), Some(&json!({"plan": "pro"})));
}

#[tokio::test]
async fn list_customers_forwards_pagination_query() {
    let queries: Arc<Mutex<Vec<HashMap<String, String>>>> = Arc::default();
    let captured = queries.clone();
    let router = Router::new().route(
        "/tenant/server/customers",
        get(move |Query(params): Query<HashMap<String, String>>| async move {
            captured.lock().unwrap().push(params);
            ok(json!({
                "data": [{"id": "cus_1", "email": "a@example.com"}],
                "next_cursor": "cur_2"
            }))
        }),
    );
    let base_url = spawn_stub(router).await;
    let client = client(&base_url);

    let page = client.list_customers(Some(20), Some("cur_1")).await.unwrap();
    client.list_customers(None, None).await.unwrap();

    assert_eq!(page.customers.len(), 1);
    assert_eq!(page.next_cursor.as_deref(), Some("cur_2"));
    assert!(page.has_more());

    let queries = queries.lock().unwrap();
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("20"));
    assert_eq!(queries[0].get("cursor").map(String::as_str), Some("cur_1"));
    assert!(queries[1].is_empty());
}

#[tokio::test]
async fn list_customers_envelope_error_is_remote() {
    let router = Router::new().route(
        "/tenant/server/customers",
        get(|| async { ok(json!({"error": "invalid cursor"})) }),
    );
    let base_url = spawn_stub(router).await;

    let result = client(&base_url).list_customers(None, Some("bogus")).await;

    assert_eq!(result, Err(BillingApiError::Remote("invalid cursor".to_string())));
}

#[tokio::test]
async fn list_customers_null_data_is_empty_page() {
    let router = Router::new().route(
        "/tenant/server/customers",
        get(|| async { ok(json!({"data": null})) }),
    );
    let base_url = spawn_stub(router).await;

    let page = client(&base_url).list_customers(None, None).await.unwrap();

    assert!(page.customers.is_empty());
    assert!(!page.has_more());
}

#[tokio::test]
async fn list_customers_null_data_keeps_envelope_error() {
    let router = Router::new().route(
        "/tenant/server/customers",
        get(|| async { ok(json!({"data": null, "error": "bad cursor"})) }),
    );
    let base_url = spawn_stub(router).await;

    let result = client(&base_url).list_customers(Some(10), Some("cur_x")).await;

    assert_eq!(result, Err(BillingApiError::Remote("bad cursor".to_string())));
}

// =============================================================================
// Handlers over HTTP
// =============================================================================

#[tokio::test]
async fn active_entitlement_resolves_across_three_endpoints() {
    let router = Router::new()
        .route(
            "/tenant/subscriptions/active",
            post(|| async { ok(json!({"data": {"product_id": "prod_pro"}})) }),
        )
        .route(
            "/tenant/products",
            get(|| async {
                ok(json!({"data": [
                    {"product_id": "prod_basic", "entitlement_id": "ent_basic"},
                    {"product_id": "prod_pro", "entitlement_id": "ent_pro"}
                ]}))
            }),
        )
        .route(
            "/tenant/entitlements/:environment",
            get(|| async {
                ok(json!({"data": [
                    {"id": "ent_basic", "name": "Basic"},
                    {"id": "ent_pro", "name": "Pro"}
                ]}))
            }),
        );
    let base_url = spawn_stub(router).await;
    let handler = GetActiveEntitlementHandler::new(Arc::new(client(&base_url)));

    let entitlement = handler
        .handle(GetActiveEntitlementQuery {
            customer_email: "user@example.com".to_string(),
            environment: "sandbox".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(entitlement.and_then(|e| e.name), Some("Pro".to_string()));
}
