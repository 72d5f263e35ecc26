//! Tenant API data types.
//!
//! Only the fields this crate reasons about are typed; everything else the
//! platform sends is kept in `extra` so nothing is lost on a round trip.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A product configured for the tenant.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TenantProduct {
    /// Platform product identifier.
    pub product_id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Entitlement granted by this product.
    pub entitlement_id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entitlement (feature grant) in one environment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TenantEntitlement {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Environment the entitlement belongs to (e.g. "production", "sandbox").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A customer's subscription as stored by the platform.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Subscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Product the subscription is for.
    pub product_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Extended customer information.
///
/// This is also the body of a Crosspay webhook delivery.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CustomerInfo {
    pub id: String,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of the customer listing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CustomerPage {
    #[serde(rename = "data", default, deserialize_with = "null_as_empty")]
    pub customers: Vec<CustomerInfo>,

    /// Cursor for the following page; `None` on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl CustomerPage {
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Reads an explicit `null` list as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
