//! Shared wire-protocol DTOs for the REST and identity-provider boundaries.
//!
//! DESIGN
//! ======
//! These types mirror the backend's JSON shapes exactly (camelCase keys,
//! float prices, two legacy Spanish field names) so serde stays the only
//! translation layer. Response types tolerate extra server fields; request
//! types serialize only what the endpoints read.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::state::cart::CartItem;

/// A catalog product as returned by `GET /api/products`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Unit price. The wire carries a JSON number.
    pub price: Decimal,
    /// Comments newest-first, embedded in the product payload.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// ISO-8601 creation timestamp, when the server includes it.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A product comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    /// Display name the server derived from the author's token.
    pub author: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for `POST /api/products` (admin only).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// Body for `POST /api/products/{id}/comments`.
///
/// The server takes the author from the bearer token, so content is the
/// only field it reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub content: String,
}

/// Per-user storefront profile from `GET /api/client-data/{uid}`.
///
/// The server creates the row on first fetch. Two fields keep their legacy
/// Spanish wire names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ClientProfile {
    /// Database row id, used as the payment's client reference.
    #[serde(default)]
    pub id: Option<i64>,
    pub uid: String,
    /// Email on file (wire name `correo`).
    #[serde(default, rename = "correo")]
    pub email: Option<String>,
    /// Whether the one-time checkout coupon is still available to this
    /// user (wire name `usoCodigoDescuento`).
    #[serde(default, rename = "usoCodigoDescuento")]
    pub coupon_available: bool,
}

/// Body for `POST /api/payments/save`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub card_number: String,
    pub cardholder_name: String,
    pub expiry_month: String,
    pub expiry_year: String,
    /// Amount actually charged, after any coupon discount.
    pub amount: Decimal,
    /// Always `"COP"` for this storefront.
    pub currency: String,
    /// The purchased lines as a JSON string, the shape the server stores.
    pub items: String,
    /// Shipping address (legacy wire name kept as-is).
    pub direccion: String,
    /// Row id of the buyer's [`ClientProfile`], when one was fetched.
    pub client_data_id: Option<i64>,
    pub used_coupon: bool,
}

/// The persisted payment echoed back by `POST /api/payments/save`.
///
/// Only the transaction id is load-bearing for the UI; everything else is
/// optional because deployed server versions disagree on the field set.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub transaction_id: String,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub fecha_pago: Option<String>,
    #[serde(default)]
    pub card_number_last4: Option<String>,
}

/// Body for `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful response from the Keycloak token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: i64,
    pub refresh_token: String,
}

/// One checkout line inside the payment `items` JSON string.
#[derive(Serialize)]
struct PaymentItem<'a> {
    id: i64,
    name: &'a str,
    quantity: i64,
    price: Decimal,
}

/// Serialize cart lines into the `items` string the payment endpoint stores.
#[must_use]
pub fn items_payload(items: &[CartItem]) -> String {
    let lines: Vec<PaymentItem<'_>> = items
        .iter()
        .map(|i| PaymentItem {
            id: i.id,
            name: &i.name,
            quantity: i.quantity,
            price: i.price,
        })
        .collect();
    serde_json::to_string(&lines).unwrap_or_else(|_| "[]".to_owned())
}
