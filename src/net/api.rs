//! REST API helpers for the catalog, client-data, and payments backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, with the bearer
//! token attached per call. Server-side (SSR): stubs returning `None`/error
//! since these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! List and image fetches degrade to `None` so the UI falls back to empty
//! states and placeholders. Mutating calls return [`ApiError`] because
//! pages branch on 401/403/404 to pick their messages.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{
    ClientProfile, Comment, NewComment, NewProduct, PaymentReceipt, PaymentRequest, Product,
    RegisterRequest,
};

/// Failure classification for mutating calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// 401: the token was missing, invalid, or expired.
    Unauthorized,
    /// 403: the server rejected the caller's role.
    Forbidden,
    /// 404: the resource no longer exists.
    NotFound,
    /// Any other non-2xx status.
    Status(u16),
    /// The request never completed.
    Network(String),
}

impl ApiError {
    #[cfg(any(test, feature = "hydrate"))]
    fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            other => Self::Status(other),
        }
    }
}

/// Failure modes of [`register_user`] the signup page tells apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterError {
    /// The server answered non-2xx; holds the response body text.
    Rejected(String),
    /// The request never completed.
    Network(String),
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn product_endpoint(product_id: i64) -> String {
    format!("/api/products/{product_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn product_image_endpoint(product_id: i64) -> String {
    format!("/api/products/{product_id}/image")
}

#[cfg(any(test, feature = "hydrate"))]
fn product_comments_endpoint(product_id: i64) -> String {
    format!("/api/products/{product_id}/comments")
}

#[cfg(any(test, feature = "hydrate"))]
fn comment_endpoint(comment_id: i64) -> String {
    format!("/api/products/comments/{comment_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn client_profile_endpoint(uid: &str) -> String {
    format!("/api/client-data/{uid}")
}

#[cfg(any(test, feature = "hydrate"))]
fn toggle_coupon_endpoint(uid: &str, use_coupon: bool) -> String {
    format!("/api/client-data/{uid}/toggle-coupon?useCoupon={use_coupon}")
}

/// Fetch the full catalog from `GET /api/products`.
/// Returns `None` on any failure so the page can show its error state.
pub async fn fetch_products(token: &str) -> Option<Vec<Product>> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/products")
            .header("Authorization", &bearer(token))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Vec<Product>>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        None
    }
}

/// Fetch a product image and mint a local object URL for it.
///
/// Any failure (no image stored, non-2xx, empty body) returns `None`; the
/// UI renders the placeholder instead.
pub async fn fetch_product_image(product_id: i64, token: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let url = product_image_endpoint(product_id);
        let resp = gloo_net::http::Request::get(&url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        let content_type = resp.headers().get("Content-Type");
        let bytes = resp.binary().await.ok()?;
        if bytes.is_empty() {
            return None;
        }
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes.as_slice()));
        let blob = match content_type {
            Some(mime) => {
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&mime);
                web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?
            }
            None => web_sys::Blob::new_with_u8_array_sequence(&parts).ok()?,
        };
        web_sys::Url::create_object_url_with_blob(&blob).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (product_id, token);
        None
    }
}

/// Create a catalog product via `POST /api/products` (admin only).
///
/// # Errors
///
/// Returns [`ApiError::Forbidden`] when the caller lacks the admin role,
/// [`ApiError::Unauthorized`] on an expired token, and the other variants
/// for remaining failures.
pub async fn create_product(product: &NewProduct, token: &str) -> Result<Product, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/products")
            .header("Authorization", &bearer(token))
            .json(product)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        resp.json::<Product>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (product, token);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Delete a catalog product via `DELETE /api/products/{id}` (admin only).
///
/// # Errors
///
/// Returns an [`ApiError`] classified from the response status.
pub async fn delete_product(product_id: i64, token: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = product_endpoint(product_id);
        let resp = gloo_net::http::Request::delete(&url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (product_id, token);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Add a comment to a product via `POST /api/products/{id}/comments`.
///
/// The server derives the author from the bearer token and answers with
/// the stored comment, which callers splice into their local product list.
///
/// # Errors
///
/// Returns an [`ApiError`] classified from the response status.
pub async fn add_comment(
    product_id: i64,
    comment: &NewComment,
    token: &str,
) -> Result<Comment, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = product_comments_endpoint(product_id);
        let resp = gloo_net::http::Request::post(&url)
            .header("Authorization", &bearer(token))
            .json(comment)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        resp.json::<Comment>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (product_id, comment, token);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Remove a comment via `DELETE /api/products/comments/{id}` (admin only).
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when the comment is already gone, which
/// the modal reports with its own message.
pub async fn delete_comment(comment_id: i64, token: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = comment_endpoint(comment_id);
        let resp = gloo_net::http::Request::delete(&url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (comment_id, token);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Fetch (or lazily create) the caller's storefront profile from
/// `GET /api/client-data/{uid}`. Returns `None` on any failure; checkout
/// then simply offers no coupon.
pub async fn fetch_client_profile(uid: &str, token: &str) -> Option<ClientProfile> {
    #[cfg(feature = "hydrate")]
    {
        let url = client_profile_endpoint(uid);
        let resp = gloo_net::http::Request::get(&url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<ClientProfile>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (uid, token);
        None
    }
}

/// Set the coupon flag via `PUT /api/client-data/{uid}/toggle-coupon`.
/// Checkout calls this with `false` after a couponed payment succeeds.
///
/// # Errors
///
/// Returns an [`ApiError`] classified from the response status.
pub async fn toggle_coupon(uid: &str, use_coupon: bool, token: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = toggle_coupon_endpoint(uid, use_coupon);
        let resp = gloo_net::http::Request::put(&url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (uid, use_coupon, token);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Persist a payment via `POST /api/payments/save`.
///
/// # Errors
///
/// Returns an [`ApiError`] when the request fails or the response lacks a
/// parseable receipt.
pub async fn save_payment(
    request: &PaymentRequest,
    token: &str,
) -> Result<PaymentReceipt, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/payments/save")
            .header("Authorization", &bearer(token))
            .json(request)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::from_status(resp.status()));
        }
        resp.json::<PaymentReceipt>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (request, token);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Register a new store account via `POST /auth/register` (no token).
///
/// `Ok` carries the server's success text.
///
/// # Errors
///
/// [`RegisterError::Rejected`] holds the server's error body so the signup
/// page can echo it; [`RegisterError::Network`] covers transport failures.
pub async fn register_user(request: &RegisterRequest) -> Result<String, RegisterError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/auth/register")
            .json(request)
            .map_err(|e| RegisterError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| RegisterError::Network(e.to_string()))?;
        let body = resp.text().await.unwrap_or_default();
        if !resp.ok() {
            return Err(RegisterError::Rejected(body));
        }
        Ok(body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(RegisterError::Network("not available on server".to_owned()))
    }
}
