//! Unverified JWT payload decoding.
//!
//! The client only needs identity claims for display and the expiry for
//! refresh scheduling. Signature verification stays on the API server,
//! which rejects tampered tokens on every request anyway.

#[cfg(test)]
#[path = "jwt_test.rs"]
mod jwt_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Claims the storefront reads from the access token payload.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Claims {
    /// OIDC subject id.
    pub sub: String,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry, unix seconds.
    #[serde(default)]
    pub exp: i64,
    #[serde(default)]
    pub realm_access: RealmAccess,
}

/// Realm-level role container in a Keycloak token.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Decode the payload segment of `token` without verifying the signature.
///
/// Returns `None` when the payload segment is missing, is not base64url,
/// or does not parse as a claims object with a subject.
#[must_use]
pub fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
