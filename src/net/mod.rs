//! Networking modules for REST and identity-provider traffic.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls against the catalog/payments backend, `oidc`
//! manages the Keycloak login lifecycle, and `types` defines the shared
//! wire schema for both.

pub mod api;
pub mod oidc;
pub mod types;
