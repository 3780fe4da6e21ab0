//! # storefront
//!
//! Leptos + WASM frontend for a Keycloak-secured ecommerce storefront.
//! Customers browse products, comment on them, fill a cart and check out;
//! admins manage the catalog. All persistence and authorization live behind
//! a remote REST API; this crate is the browser client only.
//!
//! This crate contains pages, components, application state, network types,
//! and the OIDC session adapter. Browser-only behavior (localStorage, HTTP,
//! redirects, timers) is gated behind the `hydrate` feature so the state and
//! protocol logic stays natively testable.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point. Wires up panic reporting and console logging, then
/// hydrates the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
