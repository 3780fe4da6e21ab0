//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain so components depend on small focused models:
//! `cart` owns the shopping cart and its persistence, `session` owns the
//! authentication state machine fed by the OIDC adapter, and `catalog`
//! holds the product list as the dashboard renders it.

pub mod cart;
pub mod catalog;
pub mod session;
