//! Reusable UI components shared across pages.

pub mod cart_drawer;
pub mod header;
pub mod product_card;
pub mod product_modal;
pub mod quantity_selector;
