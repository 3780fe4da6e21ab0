//! Shopping cart state: ordered line items, a reducer action enum, and
//! localStorage persistence.
//!
//! DESIGN
//! ======
//! Every cart change flows through [`CartState::apply`], so one exhaustive
//! match is the single place cart semantics live. [`dispatch`] wraps the
//! reducer for UI code and mirrors the resulting item list to localStorage
//! before returning, which keeps the snapshot in lockstep with memory.
//! [`restore`] rebuilds the cart at startup and silently falls back to an
//! empty cart when the snapshot is missing or unparseable.

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use leptos::prelude::*;
use rust_decimal::Decimal;

use crate::util::storage;

/// localStorage key holding the serialized cart snapshot.
pub const STORAGE_KEY: &str = "shoppingCart";

/// One product line in the cart.
///
/// Serializes to the snapshot shape `{id, name, price, quantity, image?}`;
/// `image` is omitted entirely when no thumbnail was available at add time.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CartItem {
    /// Catalog id of the product.
    pub id: i64,
    /// Display name captured when the product was added.
    pub name: String,
    /// Unit price captured when the product was added.
    pub price: Decimal,
    /// Unit count. Always at least 1; reaching zero removes the line.
    pub quantity: i64,
    /// Thumbnail URL for the cart drawer, when one was available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A cart mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a product, merging into an existing line by id.
    Add {
        id: i64,
        name: String,
        price: Decimal,
        image: Option<String>,
    },
    /// Drop a line entirely. No-op when the id is not in the cart.
    Remove(i64),
    /// Overwrite a line's quantity. Zero or negative removes the line.
    SetQuantity(i64, i64),
    /// Empty the cart.
    Clear,
}

/// Ordered cart lines, unique by product id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl CartState {
    /// Apply a mutation. Line order is insertion order; `Add` merges into an
    /// existing line rather than appending a duplicate row.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add {
                id,
                name,
                price,
                image,
            } => {
                if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
                    item.quantity += 1;
                } else {
                    self.items.push(CartItem {
                        id,
                        name,
                        price,
                        quantity: 1,
                        image,
                    });
                }
            }
            CartAction::Remove(id) => {
                self.items.retain(|i| i.id != id);
            }
            CartAction::SetQuantity(id, quantity) => {
                if quantity <= 0 {
                    self.items.retain(|i| i.id != id);
                } else if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
                    item.quantity = quantity;
                }
            }
            CartAction::Clear => self.items.clear(),
        }
    }

    /// Sum of unit price times quantity across all lines. Zero when empty.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum()
    }

    /// Total unit count across all lines (the cart badge number).
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Apply `action` to the shared cart signal and synchronously mirror the new
/// item list to localStorage.
pub fn dispatch(cart: RwSignal<CartState>, action: CartAction) {
    cart.update(|c| c.apply(action));
    cart.with_untracked(|c| storage::save_json(STORAGE_KEY, &c.items));
}

/// Rebuild the cart from the persisted snapshot.
#[must_use]
pub fn restore() -> CartState {
    CartState {
        items: storage::load_json(STORAGE_KEY).unwrap_or_default(),
    }
}
