//! Catalog view state: fetched products joined with their resolved
//! image object URLs.
//!
//! DESIGN
//! ======
//! Product fetches and image fetches resolve at different times, so the
//! dashboard holds a list of [`CatalogEntry`] and patches it in place as
//! images, comments, and deletions arrive. The helpers here are plain
//! functions over that list; the page owns the signal.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::net::types::{Comment, Product};

/// A catalog product as the dashboard renders it.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub product: Product,
    /// Object URL minted from the image endpoint. Absent until fetched,
    /// or when the product has no stored image; the UI shows a
    /// placeholder then.
    pub image_url: Option<String>,
}

/// Wrap freshly fetched products; images resolve afterwards.
#[must_use]
pub fn from_products(products: Vec<Product>) -> Vec<CatalogEntry> {
    products
        .into_iter()
        .map(|product| CatalogEntry {
            product,
            image_url: None,
        })
        .collect()
}

/// Attach a resolved image URL. Unknown ids are ignored.
pub fn set_image(entries: &mut [CatalogEntry], product_id: i64, url: String) {
    if let Some(entry) = entries.iter_mut().find(|e| e.product.id == product_id) {
        entry.image_url = Some(url);
    }
}

/// Remove a product after a successful delete call.
pub fn remove_product(entries: &mut Vec<CatalogEntry>, product_id: i64) {
    entries.retain(|e| e.product.id != product_id);
}

/// Splice a stored comment into its product.
pub fn push_comment(entries: &mut [CatalogEntry], product_id: i64, comment: Comment) {
    if let Some(entry) = entries.iter_mut().find(|e| e.product.id == product_id) {
        entry.product.comments.push(comment);
    }
}

/// Drop a comment by id after a successful delete call.
pub fn remove_comment(entries: &mut [CatalogEntry], product_id: i64, comment_id: i64) {
    if let Some(entry) = entries.iter_mut().find(|e| e.product.id == product_id) {
        entry.product.comments.retain(|c| c.id != comment_id);
    }
}

/// Look up an entry by product id.
#[must_use]
pub fn find(entries: &[CatalogEntry], product_id: i64) -> Option<&CatalogEntry> {
    entries.iter().find(|e| e.product.id == product_id)
}
