use super::*;

use rust_decimal::Decimal;

fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        name: name.to_owned(),
        description: format!("{name} description"),
        price: Decimal::new(1000, 2),
        comments: Vec::new(),
        created_at: None,
    }
}

fn comment(id: i64, content: &str) -> Comment {
    Comment {
        id,
        content: content.to_owned(),
        author: "maria".to_owned(),
        created_at: Some("2025-05-01T10:00:00".to_owned()),
    }
}

fn entries() -> Vec<CatalogEntry> {
    from_products(vec![product(1, "Arepa"), product(2, "Empanada")])
}

#[test]
fn fresh_entries_keep_order_and_start_without_images() {
    let entries = entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].product.name, "Arepa");
    assert_eq!(entries[1].product.name, "Empanada");
    assert!(entries.iter().all(|e| e.image_url.is_none()));
}

#[test]
fn set_image_attaches_to_the_matching_product() {
    let mut entries = entries();
    set_image(&mut entries, 2, "blob:abc".to_owned());
    assert_eq!(entries[0].image_url, None);
    assert_eq!(entries[1].image_url.as_deref(), Some("blob:abc"));
}

#[test]
fn set_image_ignores_unknown_ids() {
    let mut entries = entries();
    set_image(&mut entries, 99, "blob:abc".to_owned());
    assert!(entries.iter().all(|e| e.image_url.is_none()));
}

#[test]
fn remove_product_keeps_the_rest() {
    let mut entries = entries();
    remove_product(&mut entries, 1);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].product.id, 2);
}

#[test]
fn push_comment_appends_to_the_matching_product() {
    let mut entries = entries();
    push_comment(&mut entries, 1, comment(10, "Muy buena"));
    push_comment(&mut entries, 1, comment(11, "Repetiría"));
    assert_eq!(entries[0].product.comments.len(), 2);
    assert_eq!(entries[0].product.comments[1].content, "Repetiría");
    assert!(entries[1].product.comments.is_empty());
}

#[test]
fn remove_comment_drops_only_the_matching_id() {
    let mut entries = entries();
    push_comment(&mut entries, 1, comment(10, "Muy buena"));
    push_comment(&mut entries, 1, comment(11, "Repetiría"));
    remove_comment(&mut entries, 1, 10);
    assert_eq!(entries[0].product.comments.len(), 1);
    assert_eq!(entries[0].product.comments[0].id, 11);
}

#[test]
fn find_locates_entries_by_product_id() {
    let entries = entries();
    assert_eq!(find(&entries, 2).map(|e| e.product.name.as_str()), Some("Empanada"));
    assert!(find(&entries, 99).is_none());
}
