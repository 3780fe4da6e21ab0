use super::*;
use serde_json::json;

// =============================================================
// Product / Comment deserialization
// =============================================================

#[test]
fn product_parses_camel_case_wire() {
    let wire = json!({
        "id": 3,
        "name": "Cafe de origen",
        "description": "Tostado medio",
        "price": 10.5,
        "comments": [
            {"id": 7, "content": "Muy bueno", "author": "maria", "createdAt": "2024-05-01T10:00:00"}
        ],
        "createdAt": "2024-04-30T09:00:00"
    });
    let product: Product = serde_json::from_value(wire).unwrap();
    assert_eq!(product.id, 3);
    assert_eq!(product.price, Decimal::new(105, 1));
    assert_eq!(product.comments.len(), 1);
    assert_eq!(product.comments[0].author, "maria");
    assert_eq!(product.created_at.as_deref(), Some("2024-04-30T09:00:00"));
}

#[test]
fn product_tolerates_missing_optional_fields() {
    let wire = json!({
        "id": 1,
        "name": "Pan",
        "description": "Integral",
        "price": 5.0
    });
    let product: Product = serde_json::from_value(wire).unwrap();
    assert!(product.comments.is_empty());
    assert!(product.created_at.is_none());
}

#[test]
fn comment_tolerates_missing_timestamp() {
    let wire = json!({"id": 2, "content": "ok", "author": "luis"});
    let comment: Comment = serde_json::from_value(wire).unwrap();
    assert!(comment.created_at.is_none());
}

// =============================================================
// ClientProfile wire names
// =============================================================

#[test]
fn client_profile_maps_spanish_wire_names() {
    let wire = json!({
        "id": 9,
        "uid": "f1c2",
        "correo": "maria@example.com",
        "usoCodigoDescuento": true
    });
    let profile: ClientProfile = serde_json::from_value(wire).unwrap();
    assert_eq!(profile.id, Some(9));
    assert_eq!(profile.email.as_deref(), Some("maria@example.com"));
    assert!(profile.coupon_available);
}

#[test]
fn client_profile_defaults_when_fields_absent() {
    let wire = json!({"uid": "f1c2"});
    let profile: ClientProfile = serde_json::from_value(wire).unwrap();
    assert!(profile.id.is_none());
    assert!(profile.email.is_none());
    assert!(!profile.coupon_available);
}

// =============================================================
// Payment request / receipt
// =============================================================

#[test]
fn payment_request_serializes_expected_keys() {
    let request = PaymentRequest {
        card_number: "4111111111111111".to_owned(),
        cardholder_name: "Maria Perez".to_owned(),
        expiry_month: "04".to_owned(),
        expiry_year: "2027".to_owned(),
        amount: Decimal::new(2250, 2),
        currency: "COP".to_owned(),
        items: "[]".to_owned(),
        direccion: "Calle 1 #2-3".to_owned(),
        client_data_id: Some(9),
        used_coupon: true,
    };
    let value = serde_json::to_value(&request).unwrap();
    let obj = value.as_object().unwrap();
    assert!(obj.contains_key("cardNumber"));
    assert!(obj.contains_key("cardholderName"));
    assert!(obj.contains_key("expiryMonth"));
    assert!(obj.contains_key("expiryYear"));
    assert!(obj.contains_key("direccion"));
    assert!(obj.contains_key("clientDataId"));
    assert!(obj.contains_key("usedCoupon"));
    assert_eq!(obj["currency"], "COP");
}

#[test]
fn payment_receipt_needs_only_transaction_id() {
    let wire = json!({
        "transactionId": "7e0a",
        "token": "tok_abc",
        "cardBin": "411111"
    });
    let receipt: PaymentReceipt = serde_json::from_value(wire).unwrap();
    assert_eq!(receipt.transaction_id, "7e0a");
    assert!(receipt.payment_status.is_none());
}

#[test]
fn payment_receipt_parses_full_entity() {
    let wire = json!({
        "transactionId": "7e0a",
        "paymentStatus": "AUTHORIZED",
        "amount": 22.5,
        "currency": "COP",
        "fechaPago": "2024-05-01T10:00:00",
        "cardNumberLast4": "1111"
    });
    let receipt: PaymentReceipt = serde_json::from_value(wire).unwrap();
    assert_eq!(receipt.payment_status.as_deref(), Some("AUTHORIZED"));
    assert_eq!(receipt.amount, Some(Decimal::new(225, 1)));
    assert_eq!(receipt.card_number_last4.as_deref(), Some("1111"));
}

// =============================================================
// Token endpoint response
// =============================================================

#[test]
fn token_response_parses_keycloak_shape() {
    let wire = json!({
        "access_token": "at",
        "expires_in": 300,
        "refresh_expires_in": 1800,
        "refresh_token": "rt",
        "token_type": "Bearer",
        "scope": "openid profile email"
    });
    let response: TokenResponse = serde_json::from_value(wire).unwrap();
    assert_eq!(response.access_token, "at");
    assert_eq!(response.expires_in, 300);
    assert_eq!(response.refresh_token, "rt");
}

#[test]
fn token_response_requires_refresh_token() {
    let wire = json!({"access_token": "at", "expires_in": 300});
    assert!(serde_json::from_value::<TokenResponse>(wire).is_err());
}

// =============================================================
// items payload
// =============================================================

#[test]
fn items_payload_serializes_cart_lines() {
    let items = vec![
        CartItem {
            id: 1,
            name: "Cafe".to_owned(),
            price: Decimal::from(10),
            quantity: 2,
            image: Some("blob:x".to_owned()),
        },
        CartItem {
            id: 2,
            name: "Pan".to_owned(),
            price: Decimal::from(5),
            quantity: 1,
            image: None,
        },
    ];
    let payload = items_payload(&items);
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    let lines = value.as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[1]["name"], "Pan");
    // The image never travels to the payment endpoint.
    assert!(lines[0].get("image").is_none());
}

#[test]
fn items_payload_empty_cart_is_empty_array() {
    assert_eq!(items_payload(&[]), "[]");
}

// =============================================================
// Request bodies
// =============================================================

#[test]
fn new_comment_sends_content_only() {
    let body = NewComment {
        content: "Muy bueno".to_owned(),
    };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value, json!({"content": "Muy bueno"}));
}

#[test]
fn register_request_serializes_credentials() {
    let body = RegisterRequest {
        username: "maria".to_owned(),
        email: "maria@example.com".to_owned(),
        password: "secret".to_owned(),
    };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["username"], "maria");
    assert_eq!(value["email"], "maria@example.com");
}
