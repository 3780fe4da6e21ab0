use super::*;
use serde_json::json;

fn token_with(payload: &serde_json::Value) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("e30.{encoded}.sig")
}

#[test]
fn decodes_full_claim_set() {
    let token = token_with(&json!({
        "sub": "f1c2",
        "preferred_username": "maria",
        "email": "maria@example.com",
        "exp": 1_700_000_000,
        "realm_access": {"roles": ["admin", "offline_access"]},
    }));
    let claims = decode_claims(&token).unwrap();
    assert_eq!(claims.sub, "f1c2");
    assert_eq!(claims.preferred_username.as_deref(), Some("maria"));
    assert_eq!(claims.email.as_deref(), Some("maria@example.com"));
    assert_eq!(claims.exp, 1_700_000_000);
    assert_eq!(claims.realm_access.roles, vec!["admin", "offline_access"]);
}

#[test]
fn missing_optional_claims_default() {
    let token = token_with(&json!({"sub": "f1c2"}));
    let claims = decode_claims(&token).unwrap();
    assert_eq!(claims.sub, "f1c2");
    assert!(claims.preferred_username.is_none());
    assert!(claims.email.is_none());
    assert_eq!(claims.exp, 0);
    assert!(claims.realm_access.roles.is_empty());
}

#[test]
fn rejects_token_without_payload_segment() {
    assert!(decode_claims("not-a-jwt").is_none());
}

#[test]
fn rejects_non_base64_payload() {
    assert!(decode_claims("e30.!!not-base64!!.sig").is_none());
}

#[test]
fn rejects_non_json_payload() {
    let encoded = URL_SAFE_NO_PAD.encode("hello world");
    assert!(decode_claims(&format!("e30.{encoded}.sig")).is_none());
}

#[test]
fn rejects_payload_without_subject() {
    let token = token_with(&json!({"preferred_username": "maria"}));
    assert!(decode_claims(&token).is_none());
}
