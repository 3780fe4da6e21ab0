use super::*;

use crate::state::session::SessionPhase;

fn config() -> SessionConfig {
    SessionConfig::default()
}

/// Unsigned token with the given JSON payload, enough for claim decoding.
fn token_with(payload: &str) -> String {
    format!("e30.{}.sig", URL_SAFE_NO_PAD.encode(payload))
}

fn token_response(access_token: String) -> TokenResponse {
    TokenResponse {
        access_token,
        expires_in: 300,
        refresh_token: "rt-1".to_owned(),
    }
}

// =====================================================================
// Endpoints and URLs
// =====================================================================

#[test]
fn default_config_points_at_local_realm() {
    let config = config();
    assert_eq!(
        config.authorize_endpoint(),
        "https://localhost:9443/realms/parcial-realm/protocol/openid-connect/auth"
    );
    assert_eq!(
        config.token_endpoint(),
        "https://localhost:9443/realms/parcial-realm/protocol/openid-connect/token"
    );
    assert_eq!(
        config.logout_endpoint(),
        "https://localhost:9443/realms/parcial-realm/protocol/openid-connect/logout"
    );
}

#[test]
fn authorize_url_carries_pkce_and_state() {
    let url = authorize_url(&config(), "https://shop.example/dashboard", "st-9", "ch-9");
    assert!(url.starts_with(
        "https://localhost:9443/realms/parcial-realm/protocol/openid-connect/auth?"
    ));
    assert!(url.contains("client_id=web-client"));
    assert!(url.contains("redirect_uri=https%3A%2F%2Fshop.example%2Fdashboard"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("scope=openid%20profile%20email"));
    assert!(url.contains("state=st-9"));
    assert!(url.contains("code_challenge=ch-9"));
    assert!(url.contains("code_challenge_method=S256"));
}

#[test]
fn logout_url_returns_to_caller() {
    let url = logout_url(&config(), "https://shop.example");
    assert!(url.starts_with(
        "https://localhost:9443/realms/parcial-realm/protocol/openid-connect/logout?"
    ));
    assert!(url.contains("client_id=web-client"));
    assert!(url.contains("post_logout_redirect_uri=https%3A%2F%2Fshop.example"));
}

// =====================================================================
// PKCE
// =====================================================================

#[test]
fn code_challenge_matches_rfc_7636_vector() {
    assert_eq!(
        code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
        "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
    );
}

#[test]
fn verifiers_are_long_and_unique() {
    let a = new_verifier();
    let b = new_verifier();
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
}

// =====================================================================
// Token endpoint bodies
// =====================================================================

#[test]
fn code_exchange_body_uses_authorization_code_grant() {
    let body = code_exchange_body(&config(), "code-1", "ver-1", "https://shop.example/dashboard");
    assert_eq!(
        body,
        "grant_type=authorization_code&client_id=web-client&code=code-1\
         &redirect_uri=https%3A%2F%2Fshop.example%2Fdashboard&code_verifier=ver-1"
    );
}

#[test]
fn refresh_body_uses_refresh_token_grant() {
    assert_eq!(
        refresh_grant_body(&config(), "rt-1"),
        "grant_type=refresh_token&client_id=web-client&refresh_token=rt-1"
    );
}

#[test]
fn form_encode_escapes_reserved_characters() {
    assert_eq!(form_encode(&[("a", "x y"), ("b", "p&q")]), "a=x%20y&b=p%26q");
}

// =====================================================================
// Callback query parsing
// =====================================================================

#[test]
fn auth_code_parses_in_either_order() {
    assert_eq!(
        auth_code_from_search("?code=abc&state=xyz"),
        Some(("abc".to_owned(), "xyz".to_owned()))
    );
    assert_eq!(
        auth_code_from_search("?state=xyz&code=abc"),
        Some(("abc".to_owned(), "xyz".to_owned()))
    );
}

#[test]
fn auth_code_ignores_extra_parameters() {
    assert_eq!(
        auth_code_from_search("?session_state=s&iss=https%3A%2F%2Fidp&code=abc&state=xyz"),
        Some(("abc".to_owned(), "xyz".to_owned()))
    );
}

#[test]
fn auth_code_requires_both_parameters() {
    assert_eq!(auth_code_from_search("?code=abc"), None);
    assert_eq!(auth_code_from_search("?state=xyz"), None);
    assert_eq!(auth_code_from_search(""), None);
}

// =====================================================================
// Token acceptance
// =====================================================================

#[test]
fn accepting_tokens_enters_authenticated_phase() {
    let session = Session::new(config());
    let access = token_with(
        r#"{"sub":"u-1","preferred_username":"maria","email":"maria@shop.example",
           "exp":2000000000,"realm_access":{"roles":["admin"]}}"#,
    );
    session
        .accept_tokens(&token_response(access.clone()))
        .unwrap();

    session.state.with_untracked(|s| {
        assert_eq!(s.phase, SessionPhase::Authenticated);
        let user = s.user.as_ref().unwrap();
        assert_eq!(user.username, "maria");
        assert!(s.is_admin());
        let tokens = s.tokens.as_ref().unwrap();
        assert_eq!(tokens.access_token, access);
        assert_eq!(tokens.refresh_token, "rt-1");
        assert_eq!(tokens.expires_at, 2_000_000_000);
    });
    assert_eq!(session.token(), Some(access));
}

#[test]
fn accepting_tokens_without_exp_claim_falls_back_to_expires_in() {
    let session = Session::new(config());
    let access = token_with(r#"{"sub":"u-2"}"#);
    let before = now_secs();
    session.accept_tokens(&token_response(access)).unwrap();
    let after = now_secs();

    session.state.with_untracked(|s| {
        let expires_at = s.tokens.as_ref().unwrap().expires_at;
        assert!(expires_at >= before + 300);
        assert!(expires_at <= after + 300);
    });
}

#[test]
fn undecodable_access_token_is_rejected() {
    let session = Session::new(config());
    let result = session.accept_tokens(&token_response("garbage".to_owned()));
    assert!(result.is_err());
    session
        .state
        .with_untracked(|s| assert_eq!(s.phase, SessionPhase::Uninitialized));
}

#[test]
fn token_is_none_before_any_login() {
    let session = Session::new(config());
    assert_eq!(session.token(), None);
}

// =====================================================================
// Logout
// =====================================================================

#[test]
fn logout_resets_state_and_stops_the_refresh_task() {
    let session = Session::new(config());
    let access = token_with(r#"{"sub":"u-3","exp":2000000000}"#);
    session.accept_tokens(&token_response(access)).unwrap();
    session.refresh_alive.store(true, Ordering::Relaxed);

    session.logout();

    session.state.with_untracked(|s| {
        assert_eq!(s.phase, SessionPhase::Uninitialized);
        assert!(s.user.is_none());
        assert!(s.tokens.is_none());
    });
    assert!(!session.refresh_alive.load(Ordering::Relaxed));
}
