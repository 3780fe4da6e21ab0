use super::*;
use crate::state::session::{TokenSet, UserProfile};

fn authenticated_state() -> SessionState {
    let mut state = SessionState::default();
    state.authenticate(
        UserProfile {
            id: "f1c2".to_owned(),
            username: "maria".to_owned(),
            email: None,
            roles: vec![],
        },
        TokenSet {
            access_token: "access".to_owned(),
            refresh_token: "refresh".to_owned(),
            expires_at: 0,
        },
    );
    state
}

#[test]
fn uninitialized_never_redirects() {
    let state = SessionState::default();
    assert!(!should_redirect_unauth(&state));
    assert!(!should_redirect_auth(&state));
}

#[test]
fn unauthenticated_leaves_protected_routes() {
    let mut state = SessionState::default();
    state.mark_unauthenticated();
    assert!(should_redirect_unauth(&state));
    assert!(!should_redirect_auth(&state));
}

#[test]
fn authenticated_stays_on_protected_routes() {
    let state = authenticated_state();
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn authenticated_leaves_public_routes() {
    let state = authenticated_state();
    assert!(should_redirect_auth(&state));
}
