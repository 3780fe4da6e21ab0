use super::*;
use crate::util::jwt::RealmAccess;

fn tokens(expires_at: i64) -> TokenSet {
    TokenSet {
        access_token: "access".to_owned(),
        refresh_token: "refresh".to_owned(),
        expires_at,
    }
}

fn profile(roles: &[&str]) -> UserProfile {
    UserProfile {
        id: "f1c2".to_owned(),
        username: "maria".to_owned(),
        email: None,
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
    }
}

// =============================================================
// Phase transitions
// =============================================================

#[test]
fn default_phase_is_uninitialized() {
    let state = SessionState::default();
    assert_eq!(state.phase, SessionPhase::Uninitialized);
    assert!(!state.authenticated());
    assert!(state.user.is_none());
    assert!(state.token().is_none());
}

#[test]
fn authenticate_enters_authenticated_with_identity() {
    let mut state = SessionState::default();
    state.authenticate(profile(&["admin"]), tokens(100));
    assert_eq!(state.phase, SessionPhase::Authenticated);
    assert!(state.authenticated());
    assert_eq!(state.token().as_deref(), Some("access"));
    assert_eq!(state.user.as_ref().unwrap().username, "maria");
}

#[test]
fn silent_refresh_self_transition_replaces_tokens() {
    let mut state = SessionState::default();
    state.authenticate(profile(&[]), tokens(100));
    state.authenticate(profile(&[]), tokens(200));
    assert_eq!(state.phase, SessionPhase::Authenticated);
    assert_eq!(state.tokens.as_ref().unwrap().expires_at, 200);
}

#[test]
fn mark_unauthenticated_clears_identity() {
    let mut state = SessionState::default();
    state.authenticate(profile(&[]), tokens(100));
    state.mark_unauthenticated();
    assert_eq!(state.phase, SessionPhase::Unauthenticated);
    assert!(state.user.is_none());
    assert!(state.tokens.is_none());
}

#[test]
fn reset_returns_to_uninitialized() {
    let mut state = SessionState::default();
    state.authenticate(profile(&[]), tokens(100));
    state.reset();
    assert_eq!(state, SessionState::default());
}

// =============================================================
// Roles
// =============================================================

#[test]
fn has_role_matches_realm_roles() {
    let mut state = SessionState::default();
    state.authenticate(profile(&["admin", "offline_access"]), tokens(100));
    assert!(state.has_role("admin"));
    assert!(state.is_admin());
    assert!(!state.has_role("manager"));
}

#[test]
fn roles_absent_when_unauthenticated() {
    let state = SessionState::default();
    assert!(!state.has_role("admin"));
    assert!(!state.is_admin());
}

// =============================================================
// Token expiry
// =============================================================

#[test]
fn expires_within_threshold_boundaries() {
    let t = tokens(1000);
    // 40s of lifetime left: a 30s minimum validity does not trigger.
    assert!(!t.expires_within(960, 30));
    // Exactly the threshold triggers.
    assert!(t.expires_within(970, 30));
    // Already expired triggers.
    assert!(t.expires_within(1001, 30));
}

#[test]
fn negative_threshold_forces_refresh() {
    let t = tokens(i64::MAX);
    assert!(t.expires_within(0, -1));
}

// =============================================================
// Profile from claims
// =============================================================

#[test]
fn profile_from_claims_maps_fields() {
    let claims = Claims {
        sub: "f1c2".to_owned(),
        preferred_username: Some("maria".to_owned()),
        email: Some("maria@example.com".to_owned()),
        exp: 0,
        realm_access: RealmAccess {
            roles: vec!["admin".to_owned()],
        },
    };
    let profile = UserProfile::from_claims(&claims);
    assert_eq!(profile.id, "f1c2");
    assert_eq!(profile.username, "maria");
    assert_eq!(profile.email.as_deref(), Some("maria@example.com"));
    assert_eq!(profile.roles, vec!["admin"]);
}

#[test]
fn profile_from_claims_falls_back_to_subject_for_username() {
    let claims = Claims {
        sub: "f1c2".to_owned(),
        ..Claims::default()
    };
    let profile = UserProfile::from_claims(&claims);
    assert_eq!(profile.username, "f1c2");
}
