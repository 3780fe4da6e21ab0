//! Authentication session state machine.
//!
//! DESIGN
//! ======
//! The session adapter in `net::oidc` owns the only writer to this state;
//! pages and components read it through context. Phase transitions are
//! methods here so the adapter stays free of field twiddling and the
//! machine is natively testable.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::util::jwt::Claims;

/// Realm role that unlocks catalog management.
pub const ADMIN_ROLE: &str = "admin";

/// Lifecycle phase of the login session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Resolution against the identity provider has not finished yet.
    /// Routing is held back while in this phase.
    #[default]
    Uninitialized,
    /// Resolution finished without a usable login.
    Unauthenticated,
    /// A token set is held and the user identity is known.
    Authenticated,
}

/// Identity decoded from the access token payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
    /// OIDC subject id.
    pub id: String,
    /// `preferred_username`, or the subject id when absent.
    pub username: String,
    pub email: Option<String>,
    /// Realm roles, used for the admin/customer split.
    pub roles: Vec<String>,
}

impl UserProfile {
    /// Build a profile from decoded token claims.
    #[must_use]
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub.clone(),
            username: claims
                .preferred_username
                .clone()
                .unwrap_or_else(|| claims.sub.clone()),
            email: claims.email.clone(),
            roles: claims.realm_access.roles.clone(),
        }
    }
}

/// Credential material for the current login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds when the access token expires (its `exp` claim).
    pub expires_at: i64,
}

impl TokenSet {
    /// Whether the access token expires within `min_validity_secs` of `now`.
    ///
    /// A negative threshold always reports `true`, which callers use to
    /// force an unconditional refresh.
    #[must_use]
    pub fn expires_within(&self, now_secs: i64, min_validity_secs: i64) -> bool {
        if min_validity_secs < 0 {
            return true;
        }
        self.expires_at - now_secs <= min_validity_secs
    }
}

/// Authentication state shared through context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<UserProfile>,
    pub tokens: Option<TokenSet>,
}

impl SessionState {
    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    /// Whether the logged-in user carries `role` among its realm roles.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.roles.iter().any(|r| r == role))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    /// Bearer token for API calls, when one is held.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.tokens.as_ref().map(|t| t.access_token.clone())
    }

    /// Enter `Authenticated` with fresh credentials. Also the self-transition
    /// after a silent refresh replaces the token set.
    pub fn authenticate(&mut self, user: UserProfile, tokens: TokenSet) {
        self.phase = SessionPhase::Authenticated;
        self.user = Some(user);
        self.tokens = Some(tokens);
    }

    /// Resolution finished without a login.
    pub fn mark_unauthenticated(&mut self) {
        self.phase = SessionPhase::Unauthenticated;
        self.user = None;
        self.tokens = None;
    }

    /// Logout: back to the pre-initialization phase.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
