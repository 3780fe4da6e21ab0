//! Shared route-guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical redirect behavior: protected
//! pages bounce unauthenticated visitors to the landing page, and public
//! pages bounce logged-in users to the dashboard. The predicates are pure
//! so the policy is testable without a browser.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::{SessionPhase, SessionState};

/// Whether a protected route should send this visitor to `/`.
///
/// Only fires after session resolution has finished; the undecided
/// `Uninitialized` phase never redirects.
#[must_use]
pub fn should_redirect_unauth(state: &SessionState) -> bool {
    state.phase == SessionPhase::Unauthenticated
}

/// Whether a public route should send this visitor to `/dashboard`.
#[must_use]
pub fn should_redirect_auth(state: &SessionState) -> bool {
    state.authenticated()
}

/// Redirect to `/` whenever session resolution lands without a login.
pub fn install_unauth_redirect<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        let state = session.get();
        if should_redirect_unauth(&state) {
            navigate("/", NavigateOptions::default());
        }
    });
}

/// Redirect logged-in users off public pages to the dashboard.
pub fn install_auth_redirect<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        let state = session.get();
        if should_redirect_auth(&state) {
            navigate("/dashboard", NavigateOptions::default());
        }
    });
}
