//! Login page that forwards to the Keycloak hosted login.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::oidc::Session;
use crate::state::session::SessionPhase;
use crate::util::auth;

/// Login page with no form of its own; it immediately starts the
/// authorization-code redirect once the session is known to be logged out.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    auth::install_auth_redirect(session.state, navigate);

    let state = session.state;
    Effect::new(move || {
        if state.with(|s| s.phase == SessionPhase::Unauthenticated) {
            session.login();
        }
    });

    view! {
        <div class="login-page">
            <p>"Redirecting to Keycloak login..."</p>
        </div>
    }
}
