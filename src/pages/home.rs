//! Landing page with links into the login and signup flows.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::oidc::Session;
use crate::util::auth;

/// Public landing page.
/// Logged-in visitors are sent straight to the dashboard.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    auth::install_auth_redirect(session.state, navigate.clone());

    let to_login = {
        let navigate = navigate.clone();
        move |_| navigate("/login", NavigateOptions::default())
    };
    let to_signup = move |_| navigate("/signup", NavigateOptions::default());

    view! {
        <div class="home-page">
            <h1>"Welcome to Secure Ecommerce"</h1>
            <div class="home-page__actions">
                <button class="btn btn--primary" on:click=to_login>
                    "Login"
                </button>
                <button class="btn" on:click=to_signup>
                    "Sign Up"
                </button>
            </div>
        </div>
    }
}
