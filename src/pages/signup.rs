//! Account signup page posting to the registration endpoint.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::oidc::Session;
use crate::util::auth;

/// Signup page. Collects username, email, and password, and reports the
/// registration outcome inline.
#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    auth::install_auth_redirect(session.state, navigate);

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let message = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        loading.set(true);
        message.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let request = crate::net::types::RegisterRequest {
                username: username.get_untracked(),
                email: email.get_untracked(),
                password: password.get_untracked(),
            };
            leptos::task::spawn_local(async move {
                use crate::net::api::RegisterError;
                match crate::net::api::register_user(&request).await {
                    Ok(_) => {
                        message.set("✅ Registration successful! You can now log in.".to_owned());
                    }
                    Err(RegisterError::Rejected(body)) => {
                        let detail = if body.is_empty() {
                            "Registration failed".to_owned()
                        } else {
                            body
                        };
                        message.set(format!("❌ Error: {detail}"));
                    }
                    Err(RegisterError::Network(_)) => {
                        message.set(
                            "⚠️ Network error. Check connection or SSL settings.".to_owned(),
                        );
                    }
                }
                loading.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        loading.set(false);
    };

    view! {
        <div class="signup-page">
            <form class="signup-page__form" on:submit=on_submit>
                <h2>"Create Account"</h2>

                <input
                    type="text"
                    placeholder="Username"
                    required
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    type="email"
                    placeholder="Email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />

                <button type="submit" disabled=move || loading.get()>
                    {move || if loading.get() { "Registering..." } else { "Sign Up" }}
                </button>

                <Show when=move || !message.with(String::is_empty)>
                    <p class="signup-page__message">{move || message.get()}</p>
                </Show>
            </form>
        </div>
    }
}
