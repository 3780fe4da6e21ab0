//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::net::oidc::{Session, SessionConfig};
use crate::pages::{
    checkout::CheckoutPage, create_product::CreateProductPage, dashboard::DashboardPage,
    home::HomePage, login::LoginPage, signup::SignupPage,
};
use crate::state::cart;
use crate::state::session::SessionPhase;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the cart store and the OIDC session via context, kicks off
/// session resolution, and holds routing back until the session phase is
/// known so protected pages never render against an undecided login state.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let cart = RwSignal::new(cart::restore());
    let session = Session::new(SessionConfig::default());
    let session_state = session.state;

    provide_context(cart);
    provide_context(session.clone());

    // Resolve code-in-URL / stored refresh token before any page renders.
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        session.initialize().await;
    });
    #[cfg(not(feature = "hydrate"))]
    drop(session);

    let resolved = move || session_state.with(|s| s.phase != SessionPhase::Uninitialized);

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront.css"/>
        <Title text="Secure Ecommerce"/>

        <Show
            when=resolved
            fallback=|| {
                view! {
                    <div class="auth-loading">
                        <div class="auth-loading__spinner"></div>
                        <p>"🔐 Cargando autenticación..."</p>
                    </div>
                }
            }
        >
            <Router>
                <Routes fallback=|| view! { <Redirect path="/"/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("CreateProduct") view=CreateProductPage/>
                    <Route path=StaticSegment("PaymentModule") view=CheckoutPage/>
                </Routes>
            </Router>
        </Show>
    }
}
