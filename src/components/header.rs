//! Fixed top bar with identity, role badges, and session actions.

use leptos::prelude::*;

use crate::net::oidc::Session;
use crate::state::session::ADMIN_ROLE;

/// Store header showing who is signed in, their realm roles, a catalog
/// refresh button, and logout.
#[component]
pub fn Header(loading: RwSignal<bool>, on_refresh: Callback<()>) -> impl IntoView {
    let session = expect_context::<Session>();
    let state = session.state;

    let is_admin = move || state.with(|s| s.is_admin());
    let username = move || {
        state.with(|s| {
            s.user
                .as_ref()
                .map_or_else(String::new, |u| u.username.clone())
        })
    };
    let roles = move || {
        state.with(|s| {
            s.user
                .as_ref()
                .map(|u| u.roles.clone())
                .unwrap_or_default()
        })
    };

    let on_logout = move |_| session.logout();

    view! {
        <header class="site-header">
            <div class="site-header__content">
                <h1 class="site-header__title">
                    {move || {
                        if is_admin() { "🛠️ Panel de Administración" } else { "🛍️ Tienda Virtual" }
                    }}
                </h1>
                <div class="site-header__user">
                    <span class="site-header__welcome">"Hola, " {username}</span>
                    <div class="site-header__badges">
                        {move || {
                            roles()
                                .into_iter()
                                .map(|role| {
                                    let admin = role == ADMIN_ROLE;
                                    view! {
                                        <span
                                            class="role-badge"
                                            class:role-badge--admin=admin
                                            class:role-badge--user=!admin
                                        >
                                            {role}
                                            {admin.then_some(" 👑")}
                                        </span>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                    <button
                        class="site-header__refresh"
                        on:click=move |_| on_refresh.run(())
                        disabled=move || loading.get()
                    >
                        {move || if loading.get() { "🔄 Cargando..." } else { "🔄 Recargar" }}
                    </button>
                    <button class="site-header__logout" on:click=on_logout>
                        "Cerrar Sesión"
                    </button>
                </div>
            </div>
        </header>
    }
}
