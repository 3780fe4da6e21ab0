//! Admin-only product creation form.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use rust_decimal::Decimal;

use crate::net::oidc::Session;
use crate::state::session::SessionState;
use crate::util::auth;

/// Product creation page. Rejects non-admins with a gate screen, and
/// walks the token-refresh path by hand when the backend answers 401.
#[component]
pub fn CreateProductPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    auth::install_unauth_redirect(session.state, navigate);

    let state = session.state;
    let is_admin = Memo::new(move |_| state.with(SessionState::is_admin));
    let roles_line = move || {
        state.with(|s| {
            s.user
                .as_ref()
                .map(|u| u.roles.join(", "))
                .filter(|joined| !joined.is_empty())
                .unwrap_or_else(|| "Ninguno".to_owned())
        })
    };

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let message = RwSignal::new(String::new());

    let login_session = session.clone();
    let on_login = Callback::new(move |()| login_session.login());

    let submit_session = session.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let product_name = name.get_untracked();
        let product_description = description.get_untracked();
        let price_text = price.get_untracked();
        if product_name.trim().is_empty()
            || product_description.trim().is_empty()
            || price_text.trim().is_empty()
        {
            message.set("❌ Todos los campos son obligatorios".to_owned());
            return;
        }
        let Ok(product_price) = price_text.trim().parse::<Decimal>() else {
            message.set("❌ Precio inválido".to_owned());
            return;
        };

        loading.set(true);
        message.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let session = submit_session.clone();
            leptos::task::spawn_local(async move {
                // Same pre-flight the Keycloak adapter does: top up a token
                // that is about to expire before spending it.
                let min_validity = crate::net::oidc::REFRESH_MIN_VALIDITY_SECS;
                if let Ok(true) = session.refresh_if_needed(min_validity).await {
                    leptos::logging::log!("access token refreshed before submit");
                }
                let Some(token) = session.token() else {
                    loading.set(false);
                    return;
                };

                let request = crate::net::types::NewProduct {
                    name: product_name,
                    description: product_description,
                    price: product_price,
                };
                use crate::net::api::ApiError;
                match crate::net::api::create_product(&request, &token).await {
                    Ok(_) => {
                        message.set("✅ Producto creado exitosamente!".to_owned());
                        name.set(String::new());
                        description.set(String::new());
                        price.set(String::new());
                    }
                    Err(ApiError::Forbidden) => {
                        message.set(
                            "❌ Acceso denegado: No tienes permisos de administrador".to_owned(),
                        );
                    }
                    Err(ApiError::Unauthorized) => match session.refresh_if_needed(-1).await {
                        Ok(_) => {
                            message.set(
                                "🔄 Token renovado. Intenta crear el producto nuevamente."
                                    .to_owned(),
                            );
                        }
                        Err(_) => {
                            message.set(
                                "❌ No se pudo renovar el token. Por favor, vuelve a iniciar sesión."
                                    .to_owned(),
                            );
                            gloo_timers::future::sleep(std::time::Duration::from_secs(2)).await;
                            session.login();
                        }
                    },
                    Err(ApiError::NotFound) => {
                        message.set("❌ Error del servidor (404)".to_owned());
                    }
                    Err(ApiError::Status(status)) => {
                        message.set(format!("❌ Error del servidor ({status})"));
                    }
                    Err(ApiError::Network(_)) => {
                        message.set("❌ Error de conexión con el servidor".to_owned());
                    }
                }
                loading.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (product_name, product_description, product_price, &submit_session);
            loading.set(false);
        }
    };

    let refresh_session = session;
    let on_manual_refresh = Callback::new(move |()| {
        #[cfg(feature = "hydrate")]
        {
            let session = refresh_session.clone();
            leptos::task::spawn_local(async move {
                match session.refresh_if_needed(-1).await {
                    Ok(true) => message.set("✅ Token refrescado manualmente".to_owned()),
                    Ok(false) => message.set("ℹ️ Token aún válido".to_owned()),
                    Err(_) => {
                        message.set(
                            "❌ Error renovando token. Por favor, vuelve a iniciar sesión."
                                .to_owned(),
                        );
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = &refresh_session;
    });

    view! {
        <div class="create-product-page">
            <Show
                when=move || is_admin.get()
                fallback=move || {
                    view! {
                        <div class="create-product-page__gate">
                            <h2>"Acceso Restringido"</h2>
                            <p>"Solo los administradores pueden crear productos."</p>
                            <button class="btn btn--primary" on:click=move |_| on_login.run(())>
                                "Iniciar Sesión como Admin"
                            </button>
                        </div>
                    }
                }
            >
                <h2>"Crear Producto (Admin)"</h2>

                <div class="create-product-page__debug">
                    <strong>"Debug Info:"</strong>
                    <div>
                        "Autenticado: "
                        {move || {
                            if state.with(SessionState::authenticated) { "✅ Sí" } else { "❌ No" }
                        }}
                    </div>
                    <div>
                        "Token: "
                        {move || {
                            if state.with(|s| s.token().is_some()) {
                                "✅ Presente"
                            } else {
                                "❌ Ausente"
                            }
                        }}
                    </div>
                    <div>"Roles: " {roles_line}</div>
                </div>

                <Show when=move || !message.with(String::is_empty)>
                    <div
                        class="create-product-page__message"
                        class:create-product-page__message--success=move || {
                            message.with(|m| m.contains('✅'))
                        }
                    >
                        {move || message.get()}
                    </div>
                </Show>

                <form class="create-product-page__form" on:submit=on_submit.clone()>
                    <label>
                        "Nombre del Producto"
                        <input
                            type="text"
                            placeholder="Ej: Laptop Gaming"
                            required
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Descripción"
                        <textarea
                            placeholder="Descripción detallada del producto..."
                            rows="4"
                            required
                            prop:value=move || description.get()
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label>
                        "Precio"
                        <input
                            type="number"
                            step="0.01"
                            min="0"
                            placeholder="0.00"
                            required
                            prop:value=move || price.get()
                            on:input=move |ev| price.set(event_target_value(&ev))
                        />
                    </label>

                    <div class="create-product-page__actions">
                        <button type="submit" disabled=move || loading.get()>
                            {move || if loading.get() { "Creando..." } else { "Crear Producto" }}
                        </button>
                        <button type="button" on:click=move |_| on_manual_refresh.run(())>
                            "🔄 Refresh Token"
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
