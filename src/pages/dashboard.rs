//! Dashboard page, the storefront catalog for customers and admins.
//!
//! Also serves as the OAuth redirect target: the session adapter consumes
//! the `?code=` query before this page's catalog load runs.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::cart_drawer::CartDrawer;
use crate::components::header::Header;
use crate::components::product_card::ProductCard;
use crate::components::product_modal::ProductModal;
use crate::net::oidc::Session;
use crate::state::cart::{self, CartAction, CartState};
use crate::state::catalog::{self, CatalogEntry};
use crate::state::session::SessionState;
use crate::util::auth;

/// Fetch the product list, then each product's image in the background.
/// Images land one by one via the shared entries signal.
fn load_catalog(session: &Session, entries: RwSignal<Vec<CatalogEntry>>, loading: RwSignal<bool>) {
    let Some(token) = session.token() else {
        return;
    };
    loading.set(true);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let products = crate::net::api::fetch_products(&token).await.unwrap_or_default();
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        entries.set(catalog::from_products(products));
        loading.set(false);

        for id in ids {
            let token = token.clone();
            leptos::task::spawn_local(async move {
                if let Some(url) = crate::net::api::fetch_product_image(id, &token).await {
                    entries.update(|list| catalog::set_image(list, id, url));
                }
            });
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, entries);
        loading.set(false);
    }
}

/// Dashboard page: product grid with the cart drawer for customers and
/// management actions for admins.
/// Redirects to `/` if the user is not authenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let cart = expect_context::<RwSignal<CartState>>();
    let navigate = use_navigate();

    auth::install_unauth_redirect(session.state, navigate.clone());

    let state = session.state;
    let is_admin = Memo::new(move |_| state.with(SessionState::is_admin));
    let username = move || {
        state.with(|s| {
            s.user
                .as_ref()
                .map_or_else(|| "User".to_owned(), |u| u.username.clone())
        })
    };

    let entries = RwSignal::new(Vec::<CatalogEntry>::new());
    let loading = RwSignal::new(false);
    let selected = RwSignal::new(None::<i64>);

    // Load once, after session resolution lands on a login.
    let requested = RwSignal::new(false);
    {
        let session = session.clone();
        Effect::new(move || {
            if state.with(SessionState::authenticated) && !requested.get_untracked() {
                requested.set(true);
                load_catalog(&session, entries, loading);
            }
        });
    }

    let refresh_session = session.clone();
    let on_refresh = Callback::new(move |()| load_catalog(&refresh_session, entries, loading));

    let on_open = Callback::new(move |id: i64| selected.set(Some(id)));

    let on_add_to_cart = Callback::new(move |id: i64| {
        let Some(entry) = entries.with_untracked(|list| catalog::find(list, id).cloned()) else {
            return;
        };
        cart::dispatch(
            cart,
            CartAction::Add {
                id: entry.product.id,
                name: entry.product.name,
                price: entry.product.price,
                image: entry.image_url,
            },
        );
    });

    let delete_session = session.clone();
    let on_delete = Callback::new(move |id: i64| {
        let Some(token) = delete_session.token() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_product(id, &token).await {
                Ok(()) => entries.update(|list| catalog::remove_product(list, id)),
                Err(err) => leptos::logging::warn!("product delete failed: {err:?}"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (token, id);
    });

    let to_create = Callback::new(move |()| navigate("/CreateProduct", NavigateOptions::default()));

    view! {
        <Show
            when=move || state.with(SessionState::authenticated)
            fallback=|| view! { <p class="dashboard-page__redirect">"Redirecting to login..."</p> }
        >
            <div class="dashboard-page">
                <Header loading=loading on_refresh=on_refresh/>

                <main class="dashboard-page__main">
                    {move || {
                        if is_admin.get() {
                            view! {
                                <div class="dashboard-page__hero">
                                    <div class="dashboard-page__badge">
                                        <span>"⚙️"</span>
                                        <span>"Panel de Administración"</span>
                                    </div>
                                    <h1>"Gestión de Productos"</h1>
                                    <p class="dashboard-page__subtitle">
                                        "Administra el catálogo de arepas artesanales. Crea y elimina productos."
                                    </p>
                                    <div class="dashboard-page__actions">
                                        <button
                                            class="btn btn--primary"
                                            on:click=move |_| to_create.run(())
                                        >
                                            "➕ Crear Nuevo Producto"
                                        </button>
                                        <button
                                            class="btn"
                                            disabled=move || loading.get()
                                            on:click=move |_| on_refresh.run(())
                                        >
                                            {move || {
                                                if loading.get() { "🔄 Cargando..." } else { "🔄 Actualizar" }
                                            }}
                                        </button>
                                    </div>
                                    <p class="dashboard-page__hint">
                                        "⚙️ Modo Administrador: Haz clic en cualquier producto para gestionarlo"
                                    </p>
                                </div>
                            }
                                .into_any()
                        } else {
                            view! {
                                <div class="dashboard-page__hero">
                                    <h1>{move || format!("Welcome, {}!", username())}</h1>
                                </div>
                            }
                                .into_any()
                        }
                    }}

                    <section class="dashboard-page__catalog">
                        <h2>"Catálogo de Productos"</h2>
                        {move || {
                            if loading.get() {
                                view! {
                                    <p class="dashboard-page__loading">"Cargando productos..."</p>
                                }
                                    .into_any()
                            } else if entries.with(Vec::is_empty) {
                                view! {
                                    <div class="dashboard-page__empty">
                                        <div class="dashboard-page__empty-icon">"🍽️"</div>
                                        <p>"No hay productos disponibles"</p>
                                        <Show when=move || is_admin.get()>
                                            <p class="dashboard-page__empty-hint">
                                                "Crea tu primer producto usando el botón de arriba"
                                            </p>
                                        </Show>
                                    </div>
                                }
                                    .into_any()
                            } else {
                                let admin = is_admin.get();
                                view! {
                                    <div class="dashboard-page__grid">
                                        {entries
                                            .get()
                                            .into_iter()
                                            .map(|entry| {
                                                if admin {
                                                    view! {
                                                        <ProductCard
                                                            entry=entry
                                                            is_admin=true
                                                            on_open=on_open
                                                            on_delete=on_delete
                                                        />
                                                    }
                                                        .into_any()
                                                } else {
                                                    view! {
                                                        <ProductCard
                                                            entry=entry
                                                            on_open=on_open
                                                            on_add_to_cart=on_add_to_cart
                                                        />
                                                    }
                                                        .into_any()
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }
                        }}
                    </section>
                </main>

                <ProductModal entries=entries selected=selected is_admin=is_admin/>

                <Show when=move || !is_admin.get()>
                    <CartDrawer/>
                </Show>
            </div>
        </Show>
    }
}
