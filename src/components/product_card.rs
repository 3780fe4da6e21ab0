//! Catalog card for a single product.
//!
//! DESIGN
//! ======
//! Keeps product presentation consistent between the admin and customer
//! dashboards. The card itself opens the detail modal; role-specific
//! actions (add to cart, delete) arrive as optional callbacks and stop
//! propagation so they never double as an open click.

use leptos::prelude::*;

use crate::state::catalog::CatalogEntry;
use crate::util::dialog;
use crate::util::money::format_price;

/// A clickable product card. Delete confirms before firing.
#[component]
pub fn ProductCard(
    entry: CatalogEntry,
    #[prop(optional)] is_admin: bool,
    on_open: Callback<i64>,
    #[prop(optional)] on_add_to_cart: Option<Callback<i64>>,
    #[prop(optional)] on_delete: Option<Callback<i64>>,
) -> impl IntoView {
    let product_id = entry.product.id;
    let name = entry.product.name.clone();
    let description = entry.product.description.clone();
    let price_label = format_price(entry.product.price);
    let comment_count = entry.product.comments.len();
    let image_url = entry.image_url.clone();

    let on_delete_click = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        if !dialog::confirm("¿Estás seguro de que deseas eliminar este producto?") {
            return;
        }
        if let Some(on_delete) = on_delete.as_ref() {
            on_delete.run(product_id);
        }
    };

    let on_add_click = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        if let Some(on_add) = on_add_to_cart.as_ref() {
            on_add.run(product_id);
        }
    };

    view! {
        <div class="product-card" on:click=move |_| on_open.run(product_id)>
            <div class="product-card__media">
                {match image_url {
                    Some(url) => {
                        view! { <img class="product-card__image" src=url alt=name.clone()/> }
                            .into_any()
                    }
                    None => view! { <div class="product-card__placeholder">"📷"</div> }.into_any(),
                }}
            </div>
            <div class="product-card__body">
                <div class="product-card__top">
                    <h3 class="product-card__name">{name}</h3>
                    <span class="product-card__price">{price_label}</span>
                </div>
                <p class="product-card__description">{description}</p>
                <div class="product-card__stats">
                    <span class="product-card__comments">
                        "💬 " {comment_count} " comentarios"
                    </span>
                </div>
                <div class="product-card__actions">
                    <button
                        class="product-card__view"
                        disabled=comment_count == 0
                        on:click=move |ev: leptos::ev::MouseEvent| {
                            ev.stop_propagation();
                            on_open.run(product_id);
                        }
                    >
                        {if comment_count > 0 { "💬 Ver Comentarios" } else { "Sin Comentarios" }}
                    </button>
                    <Show when=move || on_add_to_cart.is_some()>
                        <button class="product-card__add" on:click=on_add_click>
                            "🛒 Agregar al Carrito"
                        </button>
                    </Show>
                    <Show when=move || is_admin>
                        <button class="product-card__delete" on:click=on_delete_click>
                            "🗑️ Eliminar Producto"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
