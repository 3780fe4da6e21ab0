//! Floating cart button plus the slide-in drawer it opens.
//!
//! DESIGN
//! ======
//! The drawer reads the cart signal from context and funnels every change
//! through `cart::dispatch`, so each click lands in storage immediately.
//! Checkout just closes the drawer and navigates; the payment page reads
//! the same cart signal.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::quantity_selector::QuantitySelector;
use crate::state::cart::{self, CartAction, CartState};
use crate::util::money::format_price;

#[component]
pub fn CartDrawer() -> impl IntoView {
    let cart = expect_context::<RwSignal<CartState>>();
    let open = RwSignal::new(false);
    let navigate = use_navigate();

    let item_count = move || cart.with(CartState::item_count);
    let total_label = move || format_price(cart.with(CartState::total));
    let has_items = move || cart.with(|c| !c.items.is_empty());

    let on_checkout = Callback::new(move |()| {
        open.set(false);
        navigate("/PaymentModule", NavigateOptions::default());
    });

    view! {
        <button class="cart-button" aria-label="Abrir carrito" on:click=move |_| open.set(true)>
            "🛍️"
            <Show when=move || { item_count() > 0 }>
                <span class="cart-button__badge">{item_count}</span>
            </Show>
        </button>

        <Show when=move || open.get()>
            <div
                class="cart-overlay"
                aria-label="Cerrar carrito"
                on:click=move |_| open.set(false)
            ></div>
        </Show>

        <div class="cart-drawer" class:cart-drawer--open=move || open.get()>
            <div class="cart-drawer__header">
                <div>
                    <h2 class="cart-drawer__title">"Tu Carrito"</h2>
                    <Show when=move || { item_count() > 0 }>
                        <p class="cart-drawer__count">{item_count} " items"</p>
                    </Show>
                </div>
                <button
                    class="cart-drawer__close"
                    aria-label="Cerrar carrito"
                    on:click=move |_| open.set(false)
                >
                    "✕"
                </button>
            </div>

            <div class="cart-drawer__items">
                <Show
                    when=has_items
                    fallback=|| {
                        view! {
                            <div class="cart-drawer__empty">
                                <p class="cart-drawer__empty-title">"Carrito vacío"</p>
                                <p>"Agrega productos a tu carrito"</p>
                            </div>
                        }
                    }
                >
                    {move || {
                        cart.get()
                            .items
                            .into_iter()
                            .map(|item| {
                                let id = item.id;
                                let quantity = item.quantity;
                                let on_increase = Callback::new(move |()| {
                                    cart::dispatch(cart, CartAction::SetQuantity(id, quantity + 1));
                                });
                                let on_decrease = Callback::new(move |()| {
                                    cart::dispatch(cart, CartAction::SetQuantity(id, quantity - 1));
                                });
                                let on_remove = Callback::new(move |()| {
                                    cart::dispatch(cart, CartAction::Remove(id));
                                });
                                view! {
                                    <div class="cart-line">
                                        {match item.image {
                                            Some(url) => {
                                                view! {
                                                    <img
                                                        class="cart-line__image"
                                                        src=url
                                                        alt=item.name.clone()
                                                    />
                                                }
                                                    .into_any()
                                            }
                                            None => {
                                                view! {
                                                    <div class="cart-line__placeholder">"🛍️"</div>
                                                }
                                                    .into_any()
                                            }
                                        }}
                                        <div class="cart-line__info">
                                            <h3 class="cart-line__name">{item.name.clone()}</h3>
                                            <p class="cart-line__price">{format_price(item.price)}</p>
                                            <QuantitySelector
                                                quantity=quantity
                                                on_increase=on_increase
                                                on_decrease=on_decrease
                                                on_remove=on_remove
                                            />
                                        </div>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </Show>
            </div>

            <Show when=has_items>
                <div class="cart-drawer__footer">
                    <div class="cart-drawer__total">
                        <span>"Total:"</span>
                        <span class="cart-drawer__total-value">{total_label}</span>
                    </div>
                    <div class="cart-drawer__footer-actions">
                        <button
                            class="cart-drawer__clear"
                            on:click=move |_| cart::dispatch(cart, CartAction::Clear)
                        >
                            "🗑️ Limpiar"
                        </button>
                        <button
                            class="cart-drawer__checkout"
                            aria-label="Comprar Ahora"
                            on:click=move |_| on_checkout.run(())
                        >
                            "Comprar Ahora"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
