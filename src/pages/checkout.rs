//! Checkout page: order summary, coupon discount, and card capture.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use rust_decimal::Decimal;

use crate::net::oidc::Session;
use crate::net::types::ClientProfile;
use crate::state::cart::CartState;
use crate::state::session::SessionState;
use crate::util::auth;
use crate::util::money::{coupon_discount, format_price};

/// Payment page. Lists the cart, applies the profile's one-shot coupon,
/// and posts the payment. A successful payment clears the cart and spends
/// the coupon.
/// Redirects to `/` if the user is not authenticated.
#[component]
pub fn CheckoutPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let cart = expect_context::<RwSignal<CartState>>();
    let navigate = use_navigate();

    auth::install_unauth_redirect(session.state, navigate);

    let state = session.state;

    let card_number = RwSignal::new(String::new());
    let cardholder_name = RwSignal::new(String::new());
    let expiry_month = RwSignal::new(String::new());
    let expiry_year = RwSignal::new(String::new());
    let direccion = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let message = RwSignal::new(String::new());

    // Client profile row, fetched once per visit; it carries the coupon flag
    // and the row id the payment references.
    let profile = RwSignal::new(None::<ClientProfile>);
    let requested = RwSignal::new(false);
    {
        let session = session.clone();
        Effect::new(move || {
            if !state.with(SessionState::authenticated) || requested.get_untracked() {
                return;
            }
            requested.set(true);
            let Some(token) = session.token() else {
                return;
            };
            let Some(uid) = state.with_untracked(|s| s.user.as_ref().map(|u| u.id.clone()))
            else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                if let Some(found) = crate::net::api::fetch_client_profile(&uid, &token).await {
                    profile.set(Some(found));
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (token, uid);
        });
    }

    let coupon_available = Memo::new(move |_| {
        profile.with(|p| p.as_ref().is_some_and(|p| p.coupon_available))
    });
    let total = Memo::new(move |_| cart.with(CartState::total));
    let discount = Memo::new(move |_| {
        if coupon_available.get() { coupon_discount(total.get()) } else { Decimal::ZERO }
    });
    let payable = Memo::new(move |_| total.get() - discount.get());

    let pay_session = session;
    let on_pay = Callback::new(move |()| {
        if loading.get_untracked() || cart.with_untracked(|c| c.items.is_empty()) {
            return;
        }

        let card = card_number.get_untracked();
        let holder = cardholder_name.get_untracked();
        let month = expiry_month.get_untracked();
        let year = expiry_year.get_untracked();
        let address = direccion.get_untracked();
        if card.trim().is_empty()
            || holder.trim().is_empty()
            || month.trim().is_empty()
            || year.trim().is_empty()
            || address.trim().is_empty()
        {
            message.set("Por favor completa todos los campos".to_owned());
            return;
        }
        let Some(token) = pay_session.token() else {
            return;
        };

        loading.set(true);
        message.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let items = cart.with_untracked(|c| c.items.clone());
            let request = crate::net::types::PaymentRequest {
                card_number: card,
                cardholder_name: holder,
                expiry_month: month,
                expiry_year: year,
                amount: payable.get_untracked(),
                currency: "COP".to_owned(),
                items: crate::net::types::items_payload(&items),
                direccion: address,
                client_data_id: profile.with_untracked(|p| p.as_ref().and_then(|p| p.id)),
                used_coupon: coupon_available.get_untracked(),
            };
            let uid = state.with_untracked(|s| s.user.as_ref().map(|u| u.id.clone()));
            leptos::task::spawn_local(async move {
                match crate::net::api::save_payment(&request, &token).await {
                    Ok(receipt) => {
                        message.set(format!(
                            "Pago realizado con éxito. ID de transacción: {}",
                            receipt.transaction_id
                        ));
                        crate::state::cart::dispatch(cart, crate::state::cart::CartAction::Clear);
                        card_number.set(String::new());
                        cardholder_name.set(String::new());
                        expiry_month.set(String::new());
                        expiry_year.set(String::new());
                        direccion.set(String::new());

                        // The backend records usedCoupon but never clears the
                        // profile flag, so spend it here.
                        if request.used_coupon {
                            if let Some(uid) = uid {
                                let spent =
                                    crate::net::api::toggle_coupon(&uid, false, &token).await;
                                if spent.is_ok() {
                                    profile.update(|p| {
                                        if let Some(p) = p {
                                            p.coupon_available = false;
                                        }
                                    });
                                }
                            }
                        }
                    }
                    Err(_) => message.set("Ocurrió un error al procesar el pago".to_owned()),
                }
                loading.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (card, holder, month, year, address, token, &pay_session);
            loading.set(false);
        }
    });

    view! {
        <Show
            when=move || state.with(SessionState::authenticated)
            fallback=|| view! { <p class="checkout-page__redirect">"Redirecting to login..."</p> }
        >
            <div class="checkout-page">
                <h1>"Pago"</h1>

                <section class="checkout-page__items">
                    <h2>"Items del carrito"</h2>
                    {move || {
                        let items = cart.with(|c| c.items.clone());
                        if items.is_empty() {
                            view! {
                                <p class="checkout-page__empty">"El carrito está vacío"</p>
                            }
                                .into_any()
                        } else {
                            view! {
                                <ul class="checkout-page__lines">
                                    {items
                                        .into_iter()
                                        .map(|item| {
                                            let line_total = item.price
                                                * Decimal::from(item.quantity);
                                            view! {
                                                <li>
                                                    <span>{item.name} " x" {item.quantity}</span>
                                                    <span>{format_price(line_total)}</span>
                                                </li>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </ul>
                            }
                                .into_any()
                        }
                    }}
                    <Show when=move || { discount.get() > Decimal::ZERO }>
                        <p class="checkout-page__discount">
                            "Descuento aplicado: -" {move || format_price(discount.get())}
                        </p>
                    </Show>
                    <p class="checkout-page__total">
                        "Total: " {move || format_price(payable.get())}
                    </p>
                </section>

                <div class="checkout-page__form">
                    <label>
                        "Dirección"
                        <input
                            type="text"
                            placeholder="Ingresa tu dirección"
                            prop:value=move || direccion.get()
                            on:input=move |ev| direccion.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Número de tarjeta"
                        <input
                            type="text"
                            placeholder="XXXX XXXX XXXX XXXX"
                            prop:value=move || card_number.get()
                            on:input=move |ev| card_number.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Nombre del titular"
                        <input
                            type="text"
                            placeholder="Nombre como aparece en la tarjeta"
                            prop:value=move || cardholder_name.get()
                            on:input=move |ev| cardholder_name.set(event_target_value(&ev))
                        />
                    </label>
                    <div class="checkout-page__expiry">
                        <label>
                            "Mes"
                            <input
                                type="text"
                                placeholder="MM"
                                prop:value=move || expiry_month.get()
                                on:input=move |ev| expiry_month.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Año"
                            <input
                                type="text"
                                placeholder="YYYY"
                                prop:value=move || expiry_year.get()
                                on:input=move |ev| expiry_year.set(event_target_value(&ev))
                            />
                        </label>
                    </div>
                </div>

                <button
                    class="checkout-page__pay"
                    disabled=move || loading.get() || cart.with(|c| c.items.is_empty())
                    on:click=move |_| on_pay.run(())
                >
                    {move || if loading.get() { "Procesando..." } else { "Pagar Ahora" }}
                </button>

                <Show when=move || !message.with(String::is_empty)>
                    <p class="checkout-page__message">{move || message.get()}</p>
                </Show>
            </div>
        </Show>
    }
}
