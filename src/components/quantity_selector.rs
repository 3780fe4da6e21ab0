//! Quantity stepper used by cart line items.

use leptos::prelude::*;

/// Decrease / count / increase stepper with an optional remove button.
/// Decrease is disabled at one; removal happens through `on_remove`.
#[component]
pub fn QuantitySelector(
    quantity: i64,
    on_increase: Callback<()>,
    on_decrease: Callback<()>,
    #[prop(optional)] on_remove: Option<Callback<()>>,
) -> impl IntoView {
    let on_remove_click = Callback::new(move |()| {
        if let Some(on_remove) = on_remove.as_ref() {
            on_remove.run(());
        }
    });

    view! {
        <div class="quantity-selector">
            <button
                class="quantity-selector__step"
                on:click=move |_| on_decrease.run(())
                disabled=quantity <= 1
            >
                "-"
            </button>
            <span class="quantity-selector__count">{quantity}</span>
            <button class="quantity-selector__step" on:click=move |_| on_increase.run(())>
                "+"
            </button>
            <Show when=move || on_remove.is_some()>
                <button
                    class="quantity-selector__remove"
                    on:click=move |_| on_remove_click.run(())
                >
                    "Eliminar"
                </button>
            </Show>
        </div>
    }
}
