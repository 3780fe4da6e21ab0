//! Product detail modal with the comment thread.
//!
//! DESIGN
//! ======
//! The modal does not copy the product out of the catalog; it derives the
//! current entry from the shared list signal by the selected id, so a
//! comment landing in the list shows up here without a refetch. Customers
//! write comments; admins moderate them and see a note instead of the
//! form. Mutations go through the REST layer and on success are spliced
//! into the catalog signal.

#[cfg(test)]
#[path = "product_modal_test.rs"]
mod product_modal_test;

use leptos::prelude::*;

use crate::net::oidc::Session;
use crate::state::catalog::{self, CatalogEntry};
use crate::util::dialog;
use crate::util::money::format_price;

/// Comment timestamp trimmed to its date part.
fn comment_date(created_at: Option<&str>) -> String {
    let Some(stamp) = created_at else {
        return String::new();
    };
    stamp.split('T').next().unwrap_or(stamp).to_owned()
}

/// Product detail overlay, shown while `selected` holds a product id.
#[component]
pub fn ProductModal(
    entries: RwSignal<Vec<CatalogEntry>>,
    selected: RwSignal<Option<i64>>,
    is_admin: Memo<bool>,
) -> impl IntoView {
    let session = expect_context::<Session>();

    let current = Memo::new(move |_| {
        selected
            .get()
            .and_then(|id| entries.with(|list| catalog::find(list, id).cloned()))
    });

    let draft = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let notice = RwSignal::new(String::new());

    // Fresh form whenever another product opens.
    Effect::new(move || {
        let _ = selected.get();
        draft.set(String::new());
        notice.set(String::new());
    });

    let close = move |_| selected.set(None);

    let submit_session = session.clone();
    let on_submit = Callback::new(move |()| {
        let content = draft.get_untracked().trim().to_owned();
        if content.is_empty() || submitting.get_untracked() {
            return;
        }
        let Some(product_id) = selected.get_untracked() else {
            return;
        };
        let Some(token) = submit_session.token() else {
            notice.set("Debes iniciar sesión para comentar".to_owned());
            return;
        };
        submitting.set(true);
        notice.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let request = crate::net::types::NewComment { content };
            match crate::net::api::add_comment(product_id, &request, &token).await {
                Ok(comment) => {
                    entries.update(|list| catalog::push_comment(list, product_id, comment));
                    draft.set(String::new());
                }
                Err(_) => notice.set("Error al agregar comentario".to_owned()),
            }
            submitting.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (content, token, product_id);
            submitting.set(false);
        }
    });

    let delete_session = session;
    let on_delete_comment = Callback::new(move |comment_id: i64| {
        if !dialog::confirm("¿Estás seguro de que quieres eliminar este comentario?") {
            return;
        }
        let Some(product_id) = selected.get_untracked() else {
            return;
        };
        let Some(token) = delete_session.token() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::ApiError;
            match crate::net::api::delete_comment(comment_id, &token).await {
                Ok(()) => {
                    entries.update(|list| catalog::remove_comment(list, product_id, comment_id));
                }
                Err(ApiError::NotFound) => notice.set("Comentario no encontrado".to_owned()),
                Err(_) => notice.set("Error al eliminar comentario".to_owned()),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, product_id, comment_id);
        }
    });

    view! {
        <Show when=move || current.get().is_some()>
            <div class="product-modal" on:click=close>
                <div class="product-modal__backdrop"></div>
                <div
                    class="product-modal__content"
                    on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                >
                    <div class="product-modal__header">
                        <h2>{move || current.get().map(|e| e.product.name).unwrap_or_default()}</h2>
                        <button class="product-modal__close" title="Cerrar" on:click=close>
                            "×"
                        </button>
                    </div>

                    <div class="product-modal__detail">
                        <div class="product-modal__media">
                            {move || {
                                match current.get().and_then(|e| e.image_url) {
                                    Some(url) => {
                                        view! { <img class="product-modal__image" src=url/> }
                                            .into_any()
                                    }
                                    None => {
                                        view! {
                                            <div class="product-modal__placeholder">"📷"</div>
                                        }
                                            .into_any()
                                    }
                                }
                            }}
                        </div>
                        <div class="product-modal__info">
                            <p class="product-modal__price">
                                {move || {
                                    current.get().map(|e| format_price(e.product.price)).unwrap_or_default()
                                }}
                            </p>
                            <h4>"Descripción"</h4>
                            <p class="product-modal__description">
                                {move || {
                                    current.get().map(|e| e.product.description).unwrap_or_default()
                                }}
                            </p>
                        </div>
                    </div>

                    <div class="product-modal__comments">
                        <h4>
                            "Comentarios ("
                            {move || current.get().map(|e| e.product.comments.len()).unwrap_or_default()}
                            ")"
                        </h4>

                        <Show when=move || !is_admin.get()>
                            <div class="product-modal__form">
                                <textarea
                                    placeholder="Escribe tu comentario..."
                                    prop:value=move || draft.get()
                                    on:input=move |ev| draft.set(event_target_value(&ev))
                                ></textarea>
                                <button
                                    on:click=move |_| on_submit.run(())
                                    disabled=move || {
                                        submitting.get() || draft.with(|d| d.trim().is_empty())
                                    }
                                >
                                    {move || {
                                        if submitting.get() { "Enviando..." } else { "Agregar Comentario" }
                                    }}
                                </button>
                            </div>
                        </Show>
                        <Show when=move || is_admin.get()>
                            <div class="product-modal__admin-note">
                                <p>
                                    <strong>"Modo Administrador:"</strong>
                                    " Puedes eliminar comentarios inapropiados usando el botón \"Eliminar\"."
                                </p>
                            </div>
                        </Show>
                        <Show when=move || !notice.with(String::is_empty)>
                            <p class="product-modal__notice">{move || notice.get()}</p>
                        </Show>

                        <div class="product-modal__comment-list">
                            {move || {
                                let comments = current
                                    .get()
                                    .map(|e| e.product.comments)
                                    .unwrap_or_default();
                                if comments.is_empty() {
                                    let empty_text = if is_admin.get() {
                                        "No hay comentarios aún."
                                    } else {
                                        "No hay comentarios aún. ¡Sé el primero en comentar!"
                                    };
                                    view! {
                                        <p class="product-modal__no-comments">{empty_text}</p>
                                    }
                                        .into_any()
                                } else {
                                    let admin = is_admin.get();
                                    comments
                                        .into_iter()
                                        .map(|comment| {
                                            let comment_id = comment.id;
                                            view! {
                                                <div class="product-modal__comment">
                                                    <div class="product-modal__comment-head">
                                                        <div>
                                                            <p class="product-modal__comment-author">
                                                                {comment.author}
                                                            </p>
                                                            <p class="product-modal__comment-date">
                                                                {comment_date(comment.created_at.as_deref())}
                                                            </p>
                                                        </div>
                                                        <Show when=move || admin>
                                                            <button
                                                                class="product-modal__comment-delete"
                                                                on:click=move |_| on_delete_comment.run(comment_id)
                                                            >
                                                                "Eliminar"
                                                            </button>
                                                        </Show>
                                                    </div>
                                                    <p class="product-modal__comment-content">
                                                        {comment.content}
                                                    </p>
                                                </div>
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                        .into_any()
                                }
                            }}
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
