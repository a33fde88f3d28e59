//! New Item Form Component
//!
//! Appends an item to a folder, with the kind picked up front.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use super::KindSelector;
use crate::context::use_app_context;
use crate::models::{FolderId, ItemKind};

#[component]
pub fn NewItemForm(folder_id: FolderId) -> impl IntoView {
    let ctx = use_app_context();

    let (new_name, set_new_name) = signal(String::new());
    let (kind, set_kind) = signal(ItemKind::default());

    let create_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get_untracked();
        if name.trim().is_empty() {
            return;
        }
        let kind = kind.get_untracked();
        ctx.mutate_folder(&folder_id, "add item", move |applier, folder| async move {
            applier.add_item(&folder, &name, kind).await
        });
    };

    view! {
        <form class="new-item-form" on:submit=create_item>
            <input
                type="text"
                placeholder="Add item..."
                prop:value=move || new_name.get()
                on:input=move |ev| {
                    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                        set_new_name.set(input.value());
                    }
                }
            />
            {move || view! { <KindSelector current=kind.get() on_change=move |k: ItemKind| set_kind.set(k) /> }}
            <button type="submit">"Add"</button>
        </form>
    }
}
