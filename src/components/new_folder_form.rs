//! New Folder Form Component

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;

#[component]
pub fn NewFolderForm() -> impl IntoView {
    let ctx = use_app_context();
    let (new_name, set_new_name) = signal(String::new());

    let create_folder = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get_untracked();
        if name.trim().is_empty() {
            return;
        }
        set_new_name.set(String::new());
        ctx.mutate("add folder", move |applier, folders| async move {
            applier.add_folder(&folders, &name).await
        });
    };

    view! {
        <form class="new-folder-form" on:submit=create_folder>
            <input
                type="text"
                placeholder="New folder..."
                prop:value=move || new_name.get()
                on:input=move |ev| {
                    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                        set_new_name.set(input.value());
                    }
                }
            />
            <button type="submit">"Add folder"</button>
        </form>
    }
}
