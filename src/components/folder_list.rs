//! Folder List Component
//!
//! Renders every folder of the page from the last successful load. The whole list is
//! rebuilt on each load, so rows never carry state over from a previous render.

use leptos::prelude::*;

use super::FolderSection;
use crate::context::use_app_context;
use crate::store::{store_load_error, store_loading, store_revision};

#[component]
pub fn FolderList() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        if let Some(message) = store_load_error(&ctx.store) {
            return view! {
                <div class="load-error">
                    <p>"Could not load this page."</p>
                    <p class="load-error-detail">{message}</p>
                    <button class="retry-btn" on:click=move |_| ctx.reload()>"Retry"</button>
                </div>
            }
            .into_any();
        }
        if store_loading(&ctx.store) {
            return view! { <p class="loading">"Loading..."</p> }.into_any();
        }

        let revision = store_revision(&ctx.store);
        let folders = ctx.folders();
        if folders.is_empty() {
            return view! { <p class="empty-state">"No folders yet. Unlock to add one."</p> }.into_any();
        }
        web_sys::console::log_1(&format!("[APP] Render revision {} ({} folders)", revision, folders.len()).into());

        view! {
            <div class="folder-list">
                {folders
                    .into_iter()
                    .map(|folder| view! { <FolderSection folder=folder /> })
                    .collect_view()}
            </div>
        }
        .into_any()
    }
}
