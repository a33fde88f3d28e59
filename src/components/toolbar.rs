//! Toolbar Component
//!
//! Page title, lock toggle, folder creation and export.

use leptos::prelude::*;
use leptos_dragdrop::HoldDrag;

use super::NewFolderForm;
use crate::context::use_app_context;
use crate::export::download_json;

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_app_context();
    let dnd = expect_context::<HoldDrag>();
    let title = ctx.page().title;

    let toggle_lock = move |_| {
        let locking = !ctx.locked_untracked();
        if locking {
            dnd.cancel();
        }
        web_sys::console::log_1(&format!("[APP] {}", if locking { "Locked" } else { "Unlocked" }).into());
        ctx.set_locked(locking);
    };

    let export = move |_| {
        let page = ctx.page().key;
        if let Err(e) = download_json(&page, &ctx.folders_untracked()) {
            web_sys::console::error_1(&format!("[APP] Export failed: {}", e).into());
            ctx.notify(format!("Could not export: {}", e));
        }
    };

    view! {
        <header class="toolbar">
            <h1 class="page-title">{title}</h1>
            <div class="toolbar-actions">
                <Show when=move || !ctx.locked()>
                    <NewFolderForm />
                </Show>
                <button class="export-btn" on:click=export>"Download JSON"</button>
                <button
                    class=move || if ctx.locked() { "lock-btn locked" } else { "lock-btn" }
                    title=move || if ctx.locked() { "Unlock editing" } else { "Lock editing" }
                    on:click=toggle_lock
                >
                    {move || if ctx.locked() { "🔒 Locked" } else { "🔓 Editing" }}
                </button>
            </div>
        </header>
    }
}
