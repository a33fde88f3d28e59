//! Packout Frontend App
//!
//! Root component: owns the store, the drag controller and the load loop.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{Dropped, HoldDrag, HoldDragConfig};

use crate::components::{FolderList, NoticeBanner, Toolbar};
use crate::config::PageConfig;
use crate::context::AppContext;
use crate::models::{DropOutcome, FolderId};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let page = PageConfig::from_location();
    let store = reactive_stores::Store::new(AppState::new());

    let ctx = AppContext::new(store, page.clone(), signal(0u32));
    provide_context(ctx);

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&page.title);
    }

    // Reorder commits: the list key is the folder id
    let dnd = HoldDrag::new(HoldDragConfig::default(), move |list_key: String, dropped: Dropped| {
        let outcome = DropOutcome { source: dropped.source, target: dropped.target };
        ctx.mutate_folder(&FolderId::from_stored(list_key), "reorder items", move |applier, folder| async move {
            applier.reorder(&folder, outcome).await
        });
    });
    provide_context(dnd);

    // Load on mount and whenever a reload is requested
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        web_sys::console::log_1(&format!("[APP] Loading page {}, trigger={}", ctx.page().key, trigger).into());
        spawn_local(async move {
            ctx.load().await;
        });
    });

    view! {
        <div class="app-layout">
            <Toolbar />
            <NoticeBanner />
            <main class="main-content">
                <FolderList />
            </main>
        </div>
    }
}
