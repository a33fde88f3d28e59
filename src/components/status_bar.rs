//! Status Bar Component
//!
//! Four-segment fill gauge. Clicking the lit segment turns it off.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::{FolderId, Status};

#[component]
pub fn StatusBar(folder_id: FolderId, index: usize, current: Option<Status>) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="status-bar">
            {Status::ALL
                .iter()
                .map(|&status| {
                    let folder_id = folder_id.clone();
                    let active = current == Some(status);
                    view! {
                        <button
                            class=format!("status-btn status-{}{}", status.as_str(), if active { " active" } else { "" })
                            title=status.label()
                            on:click=move |_| {
                                ctx.mutate_folder(&folder_id, "update status", move |applier, folder| async move {
                                    applier.toggle_status(&folder, index, status).await
                                });
                            }
                        >
                            {status.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
