//! Kind Selector Component
//!
//! Switches an item between quantity, status and length tracking.

use leptos::prelude::*;

use crate::models::ItemKind;

fn kind_label(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Quantity => "#",
        ItemKind::Status => "◔",
        ItemKind::Length => "ft",
    }
}

#[component]
pub fn KindSelector(current: ItemKind, #[prop(into)] on_change: Callback<ItemKind>) -> impl IntoView {
    view! {
        <div class="kind-selector">
            {ItemKind::ALL
                .iter()
                .map(|&kind| {
                    view! {
                        <button
                            class=if kind == current { "kind-btn active" } else { "kind-btn" }
                            title=kind.as_str()
                            on:click=move |_| on_change.run(kind)
                        >
                            {kind_label(kind)}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
