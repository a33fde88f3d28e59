//! Folder Section Component
//!
//! One collapsible folder: header with caret, name and controls, then its item rows.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use super::{DeleteConfirmButton, ItemRow, NewItemForm};
use crate::context::use_app_context;
use crate::models::{folder_id, Folder};

#[component]
pub fn FolderSection(folder: Folder) -> impl IntoView {
    let ctx = use_app_context();
    let collapse = ctx.collapse_store();

    let id = folder.id.clone();
    let name = folder.name.clone();
    let count = folder.items.len();
    let (collapsed, set_collapsed) = signal(collapse.get(id.as_str()));

    let toggle_collapsed = {
        let id = id.clone();
        let collapse = collapse.clone();
        move |_| {
            let next = !collapsed.get_untracked();
            collapse.set(id.as_str(), next);
            set_collapsed.set(next);
        }
    };

    let rename = {
        let id = id.clone();
        let current = name.clone();
        move |ev: web_sys::Event| {
            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let new_name = input.value();
            if new_name.trim().is_empty() || new_name.trim() == current {
                input.set_value(&current);
                return;
            }
            let id = id.clone();
            let collapse = collapse.clone();
            ctx.mutate("rename folder", move |applier, folders| async move {
                let result = applier.rename_folder(&folders, &id, &new_name).await;
                if let (Ok(_), Ok(new_id)) = (&result, folder_id(&new_name)) {
                    if new_id != id {
                        collapse.rename(id.as_str(), new_id.as_str());
                    }
                }
                result
            });
        }
    };

    let delete = {
        let id = id.clone();
        move |_: ()| {
            let id = id.clone();
            ctx.mutate("delete folder", move |applier, _folders| async move {
                applier.delete_folder(&id).await
            });
        }
    };

    let list_key = id.to_string();
    let form_folder = id.clone();
    let rows = folder
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            view! { <ItemRow folder_id=id.clone() list_key=list_key.clone() index=index item=item /> }
        })
        .collect_view();

    view! {
        <section class="folder" data-folder=list_key.clone()>
            <header class="folder-header">
                <button
                    class="caret-btn"
                    title=move || if collapsed.get() { "Expand" } else { "Collapse" }
                    on:click=toggle_collapsed
                >
                    {move || if collapsed.get() { "▶" } else { "▼" }}
                </button>
                {
                    let name = name.clone();
                    move || {
                        if ctx.locked() {
                            view! { <h2 class="folder-name">{name.clone()}</h2> }.into_any()
                        } else {
                            view! {
                                <input
                                    class="folder-name-input"
                                    type="text"
                                    prop:value=name.clone()
                                    on:change=rename.clone()
                                />
                            }
                            .into_any()
                        }
                    }
                }
                <span class="folder-count">{count}</span>
                <Show when=move || !ctx.locked()>
                    <DeleteConfirmButton
                        button_class="folder-delete-btn"
                        title="Delete folder"
                        on_confirm=delete.clone()
                    />
                </Show>
            </header>
            <div class="folder-body" class:collapsed=move || collapsed.get()>
                <div class="folder-items">{rows}</div>
                <Show when=move || !ctx.locked()>
                    <NewItemForm folder_id=form_folder.clone() />
                </Show>
            </div>
        </section>
    }
}
