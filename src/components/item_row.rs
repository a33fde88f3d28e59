//! Item Row Component
//!
//! One item of a folder: drag handle, name, and the control for its kind.

use leptos::prelude::*;
use leptos_dragdrop::{HoldDrag, ROW_CLASS};
use wasm_bindgen::JsCast;

use super::{DeleteConfirmButton, KindSelector, StatusBar};
use crate::context::use_app_context;
use crate::models::{FolderId, Item, ItemKind, Payload};

/// Parse a typed quantity. Anything that is not a non-negative number becomes 0.
pub fn parse_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.floor().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Parse a typed length in feet. Blank or invalid input clears it.
pub fn parse_length(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => None,
    }
}

fn format_length(len: Option<f64>) -> String {
    len.map(|v| v.to_string()).unwrap_or_default()
}

fn input_of(ev: &web_sys::Event) -> Option<web_sys::HtmlInputElement> {
    ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
}

#[component]
pub fn ItemRow(folder_id: FolderId, list_key: String, index: usize, item: Item) -> impl IntoView {
    let ctx = use_app_context();
    let name = item.name.clone();
    let kind = item.kind();

    let rename = {
        let folder_id = folder_id.clone();
        let current = name.clone();
        move |ev: web_sys::Event| {
            let Some(input) = input_of(&ev) else {
                return;
            };
            let new_name = input.value();
            if new_name.trim().is_empty() || new_name.trim() == current {
                input.set_value(&current);
                return;
            }
            ctx.mutate_folder(&folder_id, "rename item", move |applier, folder| async move {
                applier.rename_item(&folder, index, &new_name).await
            });
        }
    };

    let delete = {
        let folder_id = folder_id.clone();
        move |_: ()| {
            ctx.mutate_folder(&folder_id, "delete item", move |applier, folder| async move {
                applier.delete_item(&folder, index).await
            });
        }
    };

    let change_kind = {
        let folder_id = folder_id.clone();
        move |next: ItemKind| {
            ctx.mutate_folder(&folder_id, "change kind", move |applier, folder| async move {
                applier.set_kind(&folder, index, next).await
            });
        }
    };

    let control = match item.payload {
        Payload::Quantity { qty } => {
            let step = |delta: i64| {
                let folder_id = folder_id.clone();
                move |_: web_sys::MouseEvent| {
                    ctx.mutate_folder(&folder_id, "update quantity", move |applier, folder| async move {
                        applier.adjust_quantity(&folder, index, delta).await
                    });
                }
            };
            let set = {
                let folder_id = folder_id.clone();
                move |ev: web_sys::Event| {
                    let Some(input) = input_of(&ev) else {
                        return;
                    };
                    let value = parse_quantity(&input.value());
                    if value == qty {
                        input.set_value(&qty.to_string());
                        return;
                    }
                    ctx.mutate_folder(&folder_id, "update quantity", move |applier, folder| async move {
                        applier.set_quantity(&folder, index, value).await
                    });
                }
            };
            view! {
                <div class="qty-control">
                    <button class="qty-btn" title="Decrease" on:click=step(-1)>"−"</button>
                    <input class="qty-input" type="number" min="0" step="1" prop:value=qty.to_string() on:change=set />
                    <button class="qty-btn" title="Increase" on:click=step(1)>"+"</button>
                </div>
            }
            .into_any()
        }
        Payload::Status { status } => {
            view! { <StatusBar folder_id=folder_id.clone() index=index current=status /> }.into_any()
        }
        Payload::Length { len } => {
            let set = {
                let folder_id = folder_id.clone();
                move |ev: web_sys::Event| {
                    let Some(input) = input_of(&ev) else {
                        return;
                    };
                    let value = parse_length(&input.value());
                    if value == len {
                        input.set_value(&format_length(len));
                        return;
                    }
                    ctx.mutate_folder(&folder_id, "update length", move |applier, folder| async move {
                        applier.set_length(&folder, index, value).await
                    });
                }
            };
            view! {
                <div class="len-control">
                    <input
                        class="len-input"
                        type="number"
                        min="0"
                        step="0.1"
                        placeholder="—"
                        prop:value=format_length(len)
                        on:change=set
                    />
                    <span class="len-unit">"ft"</span>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div class=ROW_CLASS data-index=index>
            <Show when=move || !ctx.locked()>
                <DragHandle list_key=list_key.clone() index=index />
            </Show>
            {
                let name = name.clone();
                move || {
                    if ctx.locked() {
                        view! { <span class="item-name">{name.clone()}</span> }.into_any()
                    } else {
                        view! {
                            <input class="item-name-input" type="text" prop:value=name.clone() on:change=rename.clone() />
                        }
                        .into_any()
                    }
                }
            }
            <div class="item-control">{control}</div>
            <Show when=move || !ctx.locked()>
                <KindSelector current=kind on_change=change_kind.clone() />
                <DeleteConfirmButton button_class="delete-btn" title="Delete item" on_confirm=delete.clone() />
            </Show>
        </div>
    }
}

/// Press-and-hold handle. Unmounting it abandons any gesture it started.
#[component]
fn DragHandle(list_key: String, index: usize) -> impl IntoView {
    let dnd = expect_context::<HoldDrag>();
    let handle = dnd.register_handle();
    on_cleanup(move || dnd.release_handle(handle));

    view! {
        <span
            class="drag-handle"
            class:dragging=move || dnd.is_dragging(handle)
            title="Hold to drag"
            on:pointerdown=move |ev: web_sys::PointerEvent| dnd.press(handle, &list_key, index, &ev)
        >
            "⋮⋮"
        </span>
    }
}
