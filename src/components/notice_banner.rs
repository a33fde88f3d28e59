//! Notice Banner Component
//!
//! Shows the last failed save or rejected edit until dismissed or superseded.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::store_notice;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        store_notice(&ctx.store).map(|message| {
            view! {
                <div class="notice" role="alert">
                    <span class="notice-text">{message}</span>
                    <button class="notice-close" on:click=move |_| ctx.dismiss_notice()>"×"</button>
                </div>
            }
        })
    }
}
