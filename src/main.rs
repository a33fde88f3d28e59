//! Packout Frontend Entry Point

mod models;
mod config;
mod commands;
mod collapse;
mod context;
mod store;
mod export;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
