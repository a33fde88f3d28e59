//! Packout Backend
//!
//! Layered architecture:
//! - domain: Stored documents and errors
//! - repository: SQLite document storage
//! - commands: Tauri command handlers

use std::path::PathBuf;

use tauri::Manager;
use tracing_subscriber::EnvFilter;

mod commands;
mod domain;
mod repository;

use repository::{init_db, DbState};

const DB_FILE: &str = "packout.db";
const DEFAULT_LOG_FILTER: &str = "info,packout=debug,packout_lib=debug,packout_core=debug";

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
}

/// Get database path from app handle
fn get_db_path(app_handle: &tauri::AppHandle) -> Result<PathBuf, String> {
    let app_dir = app_handle
        .path()
        .app_data_dir()
        .map_err(|e| format!("Failed to resolve app data dir: {}", e))?;
    Ok(app_dir.join(DB_FILE))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_logging();

    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let db_path = get_db_path(app.handle())?;
            tracing::info!(path = %db_path.display(), "opening database");

            // Commands assume an open connection
            let db_state = tauri::async_runtime::block_on(init_db(&db_path)).map_err(|e| {
                tracing::error!(error = %e, "database init failed");
                e.to_string()
            })?;

            app.manage(AppState { db_state });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::list_documents,
            commands::upsert_document,
            commands::replace_items,
            commands::remove_document,
        ])
        .run(tauri::generate_context!())
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "error while running tauri application");
            std::process::exit(1);
        });
}
