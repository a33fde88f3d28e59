//! Document Commands
//!
//! Tauri commands for the page document store. Errors cross the IPC boundary as strings.

use serde_json::{Map, Value};
use tauri::State;

use packout_core::{Documents, Item, WriteMode};

use crate::repository::DocumentRepository;
use crate::AppState;

fn repo(state: &AppState) -> DocumentRepository {
    DocumentRepository::new(state.db_state.conn.clone())
}

#[tauri::command]
pub async fn list_documents(collection: String, state: State<'_, AppState>) -> Result<Documents, String> {
    repo(&state).list(&collection).await.map_err(|e| {
        tracing::error!(%collection, error = %e, "list_documents failed");
        e.to_string()
    })
}

#[tauri::command]
pub async fn upsert_document(
    collection: String,
    doc_id: String,
    fields: Map<String, Value>,
    mode: WriteMode,
    state: State<'_, AppState>,
) -> Result<(), String> {
    repo(&state)
        .upsert(&collection, &doc_id, fields, mode)
        .await
        .map_err(|e| {
            tracing::error!(%collection, %doc_id, error = %e, "upsert_document failed");
            e.to_string()
        })
}

#[tauri::command]
pub async fn replace_items(
    collection: String,
    doc_id: String,
    items: Vec<Item>,
    state: State<'_, AppState>,
) -> Result<(), String> {
    repo(&state)
        .replace_items(&collection, &doc_id, &items)
        .await
        .map_err(|e| {
            tracing::error!(%collection, %doc_id, error = %e, "replace_items failed");
            e.to_string()
        })
}

#[tauri::command]
pub async fn remove_document(collection: String, doc_id: String, state: State<'_, AppState>) -> Result<(), String> {
    repo(&state).remove(&collection, &doc_id).await.map_err(|e| {
        tracing::error!(%collection, %doc_id, error = %e, "remove_document failed");
        e.to_string()
    })
}
