//! Document Commands
//!
//! Frontend bindings for the document store, plus the [`DocumentStore`] adapter the
//! mutation applier writes through.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use packout_core::{DocumentStore, Documents, Item, StoreError, WriteMode};

use super::{invoke, js_error, to_args};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CollectionArgs<'a> {
    collection: &'a str,
}

#[derive(Serialize)]
struct DocArgs<'a> {
    collection: &'a str,
    #[serde(rename = "docId")]
    doc_id: &'a str,
}

#[derive(Serialize)]
struct UpsertArgs<'a> {
    collection: &'a str,
    #[serde(rename = "docId")]
    doc_id: &'a str,
    fields: &'a Map<String, Value>,
    mode: WriteMode,
}

#[derive(Serialize)]
struct ReplaceItemsArgs<'a> {
    collection: &'a str,
    #[serde(rename = "docId")]
    doc_id: &'a str,
    items: &'a [Item],
}

// ========================
// Commands
// ========================

pub async fn list_documents(collection: &str) -> Result<Documents, String> {
    let js_args = to_args(&CollectionArgs { collection })?;
    let result = invoke("list_documents", js_args).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn upsert_document(
    collection: &str,
    doc_id: &str,
    fields: &Map<String, Value>,
    mode: WriteMode,
) -> Result<(), String> {
    let js_args = to_args(&UpsertArgs { collection, doc_id, fields, mode })?;
    invoke("upsert_document", js_args).await.map_err(js_error)?;
    Ok(())
}

pub async fn replace_items(collection: &str, doc_id: &str, items: &[Item]) -> Result<(), String> {
    let js_args = to_args(&ReplaceItemsArgs { collection, doc_id, items })?;
    invoke("replace_items", js_args).await.map_err(js_error)?;
    Ok(())
}

pub async fn remove_document(collection: &str, doc_id: &str) -> Result<(), String> {
    let js_args = to_args(&DocArgs { collection, doc_id })?;
    invoke("remove_document", js_args).await.map_err(js_error)?;
    Ok(())
}

// ========================
// Store adapter
// ========================

fn store_error(op: &'static str) -> impl Fn(String) -> StoreError {
    move |e| {
        web_sys::console::error_1(&format!("[STORE] {} failed: {}", op, e).into());
        StoreError::from(e)
    }
}

/// Document store backed by the Tauri host.
#[derive(Clone, Copy, Debug, Default)]
pub struct TauriDocumentStore;

#[async_trait(?Send)]
impl DocumentStore for TauriDocumentStore {
    async fn list_all(&self, collection: &str) -> Result<Documents, StoreError> {
        list_documents(collection).await.map_err(store_error("list_documents"))
    }

    async fn upsert(
        &self,
        collection: &str,
        doc_id: &str,
        fields: Map<String, Value>,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        upsert_document(collection, doc_id, &fields, mode).await.map_err(store_error("upsert_document"))
    }

    async fn replace_items(&self, collection: &str, doc_id: &str, items: &[Item]) -> Result<(), StoreError> {
        replace_items(collection, doc_id, items).await.map_err(store_error("replace_items"))
    }

    async fn remove(&self, collection: &str, doc_id: &str) -> Result<(), StoreError> {
        remove_document(collection, doc_id).await.map_err(store_error("remove_document"))
    }
}
