//! Document Repository
//!
//! Collections of JSON documents in one `documents` table. Bodies are stored as
//! serialized JSON; merge semantics are applied here, under the connection lock.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use packout_core::store::{apply_write, items_to_value};
use packout_core::{DocumentStore, Documents, Item, StoreError, WriteMode};

use crate::domain::{DomainError, DomainResult, StoredDocument};

pub struct DocumentRepository {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl DocumentRepository {
    pub fn new(conn: Arc<Mutex<Option<Connection>>>) -> Self {
        Self { conn }
    }

    /// All documents of a collection, keyed by document id.
    pub async fn list(&self, collection: &str) -> DomainResult<Documents> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(not_initialized())?;

        let mut stmt = conn.prepare("SELECT doc_id, body FROM documents WHERE collection = ? ORDER BY doc_id")?;
        let rows = stmt.query_map(params![collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut docs = Documents::new();
        for row in rows {
            let (doc_id, body) = row?;
            let body: Value = serde_json::from_str(&body)
                .map_err(|e| DomainError::Internal(format!("Corrupt document {}/{}: {}", collection, doc_id, e)))?;
            docs.insert(doc_id, body);
        }
        Ok(docs)
    }

    #[cfg(test)]
    pub async fn get(&self, collection: &str, doc_id: &str) -> DomainResult<Option<StoredDocument>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(not_initialized())?;

        let row = conn
            .query_row(
                "SELECT body, updated_at FROM documents WHERE collection = ? AND doc_id = ?",
                params![collection, doc_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        match row {
            Some((body, updated_at)) => Ok(Some(StoredDocument {
                collection: collection.to_string(),
                doc_id: doc_id.to_string(),
                body: serde_json::from_str(&body)?,
                updated_at,
            })),
            None => Ok(None),
        }
    }

    /// Write `fields`, creating the document if absent.
    pub async fn upsert(
        &self,
        collection: &str,
        doc_id: &str,
        fields: Map<String, Value>,
        mode: WriteMode,
    ) -> DomainResult<()> {
        validate_key(collection, doc_id)?;
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(not_initialized())?;

        let mut body = read_body(conn, collection, doc_id)?.unwrap_or_else(|| Value::Object(Map::new()));
        apply_write(&mut body, fields, mode);
        write_body(conn, &StoredDocument::new(collection, doc_id, body))?;
        tracing::debug!(collection, doc_id, ?mode, "upsert document");
        Ok(())
    }

    /// Overwrite the `items` field, creating `{"items": [...]}` if the document is absent.
    pub async fn replace_items(&self, collection: &str, doc_id: &str, items: &[Item]) -> DomainResult<()> {
        validate_key(collection, doc_id)?;
        let items = items_to_value(items).map_err(|e| DomainError::InvalidInput(e.to_string()))?;

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(not_initialized())?;

        let mut fields = Map::new();
        fields.insert("items".to_string(), items);
        let mut body = read_body(conn, collection, doc_id)?.unwrap_or_else(|| Value::Object(Map::new()));
        apply_write(&mut body, fields, WriteMode::Merge);
        write_body(conn, &StoredDocument::new(collection, doc_id, body))?;
        tracing::debug!(collection, doc_id, "replace items");
        Ok(())
    }

    /// Delete a document. Removing a missing document is not an error.
    pub async fn remove(&self, collection: &str, doc_id: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(not_initialized())?;

        let removed = conn.execute(
            "DELETE FROM documents WHERE collection = ? AND doc_id = ?",
            params![collection, doc_id],
        )?;
        if removed == 0 {
            tracing::warn!(collection, doc_id, "remove: no such document");
        } else {
            tracing::debug!(collection, doc_id, "remove document");
        }
        Ok(())
    }
}

fn not_initialized() -> DomainError {
    DomainError::Internal("Database not initialized".to_string())
}

fn validate_key(collection: &str, doc_id: &str) -> DomainResult<()> {
    if collection.trim().is_empty() {
        return Err(DomainError::InvalidInput("empty collection name".into()));
    }
    if doc_id.trim().is_empty() {
        return Err(DomainError::InvalidInput("empty document id".into()));
    }
    Ok(())
}

fn read_body(conn: &Connection, collection: &str, doc_id: &str) -> DomainResult<Option<Value>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM documents WHERE collection = ? AND doc_id = ?",
            params![collection, doc_id],
            |row| row.get(0),
        )
        .optional()?;
    match body {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

fn write_body(conn: &Connection, doc: &StoredDocument) -> DomainResult<()> {
    let body = serde_json::to_string(&doc.body)?;
    conn.execute(
        "INSERT INTO documents (collection, doc_id, body, updated_at) VALUES (?, ?, ?, ?)
         ON CONFLICT(collection, doc_id) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
        params![doc.collection, doc.doc_id, body, doc.updated_at],
    )?;
    Ok(())
}

/// Lets the mutation protocol run directly against SQLite.
#[async_trait(?Send)]
impl DocumentStore for DocumentRepository {
    async fn list_all(&self, collection: &str) -> Result<Documents, StoreError> {
        self.list(collection).await.map_err(store_error)
    }

    async fn upsert(
        &self,
        collection: &str,
        doc_id: &str,
        fields: Map<String, Value>,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        DocumentRepository::upsert(self, collection, doc_id, fields, mode)
            .await
            .map_err(store_error)
    }

    async fn replace_items(&self, collection: &str, doc_id: &str, items: &[Item]) -> Result<(), StoreError> {
        DocumentRepository::replace_items(self, collection, doc_id, items)
            .await
            .map_err(store_error)
    }

    async fn remove(&self, collection: &str, doc_id: &str) -> Result<(), StoreError> {
        DocumentRepository::remove(self, collection, doc_id)
            .await
            .map_err(store_error)
    }
}

fn store_error(e: DomainError) -> StoreError {
    StoreError::new(e.to_string())
}
