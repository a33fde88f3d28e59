//! Document Store
//!
//! Abstract interface to the remote document store: one collection per page,
//! one document per folder. Implementations may fail on any call; failures are
//! returned, never swallowed.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::item::Item;

/// Collection listing: document id -> raw body.
pub type Documents = BTreeMap<String, Value>;

/// How `upsert` treats fields already on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Overlay the given top-level fields, keep the rest.
    Merge,
    /// Discard the previous body entirely.
    Replace,
}

/// Async CRUD over named collections.
///
/// Futures are not required to be `Send`: the browser implementation holds JS values.
#[async_trait(?Send)]
pub trait DocumentStore {
    async fn list_all(&self, collection: &str) -> Result<Documents, StoreError>;

    /// Write `fields` to the document, creating it if absent.
    async fn upsert(
        &self,
        collection: &str,
        doc_id: &str,
        fields: Map<String, Value>,
        mode: WriteMode,
    ) -> Result<(), StoreError>;

    /// Overwrite the document's whole `items` sequence.
    async fn replace_items(&self, collection: &str, doc_id: &str, items: &[Item]) -> Result<(), StoreError>;

    async fn remove(&self, collection: &str, doc_id: &str) -> Result<(), StoreError>;
}

#[async_trait(?Send)]
impl<'a, S: DocumentStore + ?Sized> DocumentStore for &'a S {
    async fn list_all(&self, collection: &str) -> Result<Documents, StoreError> {
        (**self).list_all(collection).await
    }

    async fn upsert(
        &self,
        collection: &str,
        doc_id: &str,
        fields: Map<String, Value>,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        (**self).upsert(collection, doc_id, fields, mode).await
    }

    async fn replace_items(&self, collection: &str, doc_id: &str, items: &[Item]) -> Result<(), StoreError> {
        (**self).replace_items(collection, doc_id, items).await
    }

    async fn remove(&self, collection: &str, doc_id: &str) -> Result<(), StoreError> {
        (**self).remove(collection, doc_id).await
    }
}

/// Serialize items into the persisted array form.
pub fn items_to_value(items: &[Item]) -> Result<Value, StoreError> {
    serde_json::to_value(items).map_err(|e| StoreError::new(format!("encode items: {}", e)))
}

/// Merge `fields` into `body` according to `mode`.
pub fn apply_write(body: &mut Value, fields: Map<String, Value>, mode: WriteMode) {
    match (mode, body.as_object_mut()) {
        (WriteMode::Merge, Some(existing)) => existing.extend(fields),
        _ => *body = Value::Object(fields),
    }
}

/// In-process store with failure injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RefCell<BTreeMap<String, Documents>>,
    fail_writes: Cell<bool>,
    fail_reads: Cell<bool>,
    write_attempts: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail until turned off again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Number of write calls received, successful or not.
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.get()
    }

    /// Raw body of a document, for inspection.
    pub fn document(&self, collection: &str, doc_id: &str) -> Option<Value> {
        self.collections.borrow().get(collection)?.get(doc_id).cloned()
    }

    /// Seed a document without counting it as a write.
    pub fn insert_raw(&self, collection: &str, doc_id: &str, body: Value) {
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .insert(doc_id.to_string(), body);
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        self.write_attempts.set(self.write_attempts.get() + 1);
        if self.fail_writes.get() {
            return Err(StoreError::new("permission denied"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn list_all(&self, collection: &str) -> Result<Documents, StoreError> {
        if self.fail_reads.get() {
            return Err(StoreError::new("network unreachable"));
        }
        Ok(self.collections.borrow().get(collection).cloned().unwrap_or_default())
    }

    async fn upsert(
        &self,
        collection: &str,
        doc_id: &str,
        fields: Map<String, Value>,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        self.begin_write()?;
        let mut collections = self.collections.borrow_mut();
        let body = collections
            .entry(collection.to_string())
            .or_default()
            .entry(doc_id.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        apply_write(body, fields, mode);
        Ok(())
    }

    async fn replace_items(&self, collection: &str, doc_id: &str, items: &[Item]) -> Result<(), StoreError> {
        self.begin_write()?;
        let value = items_to_value(items)?;
        let mut fields = Map::new();
        fields.insert("items".to_string(), value);

        let mut collections = self.collections.borrow_mut();
        let body = collections
            .entry(collection.to_string())
            .or_default()
            .entry(doc_id.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        apply_write(body, fields, WriteMode::Merge);
        Ok(())
    }

    async fn remove(&self, collection: &str, doc_id: &str) -> Result<(), StoreError> {
        self.begin_write()?;
        if let Some(docs) = self.collections.borrow_mut().get_mut(collection) {
            docs.remove(doc_id);
        }
        Ok(())
    }
}
