//! Stored Document
//!
//! One row of the `documents` table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub collection: String,
    pub doc_id: String,
    pub body: Value,
    /// Milliseconds since the epoch, local clock
    pub updated_at: i64,
}

impl StoredDocument {
    pub fn new(collection: impl Into<String>, doc_id: impl Into<String>, body: Value) -> Self {
        Self {
            collection: collection.into(),
            doc_id: doc_id.into(),
            body,
            updated_at: chrono::Local::now().timestamp_millis(),
        }
    }
}
