//! Error Types

use thiserror::Error;

/// Failure reported by a document store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl From<String> for StoreError {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

pub type PackoutResult<T> = Result<T, PackoutError>;

#[derive(Debug, Error)]
pub enum PackoutError {
    /// A write was rejected; the remote state did not take the change.
    #[error("save failed: {0}")]
    Store(#[source] StoreError),

    /// Listing the collection failed; nothing authoritative to show.
    #[error("load failed: {0}")]
    Load(#[source] StoreError),

    #[error("malformed document {doc_id}: {source}")]
    Decode {
        doc_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("a folder named {name:?} already exists (id {id})")]
    DuplicateFolder { id: String, name: String },

    #[error("folder name {0:?} has no usable characters")]
    InvalidName(String),

    #[error("folder {0} not found")]
    FolderNotFound(String),

    #[error("index {index} out of range for {len} items")]
    ItemOutOfRange { index: usize, len: usize },

    #[error("item {index} is not a {expected} item")]
    WrongKind { index: usize, expected: &'static str },

    /// The folder's items moved since the user acted on them.
    #[error("folder {0} changed before the edit was saved")]
    Outdated(String),
}

impl PackoutError {
    /// True when the failure happened before anything was written.
    pub fn is_rejected_locally(&self) -> bool {
        matches!(
            self,
            PackoutError::DuplicateFolder { .. }
                | PackoutError::InvalidName(_)
                | PackoutError::FolderNotFound(_)
                | PackoutError::ItemOutOfRange { .. }
                | PackoutError::WrongKind { .. }
                | PackoutError::Outdated(_)
        )
    }
}
