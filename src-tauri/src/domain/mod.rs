//! Domain Layer
//!
//! Stored documents and the errors the repository reports.
//! Folder and item semantics live in `packout-core`; this layer only sees JSON bodies.

mod document;
mod error;

pub use document::StoredDocument;
pub use error::{DomainError, DomainResult};
