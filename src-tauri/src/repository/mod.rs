//! Repository Layer
//!
//! SQLite-backed document storage.

mod db;
mod document_repo;

#[cfg(test)]
mod tests;

pub use db::{init_db, DbState};
pub use document_repo::DocumentRepository;
