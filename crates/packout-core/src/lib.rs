//! Packout Core
//!
//! Domain model and mutation protocol shared by the frontend and the desktop host.
//! - item / folder: canonical records and their payload rules
//! - migrate: one-shot upgrade of legacy (duck-typed) item records
//! - reorder: drag commit math
//! - applier: persist-then-reload choke point for every mutation
//! - queue: runs mutations one at a time against the latest reload
//! - store: document store abstraction + in-memory implementation

mod error;
mod folder;
mod item;
mod migrate;
mod slug;

pub mod applier;
pub mod queue;
pub mod reorder;
pub mod store;

pub use applier::MutationApplier;
pub use error::{PackoutError, PackoutResult, StoreError};
pub use folder::{sort_folders, Folder, FolderId, FolderRecord};
pub use item::{Item, ItemKind, Payload, Status};
pub use migrate::{folders_from_documents, migrate_item};
pub use queue::MutationQueue;
pub use reorder::{commit_order, move_element, DropOutcome};
pub use slug::folder_id;
pub use store::{DocumentStore, Documents, MemoryStore, WriteMode};
