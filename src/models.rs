//! Frontend Models
//!
//! Domain types come from `packout-core`; this adds the shapes only the UI needs.

use serde::Serialize;

pub use packout_core::{folder_id, DropOutcome, Folder, FolderId, Item, ItemKind, Payload, Status};

/// Body of the "Download JSON" file.
#[derive(Debug, Serialize)]
pub struct ExportDoc<'a> {
    pub page: &'a str,
    pub folders: &'a [Folder],
}
