//! Folder Entity
//!
//! A named, ordered container of items. One document per folder in the page's collection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Normalized folder identifier; doubles as the document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    /// Wraps an identifier read back from the store. New folders go through [`crate::folder_id`].
    pub fn from_stored(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub items: Vec<Item>,
}

impl Folder {
    pub fn new(id: FolderId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// The document body as written to the store.
    pub fn to_record(&self) -> FolderRecord {
        FolderRecord {
            name: self.name.clone(),
            items: self.items.clone(),
        }
    }
}

/// Persisted shape of a folder document: `{name, items[]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Display order: name (case-insensitive), then id.
pub fn sort_folders(folders: &mut [Folder]) {
    folders.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}
