//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Folders here are always
//! the result of the last successful load; nothing unsaved is ever written in.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Folder, FolderId};

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Folders of the current page, in display order
    pub folders: Vec<Folder>,
    /// Bumped on every successful load; rows are keyed on it so each load rebuilds the view
    pub revision: u64,
    /// Set when the last load failed; the list is replaced by an error state
    pub load_error: Option<String>,
    /// Transient user-facing message (failed save, rejected name)
    pub notice: Option<String>,
    /// Editing lock; reordering and structural edits need it off
    pub locked: bool,
    /// True until the first load settles
    pub loading: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            locked: true,
            loading: true,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Replace everything with a fresh load.
pub fn store_set_folders(store: &AppStore, folders: Vec<Folder>) {
    store.folders().set(folders);
    store.revision().update(|r| *r += 1);
    store.load_error().set(None);
    store.loading().set(false);
}

pub fn store_set_load_error(store: &AppStore, message: String) {
    store.load_error().set(Some(message));
    store.loading().set(false);
}

pub fn store_set_notice(store: &AppStore, message: Option<String>) {
    store.notice().set(message);
}

pub fn store_set_locked(store: &AppStore, locked: bool) {
    store.locked().set(locked);
}

pub fn store_folders(store: &AppStore) -> Vec<Folder> {
    store.folders().get()
}

/// Snapshot of one folder, untracked.
pub fn store_find_folder(store: &AppStore, id: &FolderId) -> Option<Folder> {
    store.folders().with_untracked(|folders| folders.iter().find(|f| &f.id == id).cloned())
}

pub fn store_folders_untracked(store: &AppStore) -> Vec<Folder> {
    store.folders().get_untracked()
}

pub fn store_revision(store: &AppStore) -> u64 {
    store.revision().get()
}

pub fn store_load_error(store: &AppStore) -> Option<String> {
    store.load_error().get()
}

pub fn store_notice(store: &AppStore) -> Option<String> {
    store.notice().get()
}

pub fn store_locked(store: &AppStore) -> bool {
    store.locked().get()
}

pub fn store_loading(store: &AppStore) -> bool {
    store.loading().get()
}

pub fn store_locked_untracked(store: &AppStore) -> bool {
    store.locked().get_untracked()
}
