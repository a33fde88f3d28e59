//! Application Context
//!
//! Shared state provided via Leptos Context API. Every mutation a component triggers
//! is queued here behind the ones still in flight and settled here. Success replaces
//! the store with the reloaded folders. Failure is reported and the view is rebuilt
//! from the remote state.

use std::future::Future;
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use packout_core::{MutationApplier, MutationQueue, PackoutError, PackoutResult};

use crate::collapse::CollapseStore;
use crate::commands::TauriDocumentStore;
use crate::config::PageConfig;
use crate::models::{Folder, FolderId};
use crate::store::*;

#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    page: StoredValue<PageConfig>,
    queue: StoredValue<Arc<MutationQueue<TauriDocumentStore>>>,
    /// Trigger to reload folders from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload folders from backend - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(store: AppStore, page: PageConfig, reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        let queue = MutationQueue::new(MutationApplier::new(TauriDocumentStore, page.key.clone()));
        Self {
            store,
            page: StoredValue::new(page),
            queue: StoredValue::new(Arc::new(queue)),
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    pub fn page(&self) -> PageConfig {
        self.page.get_value()
    }

    pub fn collapse_store(&self) -> CollapseStore {
        self.page.with_value(|p| CollapseStore::new(&p.key))
    }

    // ========================
    // Reads
    // ========================

    pub fn folders(&self) -> Vec<Folder> {
        store_folders(&self.store)
    }

    pub fn folders_untracked(&self) -> Vec<Folder> {
        store_folders_untracked(&self.store)
    }

    /// The folder as currently rendered.
    pub fn folder(&self, id: &FolderId) -> Option<Folder> {
        store_find_folder(&self.store, id)
    }

    pub fn locked(&self) -> bool {
        store_locked(&self.store)
    }

    pub fn locked_untracked(&self) -> bool {
        store_locked_untracked(&self.store)
    }

    pub fn set_locked(&self, locked: bool) {
        store_set_locked(&self.store, locked);
    }

    pub fn notify(&self, message: impl Into<String>) {
        store_set_notice(&self.store, Some(message.into()));
    }

    pub fn dismiss_notice(&self) {
        store_set_notice(&self.store, None);
    }

    // ========================
    // Load / settle
    // ========================

    /// Trigger a reload of folders
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub async fn load(&self) {
        let queue = self.queue.get_value();
        match queue.load().await {
            Ok(folders) => {
                web_sys::console::log_1(&format!("[APP] Loaded {} folders", folders.len()).into());
                store_set_folders(&self.store, folders);
            }
            Err(err) => self.report("load", err),
        }
    }

    /// Apply the outcome of a mutation. Returns true if it was saved.
    pub fn settle(&self, action: &str, result: PackoutResult<Vec<Folder>>) -> bool {
        match result {
            Ok(folders) => {
                store_set_folders(&self.store, folders);
                self.dismiss_notice();
                true
            }
            Err(err) => {
                self.report(action, err);
                false
            }
        }
    }

    /// Like [`settle`](Self::settle) for operations that may turn out to be no-ops.
    pub fn settle_optional(&self, action: &str, result: PackoutResult<Option<Vec<Folder>>>) -> bool {
        match result {
            Ok(Some(folders)) => self.settle(action, Ok(folders)),
            Ok(None) => true,
            Err(err) => self.settle(action, Err(err)),
        }
    }

    /// Queue a page-level mutation (folder create/delete/rename). It runs against the
    /// folders as left by the mutations queued before it.
    pub fn mutate<F, Fut, R>(&self, action: &'static str, op: F)
    where
        F: FnOnce(MutationApplier<TauriDocumentStore>, Vec<Folder>) -> Fut + 'static,
        Fut: Future<Output = PackoutResult<R>> + 'static,
        R: Into<Option<Vec<Folder>>>,
    {
        let ctx = *self;
        let queue = self.queue.get_value();
        spawn_local(async move {
            let result = queue.run(op).await;
            ctx.settle_optional(action, result);
        });
    }

    /// Queue an index-based mutation on one folder. Rejected if a mutation queued
    /// earlier moved its items away from what is rendered now.
    pub fn mutate_folder<F, Fut, R>(&self, folder_id: &FolderId, action: &'static str, op: F)
    where
        F: FnOnce(MutationApplier<TauriDocumentStore>, Folder) -> Fut + 'static,
        Fut: Future<Output = PackoutResult<R>> + 'static,
        R: Into<Option<Vec<Folder>>>,
    {
        let Some(rendered) = self.folder(folder_id) else {
            self.report(action, PackoutError::FolderNotFound(folder_id.to_string()));
            return;
        };
        let ctx = *self;
        let queue = self.queue.get_value();
        spawn_local(async move {
            let result = queue.run_folder(&rendered, op).await;
            ctx.settle_optional(action, result);
        });
    }

    fn report(&self, action: &str, err: PackoutError) {
        if err.is_rejected_locally() {
            web_sys::console::warn_1(&format!("[APP] {} rejected: {}", action, err).into());
        } else {
            web_sys::console::error_1(&format!("[APP] {} failed: {}", action, err).into());
        }
        match err {
            PackoutError::Load(_) | PackoutError::Decode { .. } => {
                store_set_load_error(&self.store, err.to_string());
            }
            _ => {
                self.notify(format!("Could not {}: {}", action, err));
                // inputs may still show the rejected value; rebuild from the remote state
                self.reload();
            }
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
