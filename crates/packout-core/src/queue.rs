//! Mutation Queue
//!
//! Runs mutations one at a time, in the order they were requested. Each one starts
//! from the folders the previous one reloaded, so an operation queued behind an
//! unsettled write never persists a state computed from before that write.

use std::future::Future;

use tokio::sync::Mutex;
use tracing::warn;

use crate::applier::MutationApplier;
use crate::error::{PackoutError, PackoutResult};
use crate::folder::Folder;
use crate::store::DocumentStore;

pub struct MutationQueue<S> {
    applier: MutationApplier<S>,
    /// Last authoritative folder list. Holding the lock is holding the queue slot.
    latest: Mutex<Vec<Folder>>,
}

impl<S: DocumentStore + Clone> MutationQueue<S> {
    pub fn new(applier: MutationApplier<S>) -> Self {
        Self {
            applier,
            latest: Mutex::new(Vec::new()),
        }
    }

    /// Reload every folder once the mutations ahead have settled.
    pub async fn load(&self) -> PackoutResult<Vec<Folder>> {
        let mut latest = self.latest.lock().await;
        let folders = self.applier.load().await?;
        *latest = folders.clone();
        Ok(folders)
    }

    /// Run a page-level mutation against the latest folders.
    pub async fn run<F, Fut, R>(&self, op: F) -> PackoutResult<Option<Vec<Folder>>>
    where
        F: FnOnce(MutationApplier<S>, Vec<Folder>) -> Fut,
        Fut: Future<Output = PackoutResult<R>>,
        R: Into<Option<Vec<Folder>>>,
    {
        let mut latest = self.latest.lock().await;
        let result = op(self.applier.clone(), (*latest).clone()).await.map(Into::into);
        self.settle(&mut latest, &result).await;
        result
    }

    /// Run an index-based mutation on one folder.
    ///
    /// `rendered` is the folder as the user saw it when acting. The mutation runs on
    /// the latest state of that folder, and is rejected as [`PackoutError::Outdated`]
    /// if an earlier mutation changed which item sits at which index.
    pub async fn run_folder<F, Fut, R>(&self, rendered: &Folder, op: F) -> PackoutResult<Option<Vec<Folder>>>
    where
        F: FnOnce(MutationApplier<S>, Folder) -> Fut,
        Fut: Future<Output = PackoutResult<R>>,
        R: Into<Option<Vec<Folder>>>,
    {
        let mut latest = self.latest.lock().await;
        let current = latest
            .iter()
            .find(|f| f.id == rendered.id)
            .cloned()
            .ok_or_else(|| PackoutError::FolderNotFound(rendered.id.to_string()))?;
        if !same_layout(&current, rendered) {
            warn!(folder = %rendered.id, "mutation against outdated items rejected");
            return Err(PackoutError::Outdated(rendered.id.to_string()));
        }

        let result = op(self.applier.clone(), current).await.map(Into::into);
        self.settle(&mut latest, &result).await;
        result
    }

    async fn settle(&self, latest: &mut Vec<Folder>, result: &PackoutResult<Option<Vec<Folder>>>) {
        match result {
            Ok(Some(folders)) => *latest = folders.clone(),
            Ok(None) => {}
            Err(err) if err.is_rejected_locally() => {}
            // a failed write may have landed partially; resync before the next one runs
            Err(_) => match self.applier.load().await {
                Ok(folders) => *latest = folders,
                Err(e) => warn!(error = %e, "resync after failed mutation"),
            },
        }
    }
}

/// Same item names in the same positions.
fn same_layout(a: &Folder, b: &Folder) -> bool {
    a.items.len() == b.items.len() && a.items.iter().zip(&b.items).all(|(x, y)| x.name == y.name)
}
