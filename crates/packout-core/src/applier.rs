//! Mutation Applier
//!
//! Every state change goes through here: compute the new value on a clone of the
//! snapshot the user acted on, write it to the store, then reload the whole
//! collection. The returned folders are what the view renders next; nothing
//! unsaved is ever handed back.

use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::error::{PackoutError, PackoutResult, StoreError};
use crate::folder::{Folder, FolderId, FolderRecord};
use crate::item::{Item, ItemKind, Status};
use crate::migrate::folders_from_documents;
use crate::reorder::{commit_order, DropOutcome};
use crate::slug::folder_id;
use crate::store::{DocumentStore, WriteMode};

#[derive(Clone)]
pub struct MutationApplier<S> {
    store: S,
    collection: String,
}

impl<S: DocumentStore> MutationApplier<S> {
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch and migrate every folder of the page.
    pub async fn load(&self) -> PackoutResult<Vec<Folder>> {
        let docs = self.store.list_all(&self.collection).await.map_err(|e| {
            error!(collection = %self.collection, error = %e, "load failed");
            PackoutError::Load(e)
        })?;
        folders_from_documents(&docs)
    }

    /// Transform a copy of `folder.items`, persist the whole list, reload.
    pub async fn apply<F>(&self, folder: &Folder, transform: F) -> PackoutResult<Vec<Folder>>
    where
        F: FnOnce(&mut Vec<Item>) -> PackoutResult<()>,
    {
        let mut items = folder.items.clone();
        transform(&mut items)?;
        self.persist_items(&folder.id, &items).await?;
        self.load().await
    }

    // ========================
    // Item operations
    // ========================

    /// Commit a finished drag. `Ok(None)` means the drop was a no-op and nothing was written.
    pub async fn reorder(&self, folder: &Folder, outcome: DropOutcome) -> PackoutResult<Option<Vec<Folder>>> {
        match commit_order(&folder.items, outcome)? {
            None => {
                debug!(folder = %folder.id, index = outcome.source, "dropped in place");
                Ok(None)
            }
            Some(items) => {
                debug!(folder = %folder.id, from = outcome.source, to = outcome.target, "reorder");
                self.persist_items(&folder.id, &items).await?;
                self.load().await.map(Some)
            }
        }
    }

    /// Append a new item with its kind's zero value.
    pub async fn add_item(&self, folder: &Folder, name: &str, kind: ItemKind) -> PackoutResult<Vec<Folder>> {
        let item = Item::new(name.trim(), kind);
        self.apply(folder, move |items| {
            items.push(item);
            Ok(())
        })
        .await
    }

    pub async fn delete_item(&self, folder: &Folder, index: usize) -> PackoutResult<Vec<Folder>> {
        self.apply(folder, |items| {
            check_index(items, index)?;
            items.remove(index);
            Ok(())
        })
        .await
    }

    pub async fn rename_item(&self, folder: &Folder, index: usize, name: &str) -> PackoutResult<Vec<Folder>> {
        let name = name.trim().to_string();
        self.apply(folder, move |items| {
            item_mut(items, index)?.name = name;
            Ok(())
        })
        .await
    }

    pub async fn set_quantity(&self, folder: &Folder, index: usize, qty: u32) -> PackoutResult<Vec<Folder>> {
        self.apply(folder, |items| require(item_mut(items, index)?.set_quantity(qty), index, "quantity"))
            .await
    }

    /// Step a quantity by `delta`, never below zero.
    pub async fn adjust_quantity(&self, folder: &Folder, index: usize, delta: i64) -> PackoutResult<Vec<Folder>> {
        self.apply(folder, |items| require(item_mut(items, index)?.adjust_quantity(delta), index, "quantity"))
            .await
    }

    /// Select `status`, or clear it if it is already the current value.
    pub async fn toggle_status(&self, folder: &Folder, index: usize, status: Status) -> PackoutResult<Vec<Folder>> {
        self.apply(folder, |items| require(item_mut(items, index)?.toggle_status(status), index, "status"))
            .await
    }

    pub async fn set_length(&self, folder: &Folder, index: usize, len: Option<f64>) -> PackoutResult<Vec<Folder>> {
        self.apply(folder, |items| require(item_mut(items, index)?.set_length(len), index, "length"))
            .await
    }

    /// Switch an item's kind, resetting its payload. `Ok(None)` if it already has that kind.
    pub async fn set_kind(&self, folder: &Folder, index: usize, kind: ItemKind) -> PackoutResult<Option<Vec<Folder>>> {
        let current = folder
            .items
            .get(index)
            .ok_or(PackoutError::ItemOutOfRange { index, len: folder.items.len() })?;
        if current.kind() == kind {
            return Ok(None);
        }
        self.apply(folder, |items| {
            item_mut(items, index)?.set_kind(kind);
            Ok(())
        })
        .await
        .map(Some)
    }

    // ========================
    // Folder operations
    // ========================

    /// Create an empty folder. Rejected before any write if the name normalizes to an
    /// id already present in `existing`.
    pub async fn add_folder(&self, existing: &[Folder], name: &str) -> PackoutResult<Vec<Folder>> {
        let name = name.trim();
        let id = folder_id(name)?;
        ensure_free(existing, &id, name)?;

        debug!(folder = %id, "create folder");
        let record = FolderRecord {
            name: name.to_string(),
            items: Vec::new(),
        };
        self.write_record(&id, &record).await?;
        self.load().await
    }

    /// Delete a folder and everything in it.
    pub async fn delete_folder(&self, id: &FolderId) -> PackoutResult<Vec<Folder>> {
        debug!(folder = %id, "delete folder");
        self.store
            .remove(&self.collection, id.as_str())
            .await
            .map_err(|e| self.write_failed(id, e))?;
        self.load().await
    }

    /// Rename a folder. When the new name normalizes to a different id the record is
    /// migrated: written under the new id with the same item order, then the old
    /// document is removed. The two steps are not atomic.
    pub async fn rename_folder(&self, existing: &[Folder], id: &FolderId, new_name: &str) -> PackoutResult<Vec<Folder>> {
        let new_name = new_name.trim();
        let new_id = folder_id(new_name)?;
        let folder = existing
            .iter()
            .find(|f| &f.id == id)
            .ok_or_else(|| PackoutError::FolderNotFound(id.to_string()))?;

        if new_id == *id {
            let mut fields = Map::new();
            fields.insert("name".to_string(), Value::String(new_name.to_string()));
            self.store
                .upsert(&self.collection, id.as_str(), fields, WriteMode::Merge)
                .await
                .map_err(|e| self.write_failed(id, e))?;
            return self.load().await;
        }

        ensure_free(existing, &new_id, new_name)?;
        debug!(from = %id, to = %new_id, "migrate folder");
        let record = FolderRecord {
            name: new_name.to_string(),
            ..folder.to_record()
        };
        self.write_record(&new_id, &record).await?;
        self.store
            .remove(&self.collection, id.as_str())
            .await
            .map_err(|e| self.write_failed(id, e))?;
        self.load().await
    }

    // ========================
    // Writes
    // ========================

    async fn persist_items(&self, id: &FolderId, items: &[Item]) -> PackoutResult<()> {
        self.store
            .replace_items(&self.collection, id.as_str(), items)
            .await
            .map_err(|e| self.write_failed(id, e))
    }

    async fn write_record(&self, id: &FolderId, record: &FolderRecord) -> PackoutResult<()> {
        let fields = match serde_json::to_value(record) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(self.write_failed(id, StoreError::new(format!("folder record encoded as {}", other))));
            }
            Err(e) => return Err(self.write_failed(id, StoreError::new(format!("encode folder: {}", e)))),
        };
        self.store
            .upsert(&self.collection, id.as_str(), fields, WriteMode::Replace)
            .await
            .map_err(|e| self.write_failed(id, e))
    }

    fn write_failed(&self, id: &FolderId, e: StoreError) -> PackoutError {
        error!(collection = %self.collection, folder = %id, error = %e, "write failed");
        PackoutError::Store(e)
    }
}

fn ensure_free(existing: &[Folder], id: &FolderId, name: &str) -> PackoutResult<()> {
    if existing.iter().any(|f| &f.id == id) {
        warn!(folder = %id, "duplicate folder name rejected");
        return Err(PackoutError::DuplicateFolder {
            id: id.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_index(items: &[Item], index: usize) -> PackoutResult<()> {
    if index >= items.len() {
        return Err(PackoutError::ItemOutOfRange { index, len: items.len() });
    }
    Ok(())
}

fn item_mut(items: &mut [Item], index: usize) -> PackoutResult<&mut Item> {
    let len = items.len();
    items.get_mut(index).ok_or(PackoutError::ItemOutOfRange { index, len })
}

fn require(applied: bool, index: usize, expected: &'static str) -> PackoutResult<()> {
    if applied {
        Ok(())
    } else {
        Err(PackoutError::WrongKind { index, expected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Payload;
    use crate::store::MemoryStore;
    use serde_json::json;

    const PAGE: &str = "trailer";

    async fn setup() -> (MutationApplier<MemoryStore>, Vec<Folder>) {
        let applier = MutationApplier::new(MemoryStore::new(), PAGE);
        let folders = applier.add_folder(&[], "Truck A").await.unwrap();
        (applier, folders)
    }

    async fn truck_a() -> (MutationApplier<MemoryStore>, Vec<Folder>) {
        let (applier, folders) = setup().await;
        let folders = applier
            .apply(&folders[0], |items| {
                items.push(Item::quantity("X", 2));
                items.push(Item::status("Y", None));
                items.push(Item::length("Z", Some(3.5)));
                Ok(())
            })
            .await
            .unwrap();
        (applier, folders)
    }

    #[tokio::test]
    async fn test_add_folder_creates_empty_record() {
        let (applier, folders) = setup().await;
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].id.as_str(), "truck-a");
        assert_eq!(folders[0].name, "Truck A");
        assert!(folders[0].items.is_empty());
        assert_eq!(
            applier.store().document(PAGE, "truck-a").unwrap(),
            json!({"name": "Truck A", "items": []})
        );
    }

    #[tokio::test]
    async fn test_duplicate_folder_rejected_without_write() {
        let (applier, folders) = setup().await;
        let writes = applier.store().write_attempts();

        let err = applier.add_folder(&folders, "  truck   a ").await.unwrap_err();
        assert!(matches!(err, PackoutError::DuplicateFolder { ref id, .. } if id == "truck-a"));
        assert!(err.is_rejected_locally());
        assert_eq!(applier.store().write_attempts(), writes);
    }

    #[tokio::test]
    async fn test_drag_commit_survives_reload() {
        let (applier, folders) = truck_a().await;
        let reloaded = applier
            .reorder(&folders[0], DropOutcome { source: 2, target: 0 })
            .await
            .unwrap()
            .unwrap();

        let expected = vec![Item::length("Z", Some(3.5)), Item::quantity("X", 2), Item::status("Y", None)];
        assert_eq!(reloaded[0].items, expected);
        assert_eq!(applier.load().await.unwrap()[0].items, expected);
    }

    #[tokio::test]
    async fn test_drop_in_place_writes_nothing() {
        let (applier, folders) = truck_a().await;
        let writes = applier.store().write_attempts();

        let result = applier.reorder(&folders[0], DropOutcome { source: 1, target: 1 }).await.unwrap();
        assert!(result.is_none());
        assert_eq!(applier.store().write_attempts(), writes);
    }

    #[tokio::test]
    async fn test_mutation_does_not_touch_snapshot() {
        let (applier, folders) = truck_a().await;
        let snapshot = folders[0].clone();
        applier.delete_item(&folders[0], 0).await.unwrap();
        assert_eq!(folders[0], snapshot);
    }

    #[tokio::test]
    async fn test_add_item_appends_zero_value() {
        let (applier, folders) = truck_a().await;
        let folders = applier.add_item(&folders[0], " Jack ", ItemKind::Status).await.unwrap();
        assert_eq!(folders[0].items.len(), 4);
        assert_eq!(folders[0].items[3], Item::status("Jack", None));
    }

    #[tokio::test]
    async fn test_toggle_status_twice_is_unset() {
        let (applier, folders) = truck_a().await;
        let folders = applier.toggle_status(&folders[0], 1, Status::Mid).await.unwrap();
        assert_eq!(folders[0].items[1].payload, Payload::Status { status: Some(Status::Mid) });

        let folders = applier.toggle_status(&folders[0], 1, Status::Mid).await.unwrap();
        assert_eq!(folders[0].items[1].payload, Payload::Status { status: None });
    }

    #[tokio::test]
    async fn test_switch_quantity_to_length_is_unset() {
        let (applier, folders) = truck_a().await;
        let folders = applier.set_quantity(&folders[0], 0, 7).await.unwrap();
        let folders = applier.set_kind(&folders[0], 0, ItemKind::Length).await.unwrap().unwrap();
        assert_eq!(folders[0].items[0], Item::length("X", None));
    }

    #[tokio::test]
    async fn test_set_same_kind_writes_nothing() {
        let (applier, folders) = truck_a().await;
        let writes = applier.store().write_attempts();
        assert!(applier.set_kind(&folders[0], 2, ItemKind::Length).await.unwrap().is_none());
        assert_eq!(applier.store().write_attempts(), writes);
    }

    #[tokio::test]
    async fn test_wrong_kind_rejected_without_write() {
        let (applier, folders) = truck_a().await;
        let writes = applier.store().write_attempts();
        let err = applier.toggle_status(&folders[0], 0, Status::Full).await.unwrap_err();
        assert!(matches!(err, PackoutError::WrongKind { index: 0, expected: "status" }));
        assert_eq!(applier.store().write_attempts(), writes);
    }

    #[tokio::test]
    async fn test_adjust_quantity_floor() {
        let (applier, folders) = truck_a().await;
        let folders = applier.adjust_quantity(&folders[0], 0, -5).await.unwrap();
        assert_eq!(folders[0].items[0], Item::quantity("X", 0));
    }

    #[tokio::test]
    async fn test_write_failure_is_store_error() {
        let (applier, folders) = truck_a().await;
        applier.store().set_fail_writes(true);

        let err = applier.delete_item(&folders[0], 0).await.unwrap_err();
        assert!(matches!(err, PackoutError::Store(_)));

        applier.store().set_fail_writes(false);
        assert_eq!(applier.load().await.unwrap()[0].items.len(), 3);
    }

    #[tokio::test]
    async fn test_reload_failure_is_load_error() {
        let (applier, folders) = truck_a().await;
        applier.store().set_fail_reads(true);

        let err = applier.rename_item(&folders[0], 0, "Straps").await.unwrap_err();
        assert!(matches!(err, PackoutError::Load(_)));

        applier.store().set_fail_reads(false);
        assert_eq!(applier.load().await.unwrap()[0].items[0].name, "Straps");
    }

    #[tokio::test]
    async fn test_rename_folder_same_id_keeps_document() {
        let (applier, folders) = truck_a().await;
        let folders = applier.rename_folder(&folders, &folders[0].id.clone(), "TRUCK a").await.unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].id.as_str(), "truck-a");
        assert_eq!(folders[0].name, "TRUCK a");
        assert_eq!(folders[0].items.len(), 3);
    }

    #[tokio::test]
    async fn test_rename_folder_migrates_and_keeps_order() {
        let (applier, folders) = truck_a().await;
        let old_id = folders[0].id.clone();
        let folders = applier.rename_folder(&folders, &old_id, "Trailer 1").await.unwrap();

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].id.as_str(), "trailer-1");
        let names: Vec<_> = folders[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y", "Z"]);
        assert!(applier.store().document(PAGE, "truck-a").is_none());
        assert_eq!(
            applier.store().document(PAGE, "trailer-1").unwrap(),
            json!({
                "name": "Trailer 1",
                "items": [
                    {"name": "X", "kind": "quantity", "qty": 2},
                    {"name": "Y", "kind": "status", "status": null},
                    {"name": "Z", "kind": "length", "len": 3.5},
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_rename_onto_existing_rejected() {
        let (applier, folders) = truck_a().await;
        let folders = applier.add_folder(&folders, "Shed").await.unwrap();
        let shed = folders.iter().find(|f| f.name == "Shed").unwrap().id.clone();
        let writes = applier.store().write_attempts();

        let err = applier.rename_folder(&folders, &shed, "truck a").await.unwrap_err();
        assert!(matches!(err, PackoutError::DuplicateFolder { .. }));
        assert_eq!(applier.store().write_attempts(), writes);
    }

    #[tokio::test]
    async fn test_delete_folder() {
        let (applier, folders) = truck_a().await;
        let folders = applier.delete_folder(&folders[0].id).await.unwrap();
        assert!(folders.is_empty());
    }
}
