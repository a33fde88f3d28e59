//! Repository Integration Tests
//!
//! Tests for DocumentRepository with in-memory and on-disk SQLite databases.

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use packout_core::{DropOutcome, FolderId, Item, MutationApplier, Status, WriteMode};
    use serde_json::{json, Map, Value};

    use crate::domain::DomainError;
    use crate::repository::{init_db, DbState, DocumentRepository};

    async fn setup_test_db() -> DocumentRepository {
        // Use in-memory database for tests
        let db_state = init_db(&PathBuf::from(":memory:")).await.expect("Failed to init test DB");
        DocumentRepository::new(db_state.conn.clone())
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object")
    }

    #[tokio::test]
    async fn test_upsert_creates_and_lists() {
        let repo = setup_test_db().await;

        repo.upsert("trailer", "truck-a", fields(json!({"name": "Truck A", "items": []})), WriteMode::Replace)
            .await
            .expect("upsert failed");

        let docs = repo.list("trailer").await.expect("list failed");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs["truck-a"], json!({"name": "Truck A", "items": []}));
    }

    #[tokio::test]
    async fn test_merge_keeps_other_fields() {
        let repo = setup_test_db().await;
        repo.upsert("p", "a", fields(json!({"name": "A", "items": [{"name": "Rope", "qty": 1}]})), WriteMode::Replace)
            .await
            .unwrap();

        repo.upsert("p", "a", fields(json!({"name": "Renamed"})), WriteMode::Merge)
            .await
            .unwrap();

        let doc = repo.get("p", "a").await.unwrap().expect("document exists");
        assert_eq!(doc.body["name"], "Renamed");
        assert_eq!(doc.body["items"][0]["name"], "Rope");
        assert!(doc.updated_at > 0);
    }

    #[tokio::test]
    async fn test_replace_discards_previous_body() {
        let repo = setup_test_db().await;
        repo.upsert("p", "a", fields(json!({"name": "A", "stale": true})), WriteMode::Replace)
            .await
            .unwrap();

        repo.upsert("p", "a", fields(json!({"name": "A", "items": []})), WriteMode::Replace)
            .await
            .unwrap();

        let docs = repo.list("p").await.unwrap();
        assert!(docs["a"].get("stale").is_none());
    }

    #[tokio::test]
    async fn test_replace_items_creates_missing_document() {
        let repo = setup_test_db().await;

        repo.replace_items("p", "ghost", &[Item::quantity("Rope", 2)]).await.unwrap();

        let docs = repo.list("p").await.unwrap();
        assert_eq!(docs["ghost"], json!({"items": [{"name": "Rope", "kind": "quantity", "qty": 2}]}));
    }

    #[tokio::test]
    async fn test_replace_items_keeps_name() {
        let repo = setup_test_db().await;
        repo.upsert("p", "a", fields(json!({"name": "A", "items": []})), WriteMode::Replace)
            .await
            .unwrap();

        repo.replace_items("p", "a", &[Item::status("Fuel", Some(Status::Low))]).await.unwrap();

        let doc = repo.get("p", "a").await.unwrap().unwrap();
        assert_eq!(doc.body["name"], "A");
        assert_eq!(doc.body["items"][0]["status"], "low");
    }

    #[tokio::test]
    async fn test_remove_document() {
        let repo = setup_test_db().await;
        repo.upsert("p", "a", fields(json!({"name": "A"})), WriteMode::Replace).await.unwrap();

        repo.remove("p", "a").await.expect("remove failed");
        assert!(repo.list("p").await.unwrap().is_empty());

        // Removing again is fine
        repo.remove("p", "a").await.expect("second remove failed");
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let repo = setup_test_db().await;
        repo.upsert("one", "a", fields(json!({"name": "A"})), WriteMode::Replace).await.unwrap();
        repo.upsert("two", "a", fields(json!({"name": "Other A"})), WriteMode::Replace).await.unwrap();

        repo.remove("one", "a").await.unwrap();

        assert!(repo.list("one").await.unwrap().is_empty());
        assert_eq!(repo.list("two").await.unwrap()["a"]["name"], "Other A");
    }

    #[tokio::test]
    async fn test_empty_doc_id_rejected() {
        let repo = setup_test_db().await;
        let result = repo.upsert("p", "  ", fields(json!({"name": "x"})), WriteMode::Replace).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_uninitialized_state_errors() {
        let repo = DocumentRepository::new(DbState::new().conn.clone());
        assert!(matches!(repo.list("p").await, Err(DomainError::Internal(_))));
    }

    #[tokio::test]
    async fn test_documents_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data").join("packout.db");

        {
            let state = init_db(&path).await.expect("first open");
            let repo = DocumentRepository::new(state.conn.clone());
            repo.upsert("p", "a", fields(json!({"name": "A", "items": []})), WriteMode::Replace)
                .await
                .unwrap();
            repo.replace_items("p", "a", &[Item::length("Hose", Some(3.5))]).await.unwrap();
        }

        let state = init_db(Path::new(&path)).await.expect("reopen");
        let repo = DocumentRepository::new(state.conn.clone());
        let docs = repo.list("p").await.unwrap();
        assert_eq!(docs["a"]["items"][0]["len"], 3.5);
    }

    // ========================
    // Mutation protocol over SQLite
    // ========================

    #[tokio::test]
    async fn test_truck_a_reorder_survives_reload() {
        let repo = setup_test_db().await;
        let applier = MutationApplier::new(repo, "trailer");

        let folders = applier.add_folder(&[], "Truck A").await.expect("add folder");
        let folder = folders[0].clone();
        let folders = applier.add_item(&folder, "X", packout_core::ItemKind::Quantity).await.unwrap();
        let folders = applier.set_quantity(&folders[0], 0, 2).await.unwrap();
        let folders = applier.add_item(&folders[0], "Y", packout_core::ItemKind::Status).await.unwrap();
        let folders = applier.add_item(&folders[0], "Z", packout_core::ItemKind::Length).await.unwrap();
        let folders = applier.set_length(&folders[0], 2, Some(3.5)).await.unwrap();

        let folders = applier
            .reorder(&folders[0], DropOutcome { source: 2, target: 0 })
            .await
            .expect("reorder")
            .expect("not a no-op");

        let expected = vec![Item::length("Z", Some(3.5)), Item::quantity("X", 2), Item::status("Y", None)];
        assert_eq!(folders[0].items, expected);

        let reloaded = applier.load().await.unwrap();
        assert_eq!(reloaded[0].items, expected);
    }

    #[tokio::test]
    async fn test_rename_folder_migrates_document() {
        let repo = setup_test_db().await;
        let applier = MutationApplier::new(repo, "trailer");

        let folders = applier.add_folder(&[], "Truck A").await.unwrap();
        let folders = applier.add_item(&folders[0], "Rope", packout_core::ItemKind::Quantity).await.unwrap();
        let folders = applier.add_item(&folders[0], "Fuel", packout_core::ItemKind::Status).await.unwrap();

        let folders = applier
            .rename_folder(&folders, &FolderId::from_stored("truck-a"), "Truck B")
            .await
            .unwrap();

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].id.as_str(), "truck-b");
        assert_eq!(folders[0].name, "Truck B");
        let names: Vec<_> = folders[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Rope", "Fuel"]);

        let docs = applier.store().list("trailer").await.unwrap();
        assert!(!docs.contains_key("truck-a"));
    }
}
