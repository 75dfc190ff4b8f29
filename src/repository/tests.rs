//! Repository Integration Tests
//!
//! Tests for the catalog stores with in-memory and temp-file storage.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::domain::Item;
    use crate::repository::{
        CatalogStore, FileStorage, KeyValueStorage, LocalCatalogStore, MemoryStorage, CATALOG_KEY,
    };

    fn sample_items() -> Vec<Item> {
        vec![
            Item::new(1, "Widget".to_string(), Some("img1".to_string()), "first".to_string()),
            Item::new(2, "Gadget".to_string(), None, "second".to_string()),
        ]
    }

    #[tokio::test]
    async fn test_empty_storage_loads_empty_collection() {
        let store = LocalCatalogStore::new(Arc::new(MemoryStorage::new()));
        let items = store.load().await.expect("load");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let store = LocalCatalogStore::new(Arc::new(MemoryStorage::new()));
        let saved = sample_items();

        store.save(&saved).await.expect("save");
        let loaded = store.load().await.expect("load");

        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_corrupt_stored_document_is_a_sync_error() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CATALOG_KEY, "{not json").expect("set");

        let store = LocalCatalogStore::new(storage);
        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");

        let store = LocalCatalogStore::new(Arc::new(FileStorage::new(&path)));
        store.save(&sample_items()).await.expect("save");

        // Fresh handle over the same file sees the data
        let reopened = LocalCatalogStore::new(Arc::new(FileStorage::new(&path)));
        let loaded = reopened.load().await.expect("load");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "Widget");
    }

    #[test]
    fn test_file_storage_key_value_surface() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("store.json"));

        assert!(storage.get("missing").is_none());
        storage.set("session", r#"{"email":"a@b"}"#).expect("set");
        assert_eq!(storage.get("session").as_deref(), Some(r#"{"email":"a@b"}"#));
        storage.remove("session").expect("remove");
        assert!(storage.get("session").is_none());
        // Removing a missing key is a no-op
        storage.remove("session").expect("remove again");
    }
}
