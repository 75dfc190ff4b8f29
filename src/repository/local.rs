//! Local Catalog Store
//!
//! Key-value backed persistence: the collection is JSON text under a
//! fixed key, held either in an on-disk JSON file or in memory. The
//! on-disk form is the no-network variant of the catalog; the in-memory
//! form backs tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::document::{parse_document, CatalogDocument};
use super::traits::{CatalogStore, KeyValueStorage};
use crate::domain::{CatalogError, DomainResult, Item};

/// Storage key holding the serialized collection
pub const CATALOG_KEY: &str = "catalog_items";

/// In-memory key-value storage
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// File-backed key-value storage
///
/// The whole map lives in one JSON object file under the caller-supplied
/// path. Reads of a missing or unreadable file yield an empty map.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    fn write_map(&self, map: &HashMap<String, String>) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CatalogError::Sync(format!("cannot create storage dir: {}", e)))?;
        }
        let content = serde_json::to_string_pretty(map)
            .map_err(|e| CatalogError::Sync(format!("cannot encode storage: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| CatalogError::Sync(format!("cannot write storage: {}", e)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Catalog store over any key-value storage
pub struct LocalCatalogStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl LocalCatalogStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl CatalogStore for LocalCatalogStore {
    async fn load(&self) -> DomainResult<Vec<Item>> {
        match self.storage.get(CATALOG_KEY) {
            // Nothing saved yet, same contract as a remote 404
            None => Ok(Vec::new()),
            Some(text) => {
                let value: serde_json::Value = serde_json::from_str(&text)
                    .map_err(|e| CatalogError::Sync(format!("stored catalog unreadable: {}", e)))?;
                parse_document(value)
            }
        }
    }

    async fn save(&self, items: &[Item]) -> DomainResult<()> {
        let document = CatalogDocument {
            items: items.to_vec(),
        };
        let text = serde_json::to_string(&document)
            .map_err(|e| CatalogError::Sync(format!("cannot encode catalog: {}", e)))?;
        self.storage.set(CATALOG_KEY, &text)
    }
}
