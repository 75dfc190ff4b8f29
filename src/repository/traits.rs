//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for persistence.
//! Implementations can use a remote document store, a local file,
//! in-memory, etc.

use async_trait::async_trait;

use crate::domain::{DomainResult, Item};

/// Full-document persistence for the item collection
///
/// There is no per-item remote identity: every save overwrites the whole
/// document, and two writers race last-write-wins. All operations are
/// async to support network backends.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch the stored collection. A store that holds no document yet
    /// yields an empty list, not an error.
    async fn load(&self) -> DomainResult<Vec<Item>>;

    /// Overwrite the stored document with the given collection
    async fn save(&self, items: &[Item]) -> DomainResult<()>;
}

/// Durable string key-value surface
///
/// The local analog of browser storage: JSON text under fixed keys, used
/// for the local catalog variant and for session persistence.
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, None when the key is absent
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Remove a key (no-op when absent)
    fn remove(&self, key: &str) -> DomainResult<()>;
}
