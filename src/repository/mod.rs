//! Repository Layer
//!
//! Persistence abstractions and implementations. The whole collection is
//! one document; backends are a remote JSON bin or a local key-value
//! store.

mod document;
mod jsonbin;
mod local;
mod traits;

#[cfg(test)]
mod tests;

pub use document::{parse_document, CatalogDocument};
pub use jsonbin::JsonBinStore;
pub use local::{FileStorage, LocalCatalogStore, MemoryStorage, CATALOG_KEY};
pub use traits::{CatalogStore, KeyValueStorage};
