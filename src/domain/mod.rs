//! Domain Layer
//!
//! Contains the domain entities and core abstractions.
//! This layer has NO external dependencies (except serde/thiserror for
//! serialization and error derivation).

mod error;
mod item;
mod session;

pub use error::{CatalogError, DomainResult};
pub use item::Item;
pub use session::UserSession;
