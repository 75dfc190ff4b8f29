//! Domain Layer - Errors
//!
//! One error enum for the whole crate. Every failure is recoverable by
//! user retry; nothing here is ever turned into a panic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common result type for catalog operations
pub type DomainResult<T> = Result<T, CatalogError>;

/// Catalog-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CatalogError {
    /// A required field was empty on add
    #[error("invalid input: {0}")]
    Validation(String),
    /// Wrong delete secret, or a mutation attempted without an
    /// allow-listed session
    #[error("not allowed: {0}")]
    Authorization(String),
    /// Non-success response or malformed body from the document store
    #[error("sync failed: {0}")]
    Sync(String),
    /// A save was attempted without an access key configured
    #[error("missing configuration: {0}")]
    Configuration(String),
    /// Blob host rejected the image, or returned no usable URL
    #[error("upload failed: {0}")]
    Upload(String),
    /// Identity token could not be decoded
    #[error("identity decode failed: {0}")]
    IdentityDecode(String),
}
