//! Item Catalog Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Persistence abstractions and implementations
//! - auth: Identity decode, allow-list gate, session persistence
//! - media: Blob host image upload
//! - config: Deployment configuration
//! - service: Catalog operations (add / update / delete / search / sync)

use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod domain;
pub mod media;
pub mod repository;
pub mod service;

pub use config::AppConfig;
pub use domain::{CatalogError, DomainResult, Item, UserSession};
pub use service::{CatalogService, ItemEdit};

use crate::auth::AccessGate;
use crate::media::MediaUploader;
use crate::repository::{JsonBinStore, KeyValueStorage, LocalCatalogStore};

/// Service for the remote document store variant. An empty allow-list
/// leaves mutations ungated.
pub fn remote_service(config: &AppConfig) -> CatalogService {
    let store = Arc::new(JsonBinStore::new(
        config.bin_url.clone(),
        config.master_key.clone(),
    ));
    CatalogService::new(store, gate_from(config), config.delete_secret.clone())
}

/// Service for the local key-value variant (no network)
pub fn local_service(config: &AppConfig, storage: Arc<dyn KeyValueStorage>) -> CatalogService {
    let store = Arc::new(LocalCatalogStore::new(storage));
    CatalogService::new(store, gate_from(config), config.delete_secret.clone())
}

/// Image upload client for the configured blob host
pub fn uploader(config: &AppConfig) -> MediaUploader {
    MediaUploader::new(
        config.upload_url.clone(),
        config.upload_preset.clone(),
        config.max_upload_bytes,
    )
}

fn gate_from(config: &AppConfig) -> Option<AccessGate> {
    if config.admin_emails.is_empty() {
        None
    } else {
        Some(AccessGate::new(config.admin_emails.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStorage;

    fn config() -> AppConfig {
        AppConfig {
            bin_url: "https://bins.example/b/1".to_string(),
            admin_emails: vec!["admin@example.com".to_string()],
            delete_secret: "s3cret".to_string(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_local_service_is_gated_by_config_allow_list() {
        let mut service = local_service(&config(), Arc::new(MemoryStorage::new()));
        let err = service.add_item(None, "Widget", None, "d").await.unwrap_err();
        assert!(matches!(err, CatalogError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_empty_allow_list_means_ungated() {
        let open = AppConfig {
            admin_emails: Vec::new(),
            ..config()
        };
        let mut service = local_service(&open, Arc::new(MemoryStorage::new()));
        service.add_item(None, "Widget", None, "d").await.expect("add");
        assert_eq!(service.items().len(), 1);
    }
}
