//! Remote Catalog Store - JSON Bin
//!
//! Loads and saves the whole item collection as one JSON document
//! against a remote bin endpoint. No retry, no delta sync; concurrent
//! writers race last-write-wins.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::document::{parse_document, CatalogDocument};
use super::traits::CatalogStore;
use crate::domain::{CatalogError, DomainResult, Item};

const MASTER_KEY_HEADER: &str = "X-Master-Key";
const META_HEADER: &str = "X-Bin-Meta";

/// Remote document store client
pub struct JsonBinStore {
    client: reqwest::Client,
    base_url: String,
    master_key: Option<String>,
}

impl JsonBinStore {
    /// Reads work without a key (for public bins); saves require one.
    pub fn new(base_url: impl Into<String>, master_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            master_key: master_key.filter(|key| !key.trim().is_empty()),
        }
    }
}

#[async_trait]
impl CatalogStore for JsonBinStore {
    async fn load(&self) -> DomainResult<Vec<Item>> {
        let mut request = self
            .client
            .get(format!("{}/latest", self.base_url))
            .header(META_HEADER, "false");
        if let Some(key) = &self.master_key {
            request = request.header(MASTER_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Sync(format!("load failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            // Bin has no data yet, start with an empty list
            log::info!("remote bin holds no document yet");
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(CatalogError::Sync(format!(
                "load failed: {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CatalogError::Sync(format!("load returned no JSON: {}", e)))?;
        parse_document(body)
    }

    async fn save(&self, items: &[Item]) -> DomainResult<()> {
        let Some(key) = &self.master_key else {
            return Err(CatalogError::Configuration(
                "no document store key configured, cannot sync".into(),
            ));
        };

        let response = self
            .client
            .put(&self.base_url)
            .header(MASTER_KEY_HEADER, key)
            .json(&CatalogDocument {
                items: items.to_vec(),
            })
            .send()
            .await
            .map_err(|e| CatalogError::Sync(format!("save failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CatalogError::Sync(format!(
                "save failed: {}",
                response.status()
            )));
        }
        log::debug!("saved {} items to remote bin", items.len());
        Ok(())
    }
}
