//! Application Configuration
//!
//! Deployment-specific trust parameters (endpoints, access key,
//! allow-list, delete secret) as an explicit structure instead of
//! compiled-in globals. Loaded from a JSON file; the legacy plain-text
//! `KEY=value` key file served over HTTP is still supported for the
//! document store key.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{CatalogError, DomainResult};
use crate::media::DEFAULT_MAX_UPLOAD_BYTES;

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

/// Everything the catalog needs to talk to its three external services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document store endpoint holding the item collection
    pub bin_url: String,
    /// Document store access key; saves are refused without one
    #[serde(default)]
    pub master_key: Option<String>,
    /// Emails allowed to add, edit and delete items. Empty = ungated.
    #[serde(default)]
    pub admin_emails: Vec<String>,
    /// Secret required by the delete operation
    #[serde(default)]
    pub delete_secret: String,
    /// Blob host upload endpoint
    #[serde(default)]
    pub upload_url: String,
    /// Fixed upload preset sent with every image
    #[serde(default)]
    pub upload_preset: String,
    /// Image size cap in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bin_url: String::new(),
            master_key: None,
            admin_emails: Vec::new(),
            delete_secret: String::new(),
            upload_url: String::new(),
            upload_preset: String::new(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> DomainResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| CatalogError::Configuration(format!("invalid config file: {}", e)))
    }
}

/// Extract `KEY=value` from a plain-text key file: first matching line,
/// remainder trimmed. Empty result means absent.
pub fn extract_env_value(raw: &str, key: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    let pattern = format!(r"(?m)^\s*{}\s*=\s*(.+)$", regex::escape(key));
    let matcher = Regex::new(&pattern).ok()?;
    let value = matcher.captures(raw)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Fetch a plain-text key file over HTTP and pull one key out of it.
///
/// Best effort: the key may equally come from the config file, so any
/// failure here is logged and yields None instead of an error.
pub async fn fetch_remote_key(client: &reqwest::Client, url: &str, key: &str) -> Option<String> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("key file fetch failed: {}", e);
            return None;
        }
    };
    if !response.status().is_success() {
        log::warn!("key file fetch failed: {}", response.status());
        return None;
    }
    let text = response.text().await.ok()?;
    extract_env_value(&text, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_simple_assignment() {
        assert_eq!(
            extract_env_value("BIN_KEY=abc123", "BIN_KEY").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_tolerates_whitespace_and_picks_first_match() {
        let raw = "# comment\n  BIN_KEY =  first value  \nBIN_KEY=second";
        assert_eq!(
            extract_env_value(raw, "BIN_KEY").as_deref(),
            Some("first value")
        );
    }

    #[test]
    fn test_other_keys_do_not_match() {
        let raw = "OTHER=x\nNOT_BIN_KEY=y";
        assert!(extract_env_value(raw, "BIN_KEY").is_none());
    }

    #[test]
    fn test_blank_input_and_blank_value_yield_none() {
        assert!(extract_env_value("   \n  ", "BIN_KEY").is_none());
        assert!(extract_env_value("BIN_KEY=   ", "BIN_KEY").is_none());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "bin_url": "https://bins.example/b/1",
                "admin_emails": ["a@example.com"],
                "delete_secret": "s3cret"
            }"#,
        )
        .expect("write");

        let config = AppConfig::load(&path).expect("load");
        assert_eq!(config.bin_url, "https://bins.example/b/1");
        assert_eq!(config.admin_emails, vec!["a@example.com"]);
        assert_eq!(config.delete_secret, "s3cret");
        assert!(config.master_key.is_none());
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_missing_config_file_is_a_configuration_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Configuration(_)));
    }
}
