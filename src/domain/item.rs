//! Item Entity
//!
//! A named catalog entry with an optional hosted image and an ordered
//! list of free-text descriptions.

use serde::{Deserialize, Serialize};

/// A catalog item
///
/// Names are compared case-insensitively (Unicode uppercase) but stored
/// with their original casing. The collection holds at most one item per
/// normalized name; adds against an existing name merge instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, assigned at creation, never reassigned
    pub id: u64,
    /// Item name, non-empty
    pub name: String,
    /// Hosted image URL (None = no image)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Ordered descriptions, append-only outside of edits
    #[serde(default)]
    pub descriptions: Vec<String>,
}

impl Item {
    /// Create a new item with a single description
    pub fn new(id: u64, name: String, image: Option<String>, description: String) -> Self {
        // An empty image string from a form means "no image"
        let image = image.filter(|url| !url.trim().is_empty());
        Self {
            id,
            name,
            image,
            descriptions: vec![description],
        }
    }

    /// Uppercase-normalized name, used for merging and search
    pub fn name_key(&self) -> String {
        self.name.to_uppercase()
    }

    /// Append one description, keeping order
    pub fn push_description(&mut self, description: String) {
        self.descriptions.push(description);
    }

    /// Substring match against the normalized name. The query must
    /// already be uppercased.
    pub fn matches_name(&self, query_upper: &str) -> bool {
        self.name_key().contains(query_upper)
    }

    /// Substring match against any description. The query must already
    /// be uppercased.
    pub fn matches_description(&self, query_upper: &str) -> bool {
        self.descriptions
            .iter()
            .any(|description| description.to_uppercase().contains(query_upper))
    }
}
