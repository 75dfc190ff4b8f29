//! Wire Document Shape
//!
//! The stored collection is `{"items": [...]}`. Reads must also accept
//! the shape where the items sit one level down under a metadata
//! wrapper, `{"record": {"items": [...]}}`.

use serde::{Deserialize, Serialize};

use crate::domain::{CatalogError, DomainResult, Item};

/// The serialized form of the whole collection
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub items: Vec<Item>,
}

/// Normalize a stored document into the item list
pub fn parse_document(value: serde_json::Value) -> DomainResult<Vec<Item>> {
    let items = match value.get("items") {
        Some(items) => items.clone(),
        None => value
            .get("record")
            .and_then(|record| record.get("items"))
            .cloned()
            .ok_or_else(|| CatalogError::Sync("document has no items field".into()))?,
    };
    serde_json::from_value(items)
        .map_err(|e| CatalogError::Sync(format!("malformed item document: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_flat_shape() {
        let value = json!({"items": [{"id": 1, "name": "A", "descriptions": ["x"]}]});
        let items = parse_document(value).expect("parse");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "A");
    }

    #[test]
    fn test_parses_metadata_wrapper() {
        let value = json!({
            "record": {"items": [{"id": 2, "name": "B", "descriptions": []}]},
            "metadata": {"id": "abc", "private": true}
        });
        let items = parse_document(value).expect("parse");
        assert_eq!(items[0].id, 2);
    }

    #[test]
    fn test_rejects_missing_items() {
        let err = parse_document(json!({"record": {}})).unwrap_err();
        assert!(matches!(err, CatalogError::Sync(_)));
    }

    #[test]
    fn test_rejects_non_list_items() {
        let err = parse_document(json!({"items": "nope"})).unwrap_err();
        assert!(matches!(err, CatalogError::Sync(_)));
    }
}
