//! Catalog Service
//!
//! The operation layer tying the in-memory collection to the access gate
//! and a persistence backend. Mutations commit locally first; the remote
//! save is fire-and-forget from the caller's point of view. A failed
//! save is kept as a transient error instead of rolling back, so local
//! state stays authoritative for the session and remote divergence is
//! only reconciled by the next full hydrate.


use std::sync::Arc;

use chrono::Utc;

use crate::auth::AccessGate;
use crate::domain::{CatalogError, DomainResult, Item, UserSession};
use crate::repository::CatalogStore;

/// Edited fields submitted by the update operation
///
/// Empty `name`/`image` mean "keep the current value". A non-empty
/// snapshot replaces the existing descriptions wholesale (entries
/// trimmed, blanks dropped); `description` is appended afterwards when
/// non-empty. Both edit modes ride one call so a single save covers
/// both.
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    pub name: String,
    pub image: String,
    pub description: String,
    pub existing_descriptions: Vec<String>,
}

/// In-memory catalog plus its operations
pub struct CatalogService {
    items: Vec<Item>,
    store: Arc<dyn CatalogStore>,
    gate: Option<AccessGate>,
    delete_secret: String,
    sync_error: Option<CatalogError>,
}

impl CatalogService {
    /// A service without a gate permits mutations to anyone (the
    /// unauthenticated variants); with a gate, mutations require an
    /// allow-listed session.
    pub fn new(
        store: Arc<dyn CatalogStore>,
        gate: Option<AccessGate>,
        delete_secret: impl Into<String>,
    ) -> Self {
        Self {
            items: Vec::new(),
            store,
            gate,
            delete_secret: delete_secret.into(),
            sync_error: None,
        }
    }

    /// Current collection, insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Last remote save/load failure, cleared by the next success
    pub fn sync_error(&self) -> Option<&CatalogError> {
        self.sync_error.as_ref()
    }

    /// Replace the in-memory collection with the stored document. A load
    /// failure leaves the current items in place.
    pub async fn hydrate(&mut self) -> DomainResult<()> {
        match self.store.load().await {
            Ok(items) => {
                log::info!("catalog hydrated, {} items", items.len());
                self.items = items;
                self.sync_error = None;
                Ok(())
            }
            Err(e) => {
                log::warn!("catalog load failed: {}", e);
                self.sync_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Add an item, merging into an existing one when the name matches
    /// case-insensitively (the image argument is ignored on the merge
    /// path). Returns the affected item.
    pub async fn add_item(
        &mut self,
        actor: Option<&UserSession>,
        name: &str,
        image: Option<String>,
        description: &str,
    ) -> DomainResult<Item> {
        self.authorize(actor)?;
        if name.trim().is_empty() || description.trim().is_empty() {
            return Err(CatalogError::Validation(
                "name and description are required".into(),
            ));
        }

        let key = name.to_uppercase();
        let item = match self.items.iter().position(|item| item.name_key() == key) {
            Some(index) => {
                // Same name: append the description instead of duplicating
                let existing = &mut self.items[index];
                existing.push_description(description.to_string());
                existing.clone()
            }
            None => {
                let item = Item::new(
                    next_item_id(&self.items),
                    name.to_string(),
                    image,
                    description.to_string(),
                );
                self.items.push(item.clone());
                item
            }
        };

        self.push_remote().await;
        Ok(item)
    }

    /// Remove an item by id. The supplied secret must match the
    /// configured one; removal of an absent id is a no-op.
    pub async fn delete_item(
        &mut self,
        actor: Option<&UserSession>,
        target_id: u64,
        secret: &str,
    ) -> DomainResult<()> {
        self.authorize(actor)?;
        if secret != self.delete_secret {
            return Err(CatalogError::Authorization("wrong delete password".into()));
        }

        self.items.retain(|item| item.id != target_id);
        self.push_remote().await;
        Ok(())
    }

    /// Apply an edit to an item. Returns None (and does nothing) when
    /// the id is unknown.
    pub async fn update_item(
        &mut self,
        actor: Option<&UserSession>,
        target_id: u64,
        edit: ItemEdit,
    ) -> DomainResult<Option<Item>> {
        self.authorize(actor)?;
        let Some(item) = self.items.iter_mut().find(|item| item.id == target_id) else {
            return Ok(None);
        };

        if !edit.name.trim().is_empty() {
            item.name = edit.name.trim().to_string();
        }
        if !edit.image.trim().is_empty() {
            item.image = Some(edit.image.trim().to_string());
        }

        // Bulk correction first, then the incremental append
        let mut descriptions = if edit.existing_descriptions.is_empty() {
            item.descriptions.clone()
        } else {
            edit.existing_descriptions
                .iter()
                .map(|description| description.trim())
                .filter(|description| !description.is_empty())
                .map(str::to_string)
                .collect()
        };
        let appended = edit.description.trim();
        if !appended.is_empty() {
            descriptions.push(appended.to_string());
        }
        item.descriptions = descriptions;
        let updated = item.clone();

        self.push_remote().await;
        Ok(Some(updated))
    }

    /// Filtered view over the collection: per-field case-insensitive
    /// substring match, an empty query matches everything for its field,
    /// and both fields must match. Never mutates, preserves order.
    pub fn filtered<'a>(
        &'a self,
        name_query: &str,
        description_query: &str,
    ) -> impl Iterator<Item = &'a Item> + 'a {
        let name_query = name_query.trim().to_uppercase();
        let description_query = description_query.trim().to_uppercase();
        self.items.iter().filter(move |item| {
            let name_match = name_query.is_empty() || item.matches_name(&name_query);
            let description_match =
                description_query.is_empty() || item.matches_description(&description_query);
            name_match && description_match
        })
    }

    fn authorize(&self, actor: Option<&UserSession>) -> DomainResult<()> {
        let Some(gate) = &self.gate else {
            return Ok(());
        };
        match actor {
            Some(user) if gate.is_authorized(&user.email) => Ok(()),
            Some(user) => Err(CatalogError::Authorization(format!(
                "{} may not modify items",
                user.email
            ))),
            None => Err(CatalogError::Authorization("sign in required".into())),
        }
    }

    /// Push the whole collection to the store. The local mutation has
    /// already happened and is never rolled back; a failure is recorded
    /// for the caller to surface.
    async fn push_remote(&mut self) {
        match self.store.save(&self.items).await {
            Ok(()) => {
                self.sync_error = None;
            }
            Err(e) => {
                log::warn!("catalog save failed: {}", e);
                self.sync_error = Some(e);
            }
        }
    }
}

/// Fresh id: creation time in epoch milliseconds, bumped past any
/// collision from adds landing in the same millisecond
fn next_item_id(items: &[Item]) -> u64 {
    let mut id = Utc::now().timestamp_millis() as u64;
    while items.iter().any(|item| item.id == id) {
        id += 1;
    }
    id
}
