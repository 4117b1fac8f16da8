use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::sync::protocol::{CreatedRow, RowsEnvelope, SyncRequest, LOCAL_SOURCE_ID};
use crate::sync::{SyncClient, SyncError};

use super::groups::ArticleGroupLookup;
use super::item::{Item, ItemUpdate};

/// Snapshot of the mirrored list
pub type Items = Arc<Vec<Item>>;

/// In-memory mirror of the remote list.
///
/// Every successful call swaps in the row set from its own response; nothing
/// is merged with what was there before. Readers get an `Arc` snapshot, so a
/// swap never tears a read.
pub struct ShoppingData {
    client: SyncClient,
    groups: Box<dyn ArticleGroupLookup>,
    items: RwLock<Items>,
    /// Serializes mutations so snapshots land in request order
    op_lock: Mutex<()>,
}

impl ShoppingData {
    pub fn new(client: SyncClient, groups: Box<dyn ArticleGroupLookup>) -> Self {
        Self {
            client,
            groups,
            items: RwLock::new(Arc::new(Vec::new())),
            op_lock: Mutex::new(()),
        }
    }

    /// Current items
    pub fn items(&self) -> Items {
        Arc::clone(&self.items.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// The newest `count` items, newest first
    pub fn last_items(&self, count: usize) -> Vec<Item> {
        self.items().iter().rev().take(count).cloned().collect()
    }

    /// First item whose display name equals `name`
    pub fn find_by_name(&self, name: &str) -> Option<Item> {
        self.items().iter().find(|item| item.name == name).cloned()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Item> {
        self.items().iter().find(|item| item.id == id).cloned()
    }

    fn replace(&self, envelope: RowsEnvelope) -> Items {
        let items: Items = Arc::new(envelope.rows.into_iter().map(Item::from).collect());
        *self.items.write().unwrap_or_else(|e| e.into_inner()) = Arc::clone(&items);
        log::debug!("Mirror now holds {} items", items.len());
        items
    }

    /// Fetch the list. On failure the mirror is emptied and the error returned.
    pub async fn load(&self) -> Result<Items, SyncError> {
        let _guard = self.op_lock.lock().await;
        match self.client.fetch_rows().await {
            Ok(envelope) => Ok(self.replace(envelope)),
            Err(e) => {
                log::error!("Failed to load shopping list data: {}", e);
                *self.items.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(Vec::new());
                Err(e)
            }
        }
    }

    /// Add a product, filed under its article group
    pub async fn add(&self, name: &str) -> Result<Items, SyncError> {
        let row = CreatedRow {
            product_name: name.to_string(),
            is_striked_over: false,
            source_id: LOCAL_SOURCE_ID,
            article_group_id: self.groups.group_for(name),
        };
        log::debug!("Adding product: {:?}", row);
        self.submit(SyncRequest::Created(vec![row])).await
    }

    /// Toggle completion or rename an item
    pub async fn update(&self, item_id: &str, update: &ItemUpdate) -> Result<Items, SyncError> {
        let change = update.to_change(item_id)?;
        log::debug!("Updating product: {:?}", change);
        self.submit(SyncRequest::Changed(vec![change])).await
    }

    /// Delete the given items
    pub async fn clear(&self, item_ids: &BTreeSet<String>) -> Result<Items, SyncError> {
        log::debug!("Items to delete: {:?}", item_ids);
        self.submit(SyncRequest::Deleted(item_ids.iter().cloned().collect())).await
    }

    /// Delete every item currently marked complete
    pub async fn clear_completed(&self) -> Result<Items, SyncError> {
        // Scan under the lock so a concurrent completion is not missed
        let _guard = self.op_lock.lock().await;
        let completed: BTreeSet<String> = self
            .items()
            .iter()
            .filter(|item| item.complete)
            .map(|item| item.id.clone())
            .collect();
        log::debug!("Items to delete: {:?}", completed);
        self.submit_locked(SyncRequest::Deleted(completed.into_iter().collect()))
            .await
    }

    async fn submit(&self, request: SyncRequest) -> Result<Items, SyncError> {
        let _guard = self.op_lock.lock().await;
        self.submit_locked(request).await
    }

    /// Send a mutation with `op_lock` held; a failure leaves the mirror as it was
    async fn submit_locked(&self, request: SyncRequest) -> Result<Items, SyncError> {
        let envelope = self.client.sync(&request).await.map_err(|e| {
            log::error!("Failed to sync shopping list: {}", e);
            e
        })?;
        Ok(self.replace(envelope))
    }
}
