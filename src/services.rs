//! List operations as the host calls them. Every successful change fires
//! `shopping_list_updated`.

use std::collections::BTreeSet;

use crate::shopping::{ItemUpdate, Items};
use crate::sync::SyncError;
use crate::AppState;

/// Add an item with `name`
pub async fn add_item(state: &AppState, name: &str) -> Result<Items, SyncError> {
    let items = state.shopping.add(name).await?;
    state.events.fire_list_updated();
    Ok(items)
}

/// Mark the item called `name` as completed
pub async fn complete_item(state: &AppState, name: &str) -> Result<Items, SyncError> {
    let Some(item) = state.shopping.find_by_name(name) else {
        log::error!("Marking item: {} as completed failed; Item cannot be found", name);
        return Err(SyncError::ItemNotFound(name.to_string()));
    };
    update_item(state, &item.id, &ItemUpdate::complete(true)).await
}

/// Delete the item called `name`
pub async fn clear_item(state: &AppState, name: &str) -> Result<Items, SyncError> {
    let Some(item) = state.shopping.find_by_name(name) else {
        log::error!("Removing item failed: {} cannot be found", name);
        return Err(SyncError::ItemNotFound(name.to_string()));
    };
    let items = state.shopping.clear(&BTreeSet::from([item.id])).await?;
    state.events.fire_list_updated();
    Ok(items)
}

/// Apply `update` to the item with `item_id`, which must be on the list
pub async fn update_item(state: &AppState, item_id: &str, update: &ItemUpdate) -> Result<Items, SyncError> {
    if state.shopping.find_by_id(item_id).is_none() {
        return Err(SyncError::ItemNotFound(item_id.to_string()));
    }
    let items = state.shopping.update(item_id, update).await?;
    state.events.fire_list_updated();
    Ok(items)
}

/// Delete every completed item
pub async fn clear_completed(state: &AppState) -> Result<Items, SyncError> {
    let items = state.shopping.clear_completed().await?;
    state.events.fire_list_updated();
    Ok(items)
}
