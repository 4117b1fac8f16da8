//! Voice-style intents: add an item, read back the latest items.

use std::collections::HashMap;

use thiserror::Error;

use crate::services;
use crate::sync::SyncError;
use crate::AppState;

pub const INTENT_ADD_ITEM: &str = "HassShoppingListAddItem";
pub const INTENT_LAST_ITEMS: &str = "HassShoppingListLastItems";

/// How many items the last-items intent reads back
const LAST_ITEMS_COUNT: usize = 5;

#[derive(Error, Debug)]
pub enum IntentError {
    #[error("Unknown intent: {0}")]
    Unknown(String),
    #[error("Missing slot: {0}")]
    MissingSlot(&'static str),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddItem { item: String },
    LastItems,
}

impl Intent {
    /// Build an intent from its type name and slot values
    pub fn parse(intent_type: &str, slots: &HashMap<String, String>) -> Result<Self, IntentError> {
        match intent_type {
            INTENT_ADD_ITEM => {
                let item = slots
                    .get("item")
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .ok_or(IntentError::MissingSlot("item"))?;
                Ok(Intent::AddItem {
                    item: item.to_string(),
                })
            }
            INTENT_LAST_ITEMS => Ok(Intent::LastItems),
            other => Err(IntentError::Unknown(other.to_string())),
        }
    }
}

/// Spoken answer to an intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentResponse {
    pub speech: String,
}

pub async fn handle(state: &AppState, intent: &Intent) -> Result<IntentResponse, IntentError> {
    let speech = match intent {
        Intent::AddItem { item } => {
            services::add_item(state, item).await?;
            format!("I've added {} to your shopping list", item)
        }
        Intent::LastItems => {
            let items = state.shopping.last_items(LAST_ITEMS_COUNT);
            if items.is_empty() {
                "There are no items on your shopping list".to_string()
            } else {
                let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
                format!(
                    "These are the top {} items on your shopping list: {}",
                    items.len(),
                    names.join(", ")
                )
            }
        }
    };

    Ok(IntentResponse { speech })
}
