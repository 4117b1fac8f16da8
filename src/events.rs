use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// Event type fired after every change to the list
pub const EVENT_LIST_UPDATED: &str = "shopping_list_updated";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEvent {
    pub event_type: String,
    pub fired_at: DateTime<Utc>,
}

/// Publish/subscribe channel for list events
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ShoppingListEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShoppingListEvent> {
        self.tx.subscribe()
    }

    /// Fire `shopping_list_updated`. Returns the number of subscribers reached.
    pub fn fire_list_updated(&self) -> usize {
        let event = ShoppingListEvent {
            event_type: EVENT_LIST_UPDATED.to_string(),
            fired_at: Utc::now(),
        };
        // No subscribers is fine
        self.tx.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
