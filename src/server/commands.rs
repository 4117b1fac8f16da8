//! JSON command channel carried over the websocket.
//!
//! Requests look like `{"id": 5, "type": "shopping_list/items/add", "name": "Kaffe"}`;
//! every request gets exactly one `result` message with the same `id`.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::services;
use crate::shopping::{ItemUpdate, Items};
use crate::sync::SyncError;
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    #[serde(rename = "shopping_list/items")]
    Items { id: u64 },
    #[serde(rename = "shopping_list/items/add")]
    Add { id: u64, name: String },
    #[serde(rename = "shopping_list/items/update")]
    Update {
        id: u64,
        item_id: String,
        #[serde(flatten)]
        update: ItemUpdate,
    },
    #[serde(rename = "shopping_list/items/clear")]
    Clear { id: u64 },
}

impl Command {
    pub fn id(&self) -> u64 {
        match self {
            Command::Items { id }
            | Command::Add { id, .. }
            | Command::Update { id, .. }
            | Command::Clear { id } => *id,
        }
    }
}

fn items_value(items: &Items) -> Value {
    serde_json::to_value(&**items).unwrap_or(Value::Null)
}

fn result_message(id: u64, result: Value) -> Value {
    json!({"id": id, "type": "result", "success": true, "result": result})
}

fn error_message(id: Option<u64>, code: &str, message: &str) -> Value {
    json!({
        "id": id,
        "type": "result",
        "success": false,
        "error": {"code": code, "message": message}
    })
}

fn sync_error_message(id: u64, error: &SyncError) -> Value {
    match error {
        SyncError::ItemNotFound(_) => error_message(Some(id), "item_not_found", "Item not found"),
        SyncError::InvalidUpdate => error_message(Some(id), "invalid_format", &error.to_string()),
        other => error_message(Some(id), "unknown_error", &other.to_string()),
    }
}

/// Run one command and build its reply
pub async fn execute(state: &AppState, command: Command) -> Value {
    let id = command.id();
    let outcome = match command {
        Command::Items { .. } => Ok(items_value(&state.shopping.items())),
        Command::Add { name, .. } => services::add_item(state, &name).await.map(|items| items_value(&items)),
        Command::Update { item_id, update, .. } => services::update_item(state, &item_id, &update)
            .await
            .map(|items| items_value(&items)),
        Command::Clear { .. } => services::clear_completed(state).await.map(|_| Value::Null),
    };

    match outcome {
        Ok(result) => result_message(id, result),
        Err(e) => sync_error_message(id, &e),
    }
}

/// Parse a raw text frame and run it
pub async fn dispatch(state: &AppState, text: &str) -> Value {
    match serde_json::from_str::<Command>(text) {
        Ok(command) => execute(state, command).await,
        Err(e) => {
            let id = serde_json::from_str::<Value>(text)
                .ok()
                .and_then(|v| v.get("id").and_then(Value::as_u64));
            log::debug!("Rejected websocket message: {}", e);
            error_message(id, "invalid_format", &e.to_string())
        }
    }
}
