//! Embedded HTTP server exposing the list to the host.
//!
//! REST views mirror the list operations, and `/api/websocket` carries the
//! JSON command channel from [`commands`]. List events are pushed to every
//! open socket.

pub mod commands;

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::services;
use crate::shopping::ItemUpdate;
use crate::sync::SyncError;
use crate::AppState;

type SharedState = Arc<AppState>;

/// Body of `POST /api/shopping_list/item`
#[derive(Debug, Deserialize)]
pub struct CreateItem {
    pub name: String,
}

/// Server handle for managing the server lifecycle.
pub struct ShoppingListServer {
    /// Port the server is listening on.
    pub port: u16,
    /// Shutdown signal sender.
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ShoppingListServer {
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Stop the server gracefully.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn error_response(error: SyncError) -> Response {
    match error {
        SyncError::ItemNotFound(_) => message(StatusCode::NOT_FOUND, "Item not found"),
        SyncError::InvalidUpdate => message(StatusCode::BAD_REQUEST, &error.to_string()),
        other => {
            log::error!("Shopping list request failed: {}", other);
            message(StatusCode::BAD_GATEWAY, &other.to_string())
        }
    }
}

async fn get_items(State(state): State<SharedState>) -> Response {
    Json(&*state.shopping.items()).into_response()
}

async fn create_item(State(state): State<SharedState>, Json(body): Json<CreateItem>) -> Response {
    match services::add_item(&state, &body.name).await {
        Ok(items) => Json(&*items).into_response(),
        Err(e) => error_response(e),
    }
}

async fn update_item(
    State(state): State<SharedState>,
    Path(item_id): Path<String>,
    Json(update): Json<ItemUpdate>,
) -> Response {
    match services::update_item(&state, &item_id, &update).await {
        Ok(items) => Json(&*items).into_response(),
        Err(e) => error_response(e),
    }
}

async fn clear_completed(State(state): State<SharedState>) -> Response {
    match services::clear_completed(&state).await {
        Ok(_) => message(StatusCode::OK, "Cleared completed items."),
        Err(e) => error_response(e),
    }
}

async fn websocket(State(state): State<SharedState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = state.events.subscribe();

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                let text = match incoming {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        log::debug!("Websocket receive failed: {}", e);
                        break;
                    }
                };
                let reply = commands::dispatch(&state, text.as_str()).await;
                if sender.send(Message::Text(reply.to_string().into())).await.is_err() {
                    break;
                }
            }
            event = events.recv() => {
                let Ok(event) = event else { continue };
                let payload = json!({"type": "event", "event": event});
                if sender.send(Message::Text(payload.to_string().into())).await.is_err() {
                    break;
                }
            }
        }
    }
}

/// Routes of the host-facing API
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/shopping_list", get(get_items))
        .route("/api/shopping_list/item", post(create_item))
        .route("/api/shopping_list/item/{item_id}", post(update_item))
        .route("/api/shopping_list/clear_completed", post(clear_completed))
        .route("/api/websocket", get(websocket))
        .with_state(state)
}

/// Start the server on `port` (0 picks a free one).
pub async fn start_server(
    state: SharedState,
    port: u16,
) -> Result<ShoppingListServer, Box<dyn std::error::Error + Send + Sync>> {
    let app = router(state);

    let listener = TcpListener::bind(("127.0.0.1", port)).await?;
    let port = listener.local_addr()?.port();

    log::info!("Shopping list server started on http://127.0.0.1:{}", port);

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                log::info!("Shopping list server shutting down");
            })
            .await
            .ok();
    });

    Ok(ShoppingListServer {
        port,
        shutdown_tx: Some(shutdown_tx),
    })
}
