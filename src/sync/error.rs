use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Could not resolve shopping list '{0}'")]
    ListResolution(String),
    #[error("Ticket rejected again after re-authentication")]
    TicketRejected,
    #[error("Remote error: HTTP {status}")]
    Remote { status: u16 },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Update needs either `complete` or `name`")]
    InvalidUpdate,
    #[error("Item not found: {0}")]
    ItemNotFound(String),
}
