pub mod config;
pub mod ica;
pub mod protocol;

mod client;
mod error;
mod resolver;
mod session;

pub use client::{Endpoint, SyncClient};
pub use config::{ConfigError, SyncConfig, SyncCredentials};
pub use error::SyncError;
pub use ica::{AuthTicket, IcaClient};
pub use protocol::{ChangedRow, CreatedRow, Row, RowsEnvelope, SyncRequest};
pub use resolver::{generate_offline_id, resolve_list};
pub use session::{AuthSession, ListHandle, Session};
