//! Ticket and list handle for the running process.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Mutex;

use super::config::SyncCredentials;
use super::error::SyncError;
use super::ica::{AuthTicket, IcaClient};
use super::resolver::resolve_list;

/// A list title together with the identifier the service knows it by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListHandle {
    pub name: String,
    pub id: String,
}

/// Ticket plus the list it was resolved against
#[derive(Debug, Clone)]
pub struct Session {
    pub ticket: AuthTicket,
    pub list: ListHandle,
}

/// Authentication state. `Expired` doubles as the initial state.
#[derive(Debug)]
enum SessionState {
    Expired,
    Authenticated(Session),
}

/// Owns the cached ticket and list handle.
///
/// A ticket is trusted until a request comes back 401. Refresh runs with the
/// state lock held, so concurrent callers wait for one login instead of
/// starting their own.
pub struct AuthSession {
    credentials: SyncCredentials,
    list_name: String,
    sorting_store: i64,
    state: Mutex<SessionState>,
    authentications: AtomicUsize,
}

impl AuthSession {
    pub fn new(credentials: SyncCredentials, list_name: String, sorting_store: i64) -> Self {
        Self {
            credentials,
            list_name,
            sorting_store,
            state: Mutex::new(SessionState::Expired),
            authentications: AtomicUsize::new(0),
        }
    }

    /// Return the cached session, authenticating first if there is none
    pub async fn ensure_ticket(&self, client: &IcaClient) -> Result<Session, SyncError> {
        let mut state = self.state.lock().await;
        if let SessionState::Authenticated(session) = &*state {
            return Ok(session.clone());
        }

        let session = self.authenticate(client).await?;
        *state = SessionState::Authenticated(session.clone());
        Ok(session)
    }

    /// Drop the cached session if it still holds `stale`.
    ///
    /// Returns false when another caller already replaced the ticket.
    pub async fn invalidate(&self, stale: &AuthTicket) -> bool {
        let mut state = self.state.lock().await;
        match &*state {
            SessionState::Authenticated(session) if &session.ticket == stale => {
                log::info!("Ticket expired. Acquiring a new one");
                *state = SessionState::Expired;
                true
            }
            _ => false,
        }
    }

    /// Currently cached session, without authenticating
    pub async fn current(&self) -> Option<Session> {
        match &*self.state.lock().await {
            SessionState::Authenticated(session) => Some(session.clone()),
            SessionState::Expired => None,
        }
    }

    /// Number of successful logins so far
    pub fn authentications(&self) -> usize {
        self.authentications.load(Ordering::SeqCst)
    }

    /// Log in and resolve (or create) the list with the fresh ticket
    async fn authenticate(&self, client: &IcaClient) -> Result<Session, SyncError> {
        let ticket = client
            .login(&self.credentials)
            .await
            .map_err(|e| match e {
                SyncError::Http(e) => SyncError::Auth(format!("login endpoint unreachable: {}", e)),
                other => other,
            })?;
        self.authentications.fetch_add(1, Ordering::SeqCst);

        let id = resolve_list(client, &ticket, &self.list_name, self.sorting_store).await?;
        log::debug!("Authenticated, list '{}' is {}", self.list_name, id);

        Ok(Session {
            ticket,
            list: ListHandle {
                name: self.list_name.clone(),
                id,
            },
        })
    }
}
