use reqwest::{Method, Response, StatusCode};

use super::config::{SyncConfig, SyncCredentials};
use super::error::SyncError;
use super::ica::{IcaClient, LISTS_PATH};
use super::protocol::{RowsEnvelope, SyncRequest};
use super::session::AuthSession;

/// Resource on the resolved list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET .../{list_id}`
    Rows,
    /// `POST .../{list_id}/sync`
    Sync,
}

impl Endpoint {
    pub fn path(&self, list_id: &str) -> String {
        match self {
            Endpoint::Rows => format!("{}/{}", LISTS_PATH, list_id),
            Endpoint::Sync => format!("{}/{}/sync", LISTS_PATH, list_id),
        }
    }
}

/// Reads and writes the mirrored list.
///
/// A 401 invalidates the ticket and the request is sent once more with fresh
/// credentials. A second 401 is reported as [`SyncError::TicketRejected`].
pub struct SyncClient {
    client: IcaClient,
    session: AuthSession,
}

impl SyncClient {
    pub fn new(client: IcaClient, session: AuthSession) -> Self {
        Self { client, session }
    }

    /// Build a client from the loaded config and resolved credentials
    pub fn from_config(config: &SyncConfig, credentials: SyncCredentials) -> Result<Self, SyncError> {
        let client = IcaClient::new(config.base_url(), config.request_timeout())?;
        let session = AuthSession::new(credentials, config.list_name.clone(), config.sorting_store());
        Ok(Self::new(client, session))
    }

    /// Current rows of the list
    pub async fn fetch_rows(&self) -> Result<RowsEnvelope, SyncError> {
        self.request(Method::GET, Endpoint::Rows, None).await
    }

    /// Submit a mutation; the answer is the full row set after it was applied
    pub async fn sync(&self, request: &SyncRequest) -> Result<RowsEnvelope, SyncError> {
        self.request(Method::POST, Endpoint::Sync, Some(request)).await
    }

    pub async fn request(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<&SyncRequest>,
    ) -> Result<RowsEnvelope, SyncError> {
        let session = self.session.ensure_ticket(&self.client).await?;
        let response = self
            .client
            .send(method.clone(), &endpoint.path(&session.list.id), &session.ticket, body)
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::parse(response).await;
        }

        self.session.invalidate(&session.ticket).await;
        let session = self.session.ensure_ticket(&self.client).await?;
        let retry = self
            .client
            .send(method, &endpoint.path(&session.list.id), &session.ticket, body)
            .await?;

        if retry.status() == StatusCode::UNAUTHORIZED {
            log::error!("Ticket rejected again after re-authentication");
            self.session.invalidate(&session.ticket).await;
            return Err(SyncError::TicketRejected);
        }

        Self::parse(retry).await
    }

    async fn parse(response: Response) -> Result<RowsEnvelope, SyncError> {
        let status = response.status();
        if !status.is_success() {
            log::error!("API request returned error {}", status.as_u16());
            return Err(SyncError::Remote {
                status: status.as_u16(),
            });
        }

        log::debug!("API request returned OK {}", status.as_u16());
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
