use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};

use crate::sync::config::SyncCredentials;
use crate::sync::error::SyncError;
use crate::sync::protocol::{
    CreateListRequest, ShoppingListsEnvelope, SyncRequest, TICKET_HEADER,
};

/// Path of the list collection, relative to the base URL
pub const LISTS_PATH: &str = "/api/user/offlineshoppinglists";

const LOGIN_PATH: &str = "/api/login";

/// Session ticket issued by the login endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct AuthTicket(String);

impl AuthTicket {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthTicket(<redacted>)")
    }
}

/// HTTP client for the ICA API
///
/// Each method maps one endpoint. Retrying and ticket bookkeeping live in
/// [`crate::sync::SyncClient`]; this layer only speaks HTTP.
#[derive(Clone)]
pub struct IcaClient {
    client: Client,
    base_url: String,
}

impl IcaClient {
    /// Create a new client for `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SyncError> {
        // Normalize URL - ensure no trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(30)))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Build full URL for a path
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET /api/login with basic auth, returning the issued ticket
    pub async fn login(&self, credentials: &SyncCredentials) -> Result<AuthTicket, SyncError> {
        let response = self
            .client
            .get(self.url(LOGIN_PATH))
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            log::error!("Login returned HTTP {}", status.as_u16());
            return Err(SyncError::Auth(format!("login returned HTTP {}", status.as_u16())));
        }

        let ticket = response
            .headers()
            .get(TICKET_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SyncError::Auth(format!("login response carried no {} header", TICKET_HEADER)))?;

        log::debug!("Login returned OK {}", status.as_u16());
        Ok(AuthTicket::new(ticket))
    }

    /// GET the index of all lists owned by the user
    pub async fn shopping_lists(&self, ticket: &AuthTicket) -> Result<ShoppingListsEnvelope, SyncError> {
        let response = self.send(Method::GET, LISTS_PATH, ticket, None).await?;
        let status = response.status();
        if !status.is_success() {
            log::error!("Fetching shopping lists returned HTTP {}", status.as_u16());
            return Err(SyncError::Remote {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a new list. Returns the status so the caller decides what failure means.
    pub async fn create_list(
        &self,
        ticket: &AuthTicket,
        request: &CreateListRequest,
    ) -> Result<StatusCode, SyncError> {
        let response = self
            .client
            .post(self.url(LISTS_PATH))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(TICKET_HEADER, ticket.as_str())
            .json(request)
            .send()
            .await?;

        Ok(response.status())
    }

    /// Issue an authenticated request without interpreting the status
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        ticket: &AuthTicket,
        body: Option<&SyncRequest>,
    ) -> Result<Response, SyncError> {
        let url = self.url(path);
        log::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(TICKET_HEADER, ticket.as_str());

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}
