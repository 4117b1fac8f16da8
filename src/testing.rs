//! In-process stand-in for the ICA API, bound to a random localhost port.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::sync::protocol::{CreateListRequest, Row, ShoppingListSummary, SyncRequest, TICKET_HEADER};
use crate::sync::{AuthSession, IcaClient, SyncClient, SyncConfig, SyncCredentials};

/// `Basic base64("user:pass")`
const EXPECTED_AUTHORIZATION: &str = "Basic dXNlcjpwYXNz";

pub fn credentials() -> SyncCredentials {
    SyncCredentials {
        username: "user".to_string(),
        password: "pass".to_string(),
    }
}

pub fn row(name: &str, id: &str, complete: bool) -> Row {
    Row {
        product_name: name.to_string(),
        offline_id: id.to_string(),
        is_striked_over: complete,
        source_id: -1,
    }
}

pub fn config(base_url: &str) -> SyncConfig {
    SyncConfig {
        username: "user".to_string(),
        password: Some("pass".to_string()),
        list_name: "Groceries".to_string(),
        store_sorting: None,
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        article_groups: None,
    }
}

pub fn sync_client(fake: &FakeIca) -> SyncClient {
    let client = IcaClient::new(&fake.base_url, Duration::from_secs(5)).unwrap();
    SyncClient::new(client, AuthSession::new(credentials(), "Groceries".to_string(), 0))
}

/// Scripted server state plus everything the server observed
#[derive(Debug, Default)]
pub struct FakeState {
    pub lists: Vec<ShoppingListSummary>,
    pub rows: Vec<Row>,
    /// Upcoming list reads/syncs to answer with 401
    pub reject_next: usize,
    pub fail_login: bool,
    pub fail_creation: bool,
    pub fail_status: Option<u16>,
    pub omit_rows: bool,
    pub omit_ticket_header: bool,
    /// Accept list creation but leave the index unchanged
    pub drop_created_list: bool,
    /// Hold list reads this long before answering
    pub delay_rows: Option<Duration>,
    /// Tickets answered with 401 regardless of `reject_next`
    pub revoked_tickets: Vec<String>,

    pub logins: usize,
    pub list_index_fetches: usize,
    pub creations: Vec<CreateListRequest>,
    /// (method, path, ticket) of every list read/sync, rejected ones included
    pub requests: Vec<(String, String, String)>,
    pub sync_bodies: Vec<Value>,
    next_row: usize,
}

impl FakeState {
    pub fn with_list(title: &str, id: &str) -> Self {
        Self {
            lists: vec![ShoppingListSummary {
                title: title.to_string(),
                offline_id: id.to_string(),
            }],
            ..Self::default()
        }
    }

    fn rows_body(&self) -> Value {
        if self.omit_rows {
            json!({"Title": "Groceries"})
        } else {
            json!({"Rows": self.rows})
        }
    }

    fn apply(&mut self, request: SyncRequest) {
        match request {
            SyncRequest::Created(created) => {
                for new_row in created {
                    self.next_row += 1;
                    self.rows.push(Row {
                        product_name: new_row.product_name.to_lowercase(),
                        offline_id: format!("new-{}", self.next_row),
                        is_striked_over: new_row.is_striked_over,
                        source_id: new_row.source_id,
                    });
                }
            }
            SyncRequest::Changed(changed) => {
                for change in changed {
                    if let Some(existing) = self.rows.iter_mut().find(|r| r.offline_id == change.offline_id) {
                        if let Some(done) = change.is_striked_over {
                            existing.is_striked_over = done;
                        }
                        if let Some(name) = change.product_name {
                            existing.product_name = name;
                        }
                    }
                }
            }
            SyncRequest::Deleted(ids) => {
                self.rows.retain(|r| !ids.contains(&r.offline_id));
            }
        }
    }
}

type Shared = Arc<Mutex<FakeState>>;

pub struct FakeIca {
    pub base_url: String,
    state: Shared,
}

impl FakeIca {
    pub async fn start(state: FakeState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/api/login", get(login))
            .route("/api/user/offlineshoppinglists", get(list_index).post(create_list))
            .route("/api/user/offlineshoppinglists/{list_id}", get(read_rows))
            .route(
                "/api/user/offlineshoppinglists/{list_id}/sync",
                axum::routing::post(sync_rows),
            )
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

fn ticket_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get(TICKET_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

async fn login(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == EXPECTED_AUTHORIZATION);
    if state.fail_login || !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    state.logins += 1;
    if state.omit_ticket_header {
        return StatusCode::OK.into_response();
    }
    let ticket = format!("ticket-{}", state.logins);
    (StatusCode::OK, [(TICKET_HEADER, ticket)]).into_response()
}

async fn list_index(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if ticket_of(&headers).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut state = state.lock().unwrap();
    state.list_index_fetches += 1;
    Json(json!({ "ShoppingLists": state.lists })).into_response()
}

async fn create_list(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(request): Json<CreateListRequest>,
) -> Response {
    if ticket_of(&headers).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut state = state.lock().unwrap();
    state.creations.push(request.clone());
    if state.fail_creation {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    if state.drop_created_list {
        return StatusCode::OK.into_response();
    }

    // The service hands back its own id for the list
    state.lists.push(ShoppingListSummary {
        title: request.title,
        offline_id: format!("server-{}", request.offline_id),
    });
    StatusCode::OK.into_response()
}

/// Records the request and decides whether it gets rejected
fn admit(state: &mut FakeState, method: &str, path: String, headers: &HeaderMap) -> Option<Response> {
    let ticket = ticket_of(headers).unwrap_or_default();
    let revoked = state.revoked_tickets.contains(&ticket);
    state.requests.push((method.to_string(), path, ticket));

    if revoked {
        return Some(StatusCode::UNAUTHORIZED.into_response());
    }
    if state.reject_next > 0 {
        state.reject_next -= 1;
        return Some(StatusCode::UNAUTHORIZED.into_response());
    }
    if let Some(status) = state.fail_status {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return Some(status.into_response());
    }
    None
}

async fn read_rows(
    State(state): State<Shared>,
    Path(list_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let delay = state.lock().unwrap().delay_rows;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut state = state.lock().unwrap();
    let path = format!("/api/user/offlineshoppinglists/{}", list_id);
    if let Some(rejection) = admit(&mut state, "GET", path, &headers) {
        return rejection;
    }
    Json(state.rows_body()).into_response()
}

async fn sync_rows(
    State(state): State<Shared>,
    Path(list_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let path = format!("/api/user/offlineshoppinglists/{}/sync", list_id);
    if let Some(rejection) = admit(&mut state, "POST", path, &headers) {
        return rejection;
    }

    state.sync_bodies.push(body.clone());
    match serde_json::from_value::<SyncRequest>(body) {
        Ok(request) => {
            state.apply(request);
            Json(state.rows_body()).into_response()
        }
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}
