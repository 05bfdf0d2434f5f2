//! In-process mock of the admin REST API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::State,
    http::{
        HeaderMap, Method, StatusCode, Uri,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tokio::net::TcpListener;

use peerdesk::api::ApiClient;
use peerdesk::config::parse_base_url;

/// Token every test client sends.
pub const TOKEN: &str = "test-admin-token";

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    /// Path and query, e.g. `/api/bids/pending?page=1`.
    pub target: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Canned reply for a path-and-query.
#[derive(Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str),
}

#[derive(Clone)]
struct MockState {
    origin: String,
    replies: Arc<HashMap<String, Reply>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// A running mock backend.
pub struct MockBackend {
    /// Origin, e.g. `http://127.0.0.1:4711`.
    pub origin: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    /// Starts a server answering each path-and-query in `replies`; anything
    /// else gets a plain-text 404. `{origin}` inside a JSON reply is replaced
    /// with the server's own origin.
    pub async fn start(replies: Vec<(&str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        let origin = format!("http://{addr}");

        let state = MockState {
            origin: origin.clone(),
            replies: Arc::new(
                replies
                    .into_iter()
                    .map(|(target, reply)| (target.to_string(), reply))
                    .collect(),
            ),
            requests: Arc::default(),
        };
        let requests = state.requests.clone();

        let app = Router::new().fallback(handle).with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { origin, requests }
    }

    /// Client rooted at `{origin}/api`.
    pub fn client(&self) -> ApiClient {
        let base_url = parse_base_url(&format!("{}/api", self.origin)).expect("base url");
        ApiClient::with_http(reqwest::Client::new(), base_url, TOKEN)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }
}

/// Success envelope around `data`.
pub fn ok(data: Value) -> Reply {
    Reply::Json(
        StatusCode::OK,
        serde_json::json!({ "success": true, "data": data }),
    )
}

/// Mutation reply.
pub fn outcome(status: StatusCode, success: bool, message: &str) -> Reply {
    Reply::Json(
        status,
        serde_json::json!({ "success": success, "message": message }),
    )
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.requests.lock().expect("requests lock").push(Recorded {
        method,
        target: target.clone(),
        authorization,
        body,
    });

    match state.replies.get(&target) {
        Some(Reply::Json(status, value)) => {
            let body = value.to_string().replace("{origin}", &state.origin);
            (*status, [(CONTENT_TYPE, "application/json")], body).into_response()
        }
        Some(Reply::Text(status, text)) => (*status, *text).into_response(),
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}
