//! In-process fakes of the Gemini and Spotify HTTP APIs.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

async fn serve(app: Router) -> (String, tokio::sync::oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake server");
    let port = listener.local_addr().expect("No local address").port();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .expect("Fake server failed");
    });
    (format!("http://127.0.0.1:{}", port), shutdown_tx)
}

/// What the fake Gemini endpoint answers.
#[derive(Clone, Debug)]
pub enum GeminiBehavior {
    /// Wrap this text as the first candidate's first part.
    Reply(String),
    /// Respond with this HTTP status and an error body.
    Status(u16),
    /// Valid envelope without candidates.
    NoCandidates,
    /// Hold the request for this long before answering.
    Hang(Duration),
}

#[derive(Clone)]
struct GeminiState {
    behavior: GeminiBehavior,
    calls: Arc<Mutex<Vec<GeminiCall>>>,
}

#[derive(Clone, Debug)]
pub struct GeminiCall {
    pub path: String,
    pub api_key: Option<String>,
    pub body: serde_json::Value,
}

pub struct FakeGemini {
    pub base_url: String,
    calls: Arc<Mutex<Vec<GeminiCall>>>,
    _shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

async fn gemini_generate(
    State(state): State<GeminiState>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.calls.lock().unwrap().push(GeminiCall {
        path: call,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match &state.behavior {
        GeminiBehavior::Reply(text) => Json(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        }))
        .into_response(),
        GeminiBehavior::Status(status) => (
            StatusCode::from_u16(*status).unwrap(),
            Json(serde_json::json!({"error": {"message": "fake failure"}})),
        )
            .into_response(),
        GeminiBehavior::NoCandidates => {
            Json(serde_json::json!({"promptFeedback": {"blockReason": "OTHER"}})).into_response()
        }
        GeminiBehavior::Hang(delay) => {
            tokio::time::sleep(*delay).await;
            Json(serde_json::json!({"candidates": []})).into_response()
        }
    }
}

impl FakeGemini {
    pub async fn spawn(behavior: GeminiBehavior) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = GeminiState {
            behavior,
            calls: calls.clone(),
        };
        let app = Router::new()
            .route("/models/{call}", post(gemini_generate))
            .with_state(state);
        let (base_url, shutdown_tx) = serve(app).await;
        Self {
            base_url,
            calls,
            _shutdown_tx: shutdown_tx,
        }
    }

    pub fn calls(&self) -> Vec<GeminiCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct SpotifyState {
    fail_search: bool,
    rejected_searches: Arc<Mutex<usize>>,
    token_requests: Arc<Mutex<usize>>,
    searches: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub struct FakeSpotify {
    pub base_url: String,
    token_requests: Arc<Mutex<usize>>,
    searches: Arc<Mutex<Vec<HashMap<String, String>>>>,
    _shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

async fn spotify_token(State(state): State<SpotifyState>, headers: HeaderMap) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("Basic "))
        .unwrap_or(false);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    *state.token_requests.lock().unwrap() += 1;
    Json(serde_json::json!({
        "access_token": "fake-token",
        "token_type": "Bearer",
        "expires_in": 3600
    }))
    .into_response()
}

async fn spotify_search(
    State(state): State<SpotifyState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer fake-token") {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.searches.lock().unwrap().push(params.clone());
    {
        let mut rejected = state.rejected_searches.lock().unwrap();
        if *rejected > 0 {
            *rejected -= 1;
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }
    if state.fail_search {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let query = params.get("q").cloned().unwrap_or_default();
    Json(serde_json::json!({
        "tracks": {
            "items": [
                {
                    "name": format!("{} anthem", query),
                    "artists": [{"name": "Fake Artist"}],
                    "external_urls": {"spotify": "https://open.spotify.com/track/fake1"},
                    "preview_url": "https://p.scdn.co/mp3-preview/fake1"
                },
                {
                    "name": format!("{} b-side", query),
                    "artists": [{"name": "Fake Artist"}],
                    "external_urls": {"spotify": "https://open.spotify.com/track/fake2"},
                    "preview_url": null
                }
            ]
        }
    }))
    .into_response()
}

impl FakeSpotify {
    pub async fn spawn(fail_search: bool) -> Self {
        Self::spawn_with(fail_search, 0).await
    }

    /// Answers the first `count` searches with 401 even for a valid token.
    pub async fn spawn_rejecting_searches(count: usize) -> Self {
        Self::spawn_with(false, count).await
    }

    async fn spawn_with(fail_search: bool, rejected_searches: usize) -> Self {
        let token_requests = Arc::new(Mutex::new(0));
        let searches = Arc::new(Mutex::new(Vec::new()));
        let state = SpotifyState {
            fail_search,
            rejected_searches: Arc::new(Mutex::new(rejected_searches)),
            token_requests: token_requests.clone(),
            searches: searches.clone(),
        };
        let app = Router::new()
            .route("/api/token", post(spotify_token))
            .route("/v1/search", get(spotify_search))
            .with_state(state);
        let (base_url, shutdown_tx) = serve(app).await;
        Self {
            base_url,
            token_requests,
            searches,
            _shutdown_tx: shutdown_tx,
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.base_url)
    }

    pub fn api_base(&self) -> String {
        format!("{}/v1", self.base_url)
    }

    pub fn token_requests(&self) -> usize {
        *self.token_requests.lock().unwrap()
    }

    pub fn searches(&self) -> Vec<HashMap<String, String>> {
        self.searches.lock().unwrap().clone()
    }
}
