//! In-process mock of the Spotify accounts service and Web API.
//!
//! Each test spawns its own server on a random port and points a
//! [`Settings`] at it. The mock records the form of every token request and
//! the ids of every audio-features request so tests can assert on what the
//! client sent.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use sprofcli::config::Settings;
use tokio::{net::TcpListener, sync::oneshot};

pub const VALID_TOKEN: &str = "T";
pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";

#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Status the token endpoint answers with
    pub token_status: StatusCode,
    /// Answer the token request without an `access_token`
    pub omit_access_token: bool,
    /// 1-based index of the audio-features request that fails with 500
    pub fail_features_call: Option<usize>,
    /// Feature records by track id; ids not listed get [`default_record`]
    pub features: HashMap<String, Value>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            token_status: StatusCode::OK,
            omit_access_token: false,
            fail_features_call: None,
            features: HashMap::new(),
        }
    }
}

#[derive(Clone)]
struct MockState {
    config: Arc<MockConfig>,
    token_requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    feature_requests: Arc<Mutex<Vec<Vec<String>>>>,
    search_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub fn default_record(id: &str) -> Value {
    json!({
        "id": id,
        "acousticness": 0.1,
        "danceability": 0.6,
        "energy": 0.5,
        "instrumentalness": 0.0,
        "liveness": 0.2,
        "loudness": -6.0,
        "speechiness": 0.05,
        "tempo": 120.0,
        "valence": 0.25,
        "mode": 1,
        "type": "audio_features",
        "uri": format!("spotify:track:{}", id)
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", VALID_TOKEN))
        .unwrap_or(false)
}

fn track(id: Option<&str>, name: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": id.map(|i| format!("spotify:track:{}", i)),
        "artists": [{ "id": format!("{}-artist", name), "name": artist }]
    })
}

async fn token(State(state): State<MockState>, Form(form): Form<HashMap<String, String>>) -> Response {
    state.token_requests.lock().unwrap().push(form);

    if state.config.token_status != StatusCode::OK {
        return (
            state.config.token_status,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid authorization code" })),
        )
            .into_response();
    }

    if state.config.omit_access_token {
        return Json(json!({ "token_type": "Bearer", "expires_in": 3600 })).into_response();
    }

    Json(json!({
        "access_token": VALID_TOKEN,
        "token_type": "Bearer",
        "scope": "user-read-private user-top-read",
        "expires_in": 3600
    }))
    .into_response()
}

async fn profile(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "id": "user1",
        "display_name": "Ada Lovelace",
        "email": "ada@example.com",
        "country": "GB",
        "product": "premium",
        "images": [
            { "url": "https://i.scdn.co/image/large", "height": 300, "width": 300 },
            { "url": "https://i.scdn.co/image/small", "height": 64, "width": 64 }
        ],
        "followers": { "total": 3 }
    }))
    .into_response()
}

async fn recently_played(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "items": [
            { "track": track(Some("r1"), "Only Shallow", "My Bloody Valentine"), "played_at": "2024-05-01T10:00:00.000Z" },
            { "track": track(None, "Local Demo", "Nobody"), "played_at": "2024-05-01T09:55:00.000Z" },
            { "track": track(Some("r2"), "Alison", "Slowdive"), "played_at": "2024-05-01T09:50:00.000Z" }
        ],
        "next": null,
        "limit": 50
    }))
    .into_response()
}

async fn top_tracks(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let items = match query.get("time_range").map(String::as_str) {
        Some("short_term") => vec![
            track(Some("s1"), "Short One", "A"),
            track(Some("s2"), "Short Two", "B"),
            track(Some("s3"), "Short Three", "C"),
        ],
        Some("long_term") => vec![track(Some("l1"), "Long One", "A"), track(Some("l2"), "Long Two", "B")],
        _ => vec![track(Some("m1"), "Medium One", "A")],
    };
    let total = items.len();
    Json(json!({ "items": items, "total": total })).into_response()
}

async fn top_artists(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "items": [
            { "id": "a1", "name": "Slowdive", "genres": ["shoegaze", "dream pop"] },
            { "id": "a2", "name": "Ride", "genres": ["shoegaze", "indie rock"] },
            { "id": "a3", "name": "Unknown", "genres": [] }
        ]
    }))
    .into_response()
}

async fn search(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.search_queries.lock().unwrap().push(query);
    Json(json!({
        "tracks": {
            "items": [track(Some("g1"), "Genre One", "A"), track(Some("g2"), "Genre Two", "B")],
            "total": 2
        }
    }))
    .into_response()
}

async fn audio_features(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let ids: Vec<String> = query
        .get("ids")
        .map(|ids| {
            ids.split(',')
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let call = {
        let mut requests = state.feature_requests.lock().unwrap();
        requests.push(ids.clone());
        requests.len()
    };

    if state.config.fail_features_call == Some(call) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let records: Vec<Value> = ids
        .iter()
        .map(|id| {
            state
                .config
                .features
                .get(id)
                .cloned()
                .unwrap_or_else(|| default_record(id))
        })
        .collect();

    Json(json!({ "audio_features": records })).into_response()
}

/// Mock server instance; shuts down when dropped.
pub struct MockSpotify {
    pub base_url: String,
    state: MockState,
    _shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockSpotify {
    pub async fn spawn() -> Self {
        Self::spawn_with(MockConfig::default()).await
    }

    pub async fn spawn_with(config: MockConfig) -> Self {
        let state = MockState {
            config: Arc::new(config),
            token_requests: Arc::default(),
            feature_requests: Arc::default(),
            search_queries: Arc::default(),
        };

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me", get(profile))
            .route("/v1/me/player/recently-played", get(recently_played))
            .route("/v1/me/top/tracks", get(top_tracks))
            .route("/v1/me/top/artists", get(top_artists))
            .route("/v1/search", get(search))
            .route("/v1/audio-features", get(audio_features))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Mock server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Settings pointing at this mock, authenticating with a client secret.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::new(CLIENT_ID);
        settings.client_secret = Some(CLIENT_SECRET.to_string());
        settings.token_url = format!("{}/api/token", self.base_url);
        settings.api_url = format!("{}/v1", self.base_url);
        settings
    }

    pub fn token_requests(&self) -> Vec<HashMap<String, String>> {
        self.state.token_requests.lock().unwrap().clone()
    }

    pub fn feature_requests(&self) -> Vec<Vec<String>> {
        self.state.feature_requests.lock().unwrap().clone()
    }

    pub fn search_queries(&self) -> Vec<HashMap<String, String>> {
        self.state.search_queries.lock().unwrap().clone()
    }
}
