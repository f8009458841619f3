//! HTTP Mock Server for the ElevenLabs API
//!
//! Serves `/v1/voices`, `/v1/text-to-speech/{voice_id}` and preview clips from an
//! in-process axum server. Responses follow a [`MockScript`] that tests can change
//! between requests.

use super::MockStats;
use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, Response, StatusCode},
    routing::{get, post},
};
use futures_util::stream;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

/// One voice in the mocked catalog.
#[derive(Clone, Debug)]
pub struct MockVoice {
    pub voice_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Serve a preview clip for this voice
    pub has_preview: bool,
}

impl MockVoice {
    pub fn new(voice_id: &str, name: &str) -> Self {
        Self {
            voice_id: voice_id.to_string(),
            name: name.to_string(),
            description: None,
            has_preview: false,
        }
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_preview(mut self) -> Self {
        self.has_preview = true;
        self
    }
}

/// Scripted responses of the mock.
#[derive(Clone, Debug)]
pub struct MockScript {
    /// Key accepted by the mock; any other key gets a 401
    pub valid_key: String,
    pub voices: Vec<MockVoice>,
    /// Status and body returned by text-to-speech
    pub tts_status: u16,
    pub tts_body: Vec<u8>,
    /// Drop the connection mid-response instead of sending audio
    pub tts_hang_up: bool,
    /// Preview bytes; `None` makes every preview 404
    pub preview_body: Option<Vec<u8>>,
}

impl Default for MockScript {
    fn default() -> Self {
        Self {
            valid_key: "valid-key".to_string(),
            voices: vec![
                MockVoice::new("v1", "Anastasia").described("Warm narrator"),
                MockVoice::new("v2", "Bob")
                    .described("Deep banana baritone")
                    .with_preview(),
            ],
            tts_status: 200,
            tts_body: b"ID3\x04mock-audio".to_vec(),
            tts_hang_up: false,
            preview_body: Some(b"ID3\x04preview".to_vec()),
        }
    }
}

/// HTTP Mock Server State
pub struct HttpMockState {
    pub base_url: Url,
    pub script: Mutex<MockScript>,
    pub stats: MockStats,
    /// JSON body of the most recent text-to-speech request
    pub last_tts_request: Mutex<Option<Value>>,
}

impl HttpMockState {
    fn script(&self) -> MockScript {
        self.script.lock().unwrap().clone()
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let valid_key = self.script.lock().unwrap().valid_key.clone();
        headers
            .get("xi-api-key")
            .and_then(|v| v.to_str().ok())
            .map(|key| key == valid_key)
            .unwrap_or(false)
    }
}

fn unauthorized() -> Response<Body> {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header("Content-Type", "application/json")
        .body(Body::from(
            r#"{"detail":{"status":"invalid_api_key","message":"Invalid API key"}}"#,
        ))
        .unwrap()
}

/// Voices endpoint handler
async fn voices_handler(
    State(state): State<Arc<HttpMockState>>,
    headers: HeaderMap,
) -> Response<Body> {
    state.stats.record_voices();
    if !state.authorized(&headers) {
        return unauthorized();
    }

    let voices: Vec<Value> = state
        .script()
        .voices
        .iter()
        .map(|voice| {
            let preview_url = voice.has_preview.then(|| {
                state
                    .base_url
                    .join(&format!("previews/{}.mp3", voice.voice_id))
                    .unwrap()
                    .to_string()
            });
            json!({
                "voice_id": voice.voice_id,
                "name": voice.name,
                "description": voice.description,
                "preview_url": preview_url,
                "category": "premade",
            })
        })
        .collect();

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "voices": voices }).to_string()))
        .unwrap()
}

/// TTS endpoint handler
async fn tts_handler(
    State(state): State<Arc<HttpMockState>>,
    Path(_voice_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response<Body> {
    state.stats.record_tts();
    *state.last_tts_request.lock().unwrap() = serde_json::from_slice(&body).ok();

    if !state.authorized(&headers) {
        return unauthorized();
    }

    let script = state.script();
    if script.tts_hang_up {
        let broken = stream::once(async {
            Err::<Bytes, std::io::Error>(std::io::Error::other("connection reset by mock"))
        });
        return Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "audio/mpeg")
            .body(Body::from_stream(broken))
            .unwrap();
    }

    let status = StatusCode::from_u16(script.tts_status).unwrap();
    let content_type = if status.is_success() {
        "audio/mpeg"
    } else {
        "application/json"
    };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .body(Body::from(script.tts_body))
        .unwrap()
}

/// Preview clip handler
async fn preview_handler(
    State(state): State<Arc<HttpMockState>>,
    Path(_file): Path<String>,
) -> Response<Body> {
    state.stats.record_preview();
    match state.script().preview_body {
        Some(bytes) => Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "audio/mpeg")
            .body(Body::from(bytes))
            .unwrap(),
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not Found"))
            .unwrap(),
    }
}

/// A running mock server
pub struct ElevenLabsMock {
    pub state: Arc<HttpMockState>,
    handle: tokio::task::JoinHandle<()>,
}

impl ElevenLabsMock {
    pub fn base_url(&self) -> Url {
        self.state.base_url.clone()
    }

    pub fn stats(&self) -> &MockStats {
        &self.state.stats
    }

    /// Change the scripted responses for subsequent requests.
    pub fn update(&self, f: impl FnOnce(&mut MockScript)) {
        f(&mut self.state.script.lock().unwrap());
    }

    pub fn last_tts_request(&self) -> Option<Value> {
        self.state.last_tts_request.lock().unwrap().clone()
    }
}

impl Drop for ElevenLabsMock {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start HTTP mock server on an ephemeral port
pub async fn spawn_http_mock(script: MockScript) -> ElevenLabsMock {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = Url::parse(&format!("http://{}/", addr)).unwrap();

    let state = Arc::new(HttpMockState {
        base_url,
        script: Mutex::new(script),
        stats: MockStats::default(),
        last_tts_request: Mutex::new(None),
    });

    let app = Router::new()
        .route("/v1/voices", get(voices_handler))
        .route("/v1/text-to-speech/{voice_id}", post(tts_handler))
        .route("/previews/{file}", get(preview_handler))
        .with_state(state.clone());

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("HTTP Mock Server error: {}", e);
        }
    });

    ElevenLabsMock { state, handle }
}
