use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{connect, history, speech, voices};
use crate::state::AppState;
use std::sync::Arc;

/// Create the browser-facing router
///
/// Note: the session middleware is applied in [`super::build_router`] once state is
/// available; every handler here expects a `SessionHandle` extension.
pub fn create_app_router() -> Router<Arc<AppState>> {
    Router::new()
        // API key setup
        .route("/", get(connect::connect_view))
        .route("/connect", post(connect::connect))
        // Text to Speech
        .route("/tts", get(speech::synthesis_view))
        .route("/tts/generate", post(speech::generate))
        // Voices
        .route("/voices", get(voices::catalog_view))
        .route("/voices/{voice_id}/select", post(voices::select_voice))
        .route("/voices/{voice_id}/preview", get(voices::voice_preview))
        // History
        .route("/history", get(history::history_view))
        .route("/history/{entry_id}/reselect", post(history::reselect))
        .layer(TraceLayer::new_for_http())
}
