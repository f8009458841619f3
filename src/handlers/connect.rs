use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::middleware::SessionHandle;
use crate::state::AppState;
use crate::views::{Notice, render_connect};

use super::provider_error_notice;

#[derive(Debug, Deserialize)]
pub struct ConnectForm {
    #[serde(default)]
    pub api_key: String,
}

/// API key form; connected sessions go straight to the synthesis view.
pub async fn connect_view(Extension(handle): Extension<SessionHandle>) -> Response {
    let session = handle.session.lock().await;
    if session.is_connected() {
        return Redirect::to("/tts").into_response();
    }
    Html(render_connect(None)).into_response()
}

/// Validate the key by listing voices with it.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    Extension(handle): Extension<SessionHandle>,
    Form(form): Form<ConnectForm>,
) -> Response {
    let mut session = handle.session.lock().await;
    if session.is_connected() {
        return Redirect::to("/tts").into_response();
    }

    let api_key = form.api_key.trim();
    if api_key.is_empty() {
        return Html(render_connect(Some(&Notice::warning("Please enter an API key."))))
            .into_response();
    }

    match session.connect(api_key, state.provider.as_ref()).await {
        Ok(count) => {
            info!(session_id = %handle.id, voices = count, "Connected to provider");
            Redirect::to("/tts").into_response()
        }
        Err(e) => {
            warn!(session_id = %handle.id, error = %e, "Provider connection failed");
            let notice = provider_error_notice(&e, "API Error", "Connection error");
            Html(render_connect(Some(&notice))).into_response()
        }
    }
}
