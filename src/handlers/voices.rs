use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::core::audio::detect_audio_format;
use crate::errors::{AppError, AppResult};
use crate::middleware::SessionHandle;
use crate::state::AppState;
use crate::views::{Notice, render_catalog};

use super::redirect_to_connect;

/// Query parameters for the catalog view
#[derive(Debug, Deserialize, Default)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: String,
}

/// Form posted by a catalog card's "Use Voice" button
#[derive(Debug, Deserialize, Default)]
pub struct SelectForm {
    /// Search in effect when the button was pressed, so the list stays filtered
    #[serde(default)]
    pub search: String,
}

/// Voice catalog, optionally filtered by `?search=`.
pub async fn catalog_view(
    Extension(handle): Extension<SessionHandle>,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let session = handle.session.lock().await;
    if !session.is_connected() {
        return redirect_to_connect();
    }
    Html(render_catalog(&session, &query.search, None)).into_response()
}

/// Make a catalog voice the selected voice.
pub async fn select_voice(
    Extension(handle): Extension<SessionHandle>,
    Path(voice_id): Path<String>,
    Form(form): Form<SelectForm>,
) -> AppResult<Response> {
    let mut session = handle.session.lock().await;
    if !session.is_connected() {
        return Ok(redirect_to_connect());
    }

    let voice = session
        .find_voice(&voice_id)
        .cloned()
        .ok_or_else(|| AppError::VoiceNotFound(voice_id.clone()))?;

    tracing::info!(session_id = %handle.id, voice_id = %voice.id, "Voice selected");
    let notice = Notice::success(format!("Selected: {}", voice.name));
    session.select_voice(voice);

    Ok(Html(render_catalog(&session, &form.search, Some(&notice))).into_response())
}

/// Preview clip for a catalog voice.
///
/// Answers `204 No Content` whenever no clip can be produced; a missing preview is
/// never reported as an error.
pub async fn voice_preview(
    State(state): State<Arc<AppState>>,
    Extension(handle): Extension<SessionHandle>,
    Path(voice_id): Path<String>,
) -> Response {
    // Previews load in parallel from the catalog page, so the lock is released
    // before the fetch.
    let preview_url = {
        let session = handle.session.lock().await;
        session
            .find_voice(&voice_id)
            .and_then(|voice| voice.preview_url.clone())
    };

    let Some(preview_url) = preview_url else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match state.provider.fetch_preview(&preview_url).await {
        Some(audio) => {
            let (mime, _) = detect_audio_format(&audio);
            ([(header::CONTENT_TYPE, mime)], audio).into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
