use axum::{
    Extension,
    extract::Path,
    response::{Html, IntoResponse, Response},
};
use tracing::info;

use crate::core::session::SessionError;
use crate::errors::{AppError, AppResult};
use crate::middleware::SessionHandle;
use crate::views::{Notice, render_history};

use super::redirect_to_connect;

pub async fn history_view(Extension(handle): Extension<SessionHandle>) -> Response {
    let session = handle.session.lock().await;
    if !session.is_connected() {
        return redirect_to_connect();
    }
    Html(render_history(&session, None)).into_response()
}

/// Select the voice a history entry was generated with.
///
/// A voice that has since left the catalog is reported as a warning; an unknown
/// entry id is a 404.
pub async fn reselect(
    Extension(handle): Extension<SessionHandle>,
    Path(entry_id): Path<String>,
) -> AppResult<Response> {
    let mut session = handle.session.lock().await;
    if !session.is_connected() {
        return Ok(redirect_to_connect());
    }

    let notice = match session.reselect_from_history(&entry_id) {
        Ok(voice) => {
            info!(session_id = %handle.id, voice_id = %voice.id, "Voice reselected from history");
            Notice::success(format!("Selected: {}", voice.name))
        }
        Err(e @ SessionError::VoiceUnavailable(_)) => Notice::warning(e.to_string()),
        Err(SessionError::EntryNotFound(id)) => return Err(AppError::EntryNotFound(id)),
    };

    Ok(Html(render_history(&session, Some(&notice))).into_response())
}
