//! Session cookie middleware
//!
//! Every browser gets an opaque session id in an HttpOnly cookie. The middleware
//! resolves that id against the [`SessionStore`](crate::state::SessionStore),
//! starting a new session when the cookie is missing or the session has expired,
//! and hands the session to handlers as a [`SessionHandle`] extension.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use voicelab::middleware::session_middleware;
//!
//! let app = Router::new()
//!     .route("/tts", get(synthesis_view))
//!     .layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         session_middleware,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::state::{AppState, SharedSession};

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "voicelab_session";

/// Extension type carrying the caller's session through to the handler.
#[derive(Clone)]
pub struct SessionHandle {
    pub id: String,
    pub session: SharedSession,
}

/// Extract the session id from the `Cookie` headers, if present.
fn session_id_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; HttpOnly; SameSite=Lax; Path=/")
}

/// Middleware that attaches a session to every request.
///
/// The middleware:
/// 1. Reads the session id from the `voicelab_session` cookie
/// 2. Resolves it in the session store, creating a new session when unknown
/// 3. Inserts a `SessionHandle` into request extensions
/// 4. Sets the cookie on the response when a new session was started
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_id = session_id_from_cookies(request.headers());
    let (id, session, created) = state.sessions.resolve(cookie_id.as_deref()).await;

    if created {
        tracing::debug!(
            path = %request.uri().path(),
            had_cookie = cookie_id.is_some(),
            "Starting new session"
        );
    }

    request.extensions_mut().insert(SessionHandle {
        id: id.clone(),
        session,
    });

    let mut response = next.run(request).await;

    if created {
        match HeaderValue::from_str(&session_cookie(&id)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to build session cookie: {}", e),
        }
    }

    response
}
