//! HTTP request handlers
//!
//! This module organizes all handlers into logical groups:
//! - `api` - Health check endpoint
//! - `connect` - API key entry and provider connection
//! - `speech` - Text-to-speech form and generation
//! - `voices` - Voice catalog, selection and preview clips
//! - `history` - Past generations and voice reuse
//!
//! Every handler except the health check runs behind the session middleware and
//! holds its session's lock until the response is built.

pub mod api;
pub mod connect;
pub mod history;
pub mod speech;
pub mod voices;

use axum::response::{IntoResponse, Redirect, Response};

use crate::core::provider::ProviderError;
use crate::views::Notice;

/// Send a disconnected session back to the API key form.
pub(crate) fn redirect_to_connect() -> Response {
    Redirect::to("/").into_response()
}

/// Error notice for a failed provider call.
///
/// `api_prefix` is used when the provider answered with an error status,
/// `transport_prefix` when no usable answer came back.
pub(crate) fn provider_error_notice(
    err: &ProviderError,
    api_prefix: &str,
    transport_prefix: &str,
) -> Notice {
    match err {
        ProviderError::Api { .. } => Notice::error(format!("{api_prefix}: {err}")),
        ProviderError::Transport(_) | ProviderError::Decode(_) => {
            Notice::error(format!("{transport_prefix}: {err}"))
        }
    }
}
