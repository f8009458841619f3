use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::core::provider::SettingsError;

pub type AppResult<T> = Result<T, AppError>;

/// Errors raised while handling a browser request.
#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected input; no provider call was made
    #[error("{0}")]
    Validation(String),

    #[error("History entry not found: {0}")]
    EntryNotFound(String),

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::EntryNotFound(_) | Self::VoiceNotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
