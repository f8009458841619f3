//! URL validation for provider endpoints and voice preview links
//!
//! Both the configured API origin and the preview URLs returned by the provider
//! are fetched by the server, so they must be absolute http(s) URLs with a host.

use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors that can occur during URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,
}

/// Validates a URL the server is allowed to fetch.
///
/// # Example
/// ```rust
/// use voicelab::utils::url_validation::validate_http_url;
///
/// assert!(validate_http_url("https://api.elevenlabs.io").is_ok());
/// assert!(validate_http_url("ftp://example.com/file.mp3").is_err());
/// ```
pub fn validate_http_url(url: &str) -> Result<Url, UrlValidationError> {
    let parsed = Url::parse(url.trim())?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            debug!(scheme = %other, "Rejected URL with unsupported scheme");
            return Err(UrlValidationError::UnsupportedScheme(other.to_string()));
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(parsed)
}
