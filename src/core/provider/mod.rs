//! Speech provider client.
//!
//! This module wraps the remote text-to-speech service behind the [`VoiceProvider`]
//! trait. The only implementation is [`ElevenLabsClient`].
//!
//! Error visibility is asymmetric:
//! - voice listing and synthesis return [`ProviderError`] for the caller to show
//! - preview fetches collapse every failure into `None`
//!
//! # Example
//!
//! ```rust,no_run
//! use voicelab::core::provider::{ElevenLabsClient, VoiceProvider, VoiceSettings};
//! use url::Url;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ElevenLabsClient::new(Url::parse("https://api.elevenlabs.io")?);
//! let voices = client.list_voices("xi-...").await?;
//! let audio = client
//!     .synthesize("xi-...", &voices[0].id, "Hello!", VoiceSettings::default())
//!     .await?;
//! println!("{} bytes of audio", audio.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod messages;


use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use url::Url;

use crate::core::voice::Voice;

pub use client::ElevenLabsClient;
pub use config::{
    API_KEY_HEADER, ELEVENLABS_BASE_URL, ELEVENLABS_MODEL_ID, SettingsError, VoiceSettings,
};

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failures of a provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider answered with a status other than 200
    #[error("{status} - {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response
    #[error("{0}")]
    Transport(String),

    /// The provider answered 200 with a body that could not be decoded
    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// HTTP status returned by the provider, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Remote operations the front-end depends on.
#[async_trait]
pub trait VoiceProvider: Send + Sync {
    /// List the voices available to `api_key`, in provider order.
    async fn list_voices(&self, api_key: &str) -> ProviderResult<Vec<Voice>>;

    /// Synthesize `text` with the given voice, returning the raw audio bytes.
    async fn synthesize(
        &self,
        api_key: &str,
        voice_id: &str,
        text: &str,
        settings: VoiceSettings,
    ) -> ProviderResult<Bytes>;

    /// Fetch a voice preview clip. Any failure yields `None`.
    async fn fetch_preview(&self, url: &Url) -> Option<Bytes>;
}
