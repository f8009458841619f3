//! ElevenLabs REST client.
//!
//! # API Reference
//!
//! - `GET  {base}/v1/voices` - voice catalog
//! - `POST {base}/v1/text-to-speech/{voice_id}` - synthesis, returns `audio/mpeg`
//! - `GET  <preview_url>` - sample clip for a voice

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use tracing::{debug, info, warn};
use url::Url;

use super::config::{API_KEY_HEADER, VoiceSettings};
use super::messages::{SynthesisRequest, VoicesResponse};
use super::{ProviderError, ProviderResult, VoiceProvider};
use crate::core::voice::Voice;

/// HTTP client for the ElevenLabs API.
///
/// Uses the `reqwest` defaults for timeouts and performs no retries: every
/// failure is reported to the caller as-is.
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ElevenLabsClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn error_from_response(response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        ProviderError::Api { status, message }
    }
}

#[async_trait]
impl VoiceProvider for ElevenLabsClient {
    async fn list_voices(&self, api_key: &str) -> ProviderResult<Vec<Voice>> {
        let url = self.endpoint(&["v1", "voices"]);
        info!("Fetching ElevenLabs voices");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let err = Self::error_from_response(response).await;
            warn!("ElevenLabs voice listing failed: {}", err);
            return Err(err);
        }

        let body: VoicesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        let voices: Vec<Voice> = body.voices.into_iter().map(Voice::from).collect();

        info!(count = voices.len(), "ElevenLabs voices loaded");
        Ok(voices)
    }

    async fn synthesize(
        &self,
        api_key: &str,
        voice_id: &str,
        text: &str,
        settings: VoiceSettings,
    ) -> ProviderResult<Bytes> {
        let url = self.endpoint(&["v1", "text-to-speech", voice_id]);
        info!(
            voice_id = %voice_id,
            chars = text.chars().count(),
            "Requesting ElevenLabs synthesis"
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .header("Content-Type", "application/json")
            .json(&SynthesisRequest::new(text, settings))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let err = Self::error_from_response(response).await;
            warn!(voice_id = %voice_id, "ElevenLabs synthesis failed: {}", err);
            return Err(err);
        }

        let audio = response.bytes().await?;
        info!(voice_id = %voice_id, bytes = audio.len(), "ElevenLabs synthesis complete");
        Ok(audio)
    }

    async fn fetch_preview(&self, url: &Url) -> Option<Bytes> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %url, "Voice preview request failed: {}", e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!(url = %url, status = %response.status(), "Voice preview unavailable");
            return None;
        }

        match response.bytes().await {
            Ok(audio) => Some(audio),
            Err(e) => {
                debug!(url = %url, "Failed to read voice preview body: {}", e);
                None
            }
        }
    }
}
