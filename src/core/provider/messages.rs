//! Wire types for the ElevenLabs REST API.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{ELEVENLABS_MODEL_ID, VoiceSettings};
use crate::core::voice::Voice;
use crate::utils::validate_http_url;

// =============================================================================
// GET /v1/voices
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct VoicesResponse {
    #[serde(default)]
    pub voices: Vec<ElevenLabsVoice>,
}

/// One entry of the voice-list response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ElevenLabsVoice {
    pub voice_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

impl From<ElevenLabsVoice> for Voice {
    fn from(voice: ElevenLabsVoice) -> Self {
        let preview_url = voice
            .preview_url
            .filter(|url| !url.trim().is_empty())
            .and_then(|url| match validate_http_url(&url) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    debug!(voice_id = %voice.voice_id, "Ignoring preview URL: {}", e);
                    None
                }
            });

        Voice {
            id: voice.voice_id,
            name: voice.name.unwrap_or_else(|| "Unnamed".to_string()),
            description: voice.description.unwrap_or_default(),
            preview_url,
        }
    }
}

// =============================================================================
// POST /v1/text-to-speech/{voice_id}
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct SynthesisRequest<'a> {
    pub text: &'a str,
    pub model_id: &'static str,
    pub voice_settings: VoiceSettingsPayload,
}

#[derive(Debug, Serialize)]
pub(crate) struct VoiceSettingsPayload {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl<'a> SynthesisRequest<'a> {
    pub fn new(text: &'a str, settings: VoiceSettings) -> Self {
        Self {
            text,
            model_id: ELEVENLABS_MODEL_ID,
            voice_settings: VoiceSettingsPayload {
                stability: settings.stability(),
                similarity_boost: settings.similarity_boost(),
                style: settings.style(),
                use_speaker_boost: true,
            },
        }
    }
}
