//! Per-browser-session state.
//!
//! A [`Session`] records the connection status, the API key, the voice catalog,
//! the selected voice, the latest generated audio and a capped history. It is only
//! ever mutated through `&mut self`, by the one action that currently holds the
//! session (see [`crate::state::SessionStore`]).

mod history;

use std::fmt;

use bytes::Bytes;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;
use zeroize::Zeroizing;

use crate::core::audio;
use crate::core::provider::{ProviderResult, VoiceProvider};
use crate::core::voice::Voice;

pub use history::{
    DISPLAY_TEXT_LIMIT, HISTORY_CAPACITY, History, HistoryEntry, truncate_for_display,
};

/// Failures of session-local lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("History entry not found: {0}")]
    EntryNotFound(String),

    /// The history entry's voice is absent from the current catalog
    #[error("Voice '{0}' is no longer available")]
    VoiceUnavailable(String),
}

#[derive(Default)]
pub struct Session {
    api_key: Option<Zeroizing<String>>,
    connected: bool,
    voices: Vec<Voice>,
    selected_voice: Option<Voice>,
    last_audio: Option<Bytes>,
    history: History,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("connected", &self.connected)
            .field("voices", &self.voices.len())
            .field("selected_voice", &self.selected_voice.as_ref().map(|v| &v.id))
            .field("last_audio", &self.last_audio.as_ref().map(Bytes::len))
            .field("history", &self.history.len())
            .finish()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect with `api_key` by listing the voices it can use.
    ///
    /// On success the key is retained, the catalog replaced and the session marked
    /// connected. On failure the session is left untouched.
    pub async fn connect(
        &mut self,
        api_key: &str,
        provider: &dyn VoiceProvider,
    ) -> ProviderResult<usize> {
        let voices = provider.list_voices(api_key).await?;
        let count = voices.len();

        self.api_key = Some(Zeroizing::new(api_key.to_string()));
        self.voices = voices;
        self.connected = true;

        info!(voices = count, "Session connected");
        Ok(count)
    }

    #[cfg(test)]
    pub(crate) fn connected_with(voices: Vec<Voice>) -> Self {
        Self {
            api_key: Some(Zeroizing::new("test-key".to_string())),
            connected: true,
            voices,
            ..Self::default()
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(String::as_str)
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn find_voice(&self, voice_id: &str) -> Option<&Voice> {
        self.voices.iter().find(|voice| voice.id == voice_id)
    }

    /// Voices whose name or description contains `query`, ignoring case.
    pub fn filter_voices(&self, query: &str) -> Vec<&Voice> {
        self.voices.iter().filter(|voice| voice.matches(query)).collect()
    }

    pub fn selected_voice(&self) -> Option<&Voice> {
        self.selected_voice.as_ref()
    }

    /// Select `voice` as-is; it is not checked against the catalog.
    pub fn select_voice(&mut self, voice: Voice) {
        self.selected_voice = Some(voice);
    }

    pub fn last_audio(&self) -> Option<&Bytes> {
        self.last_audio.as_ref()
    }

    /// Download name for the latest audio: voice slug and Unix seconds.
    pub fn last_audio_filename(&self) -> Option<String> {
        let audio = self.last_audio.as_ref()?;
        let voice_name = self
            .history
            .latest()
            .map(|entry| entry.voice_name.as_str())
            .unwrap_or("tts");
        let stamp = self
            .history
            .latest()
            .map(|entry| entry.created_at.unix_timestamp())
            .unwrap_or_default();
        Some(audio::download_filename(voice_name, &stamp.to_string(), audio))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Store a successful synthesis: new history head and latest audio.
    pub fn record_generation(&mut self, text: &str, voice: &Voice, audio: Bytes) -> &HistoryEntry {
        self.record_generation_at(text, voice, audio, OffsetDateTime::now_utc())
    }

    pub(crate) fn record_generation_at(
        &mut self,
        text: &str,
        voice: &Voice,
        audio: Bytes,
        now: OffsetDateTime,
    ) -> &HistoryEntry {
        self.last_audio = Some(audio.clone());
        self.history.record(text, voice, audio, now)
    }

    /// Select the voice a history entry was generated with.
    ///
    /// The entry's `voice_id` is looked up in the current catalog; a voice that has
    /// disappeared since is reported instead of being selected.
    pub fn reselect_from_history(&mut self, entry_id: &str) -> Result<&Voice, SessionError> {
        let entry = self
            .history
            .get(entry_id)
            .ok_or_else(|| SessionError::EntryNotFound(entry_id.to_string()))?;

        let voice = self
            .find_voice(&entry.voice_id)
            .cloned()
            .ok_or_else(|| SessionError::VoiceUnavailable(entry.voice_name.clone()))?;

        Ok(self.selected_voice.insert(voice))
    }
}
