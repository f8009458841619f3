//! Configuration types for ElevenLabs speech synthesis.
//!
//! - Fixed model selection (`eleven_multilingual_v2`)
//! - Voice tuning parameters (stability, similarity boost, style)

use thiserror::Error;

/// Default ElevenLabs API origin
pub const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

/// Model used for every synthesis request
pub const ELEVENLABS_MODEL_ID: &str = "eleven_multilingual_v2";

/// Header carrying the provider API key
pub const API_KEY_HEADER: &str = "xi-api-key";

/// Errors raised when voice settings fall outside the accepted range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    OutOfRange { name: &'static str, value: f32 },
}

// =============================================================================
// Voice Settings
// =============================================================================

/// Tuning parameters forwarded verbatim to the provider.
///
/// Every value lies in the closed interval [0.0, 1.0]; construction fails
/// otherwise, so a request can never be built from out-of-range settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
}

impl VoiceSettings {
    pub const DEFAULT_STABILITY: f32 = 0.5;
    pub const DEFAULT_SIMILARITY_BOOST: f32 = 0.75;
    pub const DEFAULT_STYLE: f32 = 0.0;
    /// Slider granularity offered by the synthesis view
    pub const STEP: f32 = 0.01;

    pub fn new(stability: f32, similarity_boost: f32, style: f32) -> Result<Self, SettingsError> {
        Ok(Self {
            stability: check_unit_range("stability", stability)?,
            similarity_boost: check_unit_range("similarity_boost", similarity_boost)?,
            style: check_unit_range("style", style)?,
        })
    }

    #[inline]
    pub fn stability(&self) -> f32 {
        self.stability
    }

    #[inline]
    pub fn similarity_boost(&self) -> f32 {
        self.similarity_boost
    }

    #[inline]
    pub fn style(&self) -> f32 {
        self.style
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: Self::DEFAULT_STABILITY,
            similarity_boost: Self::DEFAULT_SIMILARITY_BOOST,
            style: Self::DEFAULT_STYLE,
        }
    }
}

fn check_unit_range(name: &'static str, value: f32) -> Result<f32, SettingsError> {
    // NaN fails the containment check as well
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SettingsError::OutOfRange { name, value })
    }
}
