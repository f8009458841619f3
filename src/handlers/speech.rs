use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::provider::VoiceSettings;
use crate::core::session::Session;
use crate::core::voice::Voice;
use crate::errors::{AppError, AppResult};
use crate::middleware::SessionHandle;
use crate::state::AppState;
use crate::views::{Notice, SynthesisDraft, render_synthesis};

use super::{provider_error_notice, redirect_to_connect};

fn default_stability() -> f32 {
    VoiceSettings::DEFAULT_STABILITY
}

fn default_similarity_boost() -> f32 {
    VoiceSettings::DEFAULT_SIMILARITY_BOOST
}

fn default_style() -> f32 {
    VoiceSettings::DEFAULT_STYLE
}

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub voice_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_stability")]
    pub stability: f32,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,
    #[serde(default = "default_style")]
    pub style: f32,
}

impl GenerateForm {
    fn draft(&self) -> SynthesisDraft {
        SynthesisDraft {
            text: self.text.clone(),
            stability: self.stability,
            similarity_boost: self.similarity_boost,
            style: self.style,
        }
    }

    /// Check the form against the session before anything is sent to the provider.
    fn validate(&self, session: &Session) -> AppResult<(Voice, VoiceSettings)> {
        if self.text.trim().is_empty() {
            return Err(AppError::Validation("Enter some text.".to_string()));
        }
        let voice = session
            .find_voice(&self.voice_id)
            .cloned()
            .ok_or_else(|| AppError::Validation("Select a voice.".to_string()))?;
        let settings = VoiceSettings::new(self.stability, self.similarity_boost, self.style)?;
        Ok((voice, settings))
    }
}

/// Synthesis form with the latest clip, if any.
pub async fn synthesis_view(Extension(handle): Extension<SessionHandle>) -> Response {
    let session = handle.session.lock().await;
    if !session.is_connected() {
        return redirect_to_connect();
    }
    Html(render_synthesis(&session, &SynthesisDraft::default(), None)).into_response()
}

/// Generate speech for the submitted text and record it in the history.
///
/// Validation failures and provider errors are rendered as notices; the session is
/// only changed when the provider returns audio.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(handle): Extension<SessionHandle>,
    Form(form): Form<GenerateForm>,
) -> AppResult<Response> {
    let mut session = handle.session.lock().await;
    if !session.is_connected() {
        return Ok(redirect_to_connect());
    }

    let draft = form.draft();
    let (voice, settings) = match form.validate(&session) {
        Ok(valid) => valid,
        Err(AppError::Validation(message)) => {
            let notice = Notice::warning(message);
            return Ok(Html(render_synthesis(&session, &draft, Some(&notice))).into_response());
        }
        Err(e) => return Err(e),
    };

    let api_key = session
        .api_key()
        .ok_or_else(|| AppError::Internal("connected session has no API key".to_string()))?;

    let result = state
        .provider
        .synthesize(api_key, &voice.id, &form.text, settings)
        .await;

    let notice = match result {
        Ok(audio) => {
            info!(
                session_id = %handle.id,
                voice_id = %voice.id,
                bytes = audio.len(),
                "Speech generated"
            );
            session.select_voice(voice.clone());
            session.record_generation(&form.text, &voice, audio);
            Notice::success("Done!")
        }
        Err(e) => {
            warn!(session_id = %handle.id, voice_id = %voice.id, error = %e, "Speech generation failed");
            provider_error_notice(&e, "Generation failed", "Speech generation error")
        }
    };

    Ok(Html(render_synthesis(&session, &draft, Some(&notice))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(voice_id: &str, text: &str) -> GenerateForm {
        GenerateForm {
            voice_id: voice_id.to_string(),
            text: text.to_string(),
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
        }
    }

    fn session() -> Session {
        Session::connected_with(vec![Voice::new("v1", "Rachel")])
    }

    #[test]
    fn test_validate_ok() {
        let (voice, settings) = form("v1", "Hello").validate(&session()).unwrap();
        assert_eq!(voice.name, "Rachel");
        assert_eq!(settings, VoiceSettings::default());
    }

    #[test]
    fn test_blank_text_rejected_first() {
        for text in ["", "   ", "\n\t"] {
            let err = form("missing", text).validate(&session()).unwrap_err();
            assert!(matches!(err, AppError::Validation(ref m) if m == "Enter some text."));
        }
    }

    #[test]
    fn test_unknown_or_missing_voice_rejected() {
        for voice_id in ["", "v9"] {
            let err = form(voice_id, "Hello").validate(&session()).unwrap_err();
            assert!(matches!(err, AppError::Validation(ref m) if m == "Select a voice."));
        }
    }

    #[test]
    fn test_settings_out_of_range_rejected() {
        let mut f = form("v1", "Hello");
        f.style = 1.5;
        let err = f.validate(&session()).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("style")));

        let mut f = form("v1", "Hello");
        f.stability = 1.0;
        f.similarity_boost = 0.0;
        assert!(f.validate(&session()).is_ok());
    }
}
