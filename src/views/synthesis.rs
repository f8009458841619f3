use std::fmt::Write;

use crate::core::audio;
use crate::core::provider::VoiceSettings;
use crate::core::session::Session;

use super::{Notice, Tab, audio_player, download_link, escape, layout};

/// Form values echoed back into the synthesis view.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisDraft {
    pub text: String,
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
}

impl Default for SynthesisDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            stability: VoiceSettings::DEFAULT_STABILITY,
            similarity_boost: VoiceSettings::DEFAULT_SIMILARITY_BOOST,
            style: VoiceSettings::DEFAULT_STYLE,
        }
    }
}

fn slider(name: &str, label: &str, value: f32) -> String {
    format!(
        r#"<label for="{name}">{label} <output id="{name}_value">{value:.2}</output></label>
<input type="range" id="{name}" name="{name}" min="0" max="1" step="{step}" value="{value}" oninput="document.getElementById('{name}_value').value = Number(this.value).toFixed(2)">"#,
        step = VoiceSettings::STEP,
    )
}

/// Voice selector, text area and voice settings, plus the latest generated clip.
pub fn render_synthesis(session: &Session, draft: &SynthesisDraft, notice: Option<&Notice>) -> String {
    let selected_id = session.selected_voice().map(|voice| voice.id.as_str());

    let mut options = String::new();
    for voice in session.voices() {
        let selected = if Some(voice.id.as_str()) == selected_id {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            options,
            r#"<option value="{}"{}>{}</option>"#,
            escape(&voice.id),
            selected,
            escape(&voice.name)
        );
    }

    let mut body = format!(
        r#"<h2>Text to Speech</h2>
<form method="post" action="/tts/generate" data-pending="Generating audio...">
<label for="voice_id">Choose Voice</label>
<select id="voice_id" name="voice_id">{options}</select>
<label for="text">Text</label>
<textarea id="text" name="text">{text}</textarea>
<details>
<summary>Voice Settings</summary>
{stability}
{similarity}
{style}
</details>
<button type="submit">Generate</button>
</form>"#,
        text = escape(&draft.text),
        stability = slider("stability", "Stability", draft.stability),
        similarity = slider("similarity_boost", "Similarity", draft.similarity_boost),
        style = slider("style", "Style", draft.style),
    );

    if let Some(last_audio) = session.last_audio() {
        let uri = audio::data_uri(last_audio);
        let (mime, _) = audio::detect_audio_format(last_audio);
        let filename = session.last_audio_filename().unwrap_or_default();
        let _ = write!(
            body,
            r#"<section class="latest">{}{}</section>"#,
            audio_player(&uri, Some(mime)),
            download_link(&uri, &filename)
        );
    }

    layout(Some(Tab::Synthesis), notice, &body)
}
