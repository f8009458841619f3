use std::fmt::Write;

use crate::core::session::Session;
use crate::core::voice::Voice;

use super::{Notice, Tab, audio_player, escape, layout};

/// Percent-encode a voice id for use as a single path segment.
pub(crate) fn path_segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn voice_card(voice: &Voice, search: &str) -> String {
    let segment = path_segment(&voice.id);
    let description = if voice.description.is_empty() {
        "No description"
    } else {
        voice.description.as_str()
    };
    let preview = if voice.preview_url.is_some() {
        audio_player(&format!("/voices/{segment}/preview"), None)
    } else {
        String::new()
    };

    format!(
        r#"<div class="card">
<h4>{name}</h4>
<p class="caption">{description}</p>
{preview}
<form method="post" action="/voices/{segment}/select">
<input type="hidden" name="search" value="{search}">
<button type="submit">Use Voice</button>
</form>
</div>"#,
        name = escape(&voice.name),
        description = escape(description),
        search = escape(search),
    )
}

/// Voice catalog filtered by `search`, two cards per row.
pub fn render_catalog(session: &Session, search: &str, notice: Option<&Notice>) -> String {
    let voices = session.filter_voices(search);

    let mut body = format!(
        r#"<h2>Voices</h2>
<form method="get" action="/voices">
<label for="search">Search Voices</label>
<input type="search" id="search" name="search" value="{}">
</form>"#,
        escape(search)
    );

    if voices.is_empty() {
        body.push_str(r#"<p class="caption">No voices found.</p>"#);
    } else {
        body.push_str(r#"<div class="voices">"#);
        for voice in voices {
            let _ = write!(body, "{}", voice_card(voice, search));
        }
        body.push_str("</div>");
    }

    layout(Some(Tab::Catalog), notice, &body)
}
