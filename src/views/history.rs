use std::fmt::Write;

use crate::core::audio;
use crate::core::session::{HistoryEntry, Session};

use super::{Notice, Tab, audio_player, download_link, escape, layout};

fn history_item(entry: &HistoryEntry) -> String {
    let uri = audio::data_uri(&entry.audio);
    let (mime, _) = audio::detect_audio_format(&entry.audio);
    format!(
        r#"<div class="card">
<p>{text}</p>
<p class="caption">Voice: {voice} | {timestamp}</p>
{player}
{download}
<form method="post" action="/history/{id}/reselect">
<button type="submit">Use this voice</button>
</form>
</div>"#,
        text = escape(&entry.display_text()),
        voice = escape(&entry.voice_name),
        timestamp = entry.timestamp(),
        player = audio_player(&uri, Some(mime)),
        download = download_link(&uri, &entry.download_filename()),
        id = escape(&entry.id),
    )
}

/// Past generations, newest first.
pub fn render_history(session: &Session, notice: Option<&Notice>) -> String {
    let mut body = String::from("<h2>History</h2>");

    if session.history().is_empty() {
        body.push_str(&Notice::info("No history yet.").render());
    }
    for entry in session.history().iter() {
        let _ = write!(body, "{}", history_item(entry));
    }

    layout(Some(Tab::History), notice, &body)
}
