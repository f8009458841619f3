use super::{Notice, layout};

/// API key entry form shown while the session is not connected.
pub fn render_connect(notice: Option<&Notice>) -> String {
    let body = r#"<h2>Connect to ElevenLabs</h2>
<form method="post" action="/connect" data-pending="Connecting...">
<label for="api_key">API Key</label>
<input type="password" id="api_key" name="api_key" autocomplete="off">
<button type="submit">Connect</button>
</form>"#;
    layout(None, notice, body)
}
