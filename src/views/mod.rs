//! Server-rendered HTML views.
//!
//! Pages are assembled with `format!` from session state. Everything that
//! originates outside the server (voice names, descriptions, submitted text,
//! provider error bodies) goes through [`escape`] before it reaches the markup.

pub mod catalog;
pub mod connect;
pub mod history;
pub mod synthesis;

use std::fmt::Write;

pub use catalog::render_catalog;
pub use connect::render_connect;
pub use history::render_history;
pub use synthesis::{SynthesisDraft, render_synthesis};

/// Severity of a one-off message shown above the page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn css_class(self) -> &'static str {
        match self {
            Self::Info => "notice-info",
            Self::Success => "notice-success",
            Self::Warning => "notice-warning",
            Self::Error => "notice-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn render(&self) -> String {
        format!(
            r#"<div class="notice {}" role="status">{}</div>"#,
            self.kind.css_class(),
            escape(&self.message)
        )
    }
}

/// The three views available once connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Synthesis,
    Catalog,
    History,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Synthesis, Tab::Catalog, Tab::History];

    fn label(self) -> &'static str {
        match self {
            Self::Synthesis => "Text to Speech",
            Self::Catalog => "Voices",
            Self::History => "History",
        }
    }

    fn href(self) -> &'static str {
        match self {
            Self::Synthesis => "/tts",
            Self::Catalog => "/voices",
            Self::History => "/history",
        }
    }
}

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<audio>` element playing `src`, either a `data:` URI or a local endpoint.
///
/// `mime` is omitted for endpoints, which report their own content type.
pub(crate) fn audio_player(src: &str, mime: Option<&str>) -> String {
    let type_attr = mime
        .map(|mime| format!(r#" type="{}""#, escape(mime)))
        .unwrap_or_default();
    format!(
        r#"<audio controls preload="none" style="width:100%"><source src="{}"{}></audio>"#,
        escape(src),
        type_attr
    )
}

pub(crate) fn download_link(data_uri: &str, filename: &str) -> String {
    format!(
        r#"<a class="download" href="{}" download="{}">Download Audio</a>"#,
        escape(data_uri),
        escape(filename)
    )
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #222; }
nav a { margin-right: 1rem; padding: .4rem .8rem; text-decoration: none; border-bottom: 2px solid transparent; color: #444; }
nav a.active { border-color: #e4572e; color: #000; }
.notice { padding: .6rem 1rem; margin: 1rem 0; border-radius: 4px; }
.notice-info { background: #e7f0fb; }
.notice-success { background: #e3f6e8; }
.notice-warning { background: #fdf3d8; }
.notice-error { background: #fbe4e4; }
.voices { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.card { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; }
.caption { color: #777; font-size: .9rem; }
label { display: block; margin-top: .8rem; }
textarea { width: 100%; height: 150px; }
button[disabled] { opacity: .6; }
"#;

// Submit buttons inside forms carrying `data-pending` are disabled and relabelled
// while the request is in flight.
const PENDING_SCRIPT: &str = r#"
document.querySelectorAll("form[data-pending]").forEach(function (form) {
  form.addEventListener("submit", function () {
    form.querySelectorAll("button[type=submit]").forEach(function (button) {
      button.disabled = true;
      button.textContent = form.dataset.pending;
    });
  });
});
"#;

/// Wrap `body` in the page chrome. Tabs are shown only when `active` is set.
pub(crate) fn layout(active: Option<Tab>, notice: Option<&Notice>, body: &str) -> String {
    let mut nav = String::new();
    if let Some(active) = active {
        nav.push_str("<nav>");
        for tab in Tab::ALL {
            let class = if tab == active { r#" class="active""# } else { "" };
            let _ = write!(nav, r#"<a href="{}"{}>{}</a>"#, tab.href(), class, tab.label());
        }
        nav.push_str("</nav>");
    }

    let notice = notice.map(Notice::render).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Voice Lab</title>
<style>{STYLE}</style>
</head>
<body>
<h1>Voice Lab 🎙️</h1>
<p class="caption">A minimalist ElevenLabs TTS interface</p>
{nav}
{notice}
<main>
{body}
</main>
<script>{PENDING_SCRIPT}</script>
</body>
</html>
"#
    )
}
