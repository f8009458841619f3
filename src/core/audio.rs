//! Inline audio helpers.
//!
//! Generated audio never leaves the session as a file on disk. It is handed to the
//! browser as a base64 `data:` URI that the `<audio>` element plays and an
//! `<a download>` link saves.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Detect audio format from magic bytes.
///
/// Returns `(mime_type, file_extension)`. ElevenLabs answers with MPEG audio, so
/// anything unrecognised is treated as mp3.
pub fn detect_audio_format(data: &[u8]) -> (&'static str, &'static str) {
    if data.starts_with(b"ID3") || (data.len() >= 2 && data[0] == 0xFF && (data[1] & 0xE0) == 0xE0)
    {
        return ("audio/mpeg", "mp3");
    }
    if data.starts_with(b"RIFF") && data.len() >= 12 && &data[8..12] == b"WAVE" {
        return ("audio/wav", "wav");
    }
    if data.starts_with(b"OggS") {
        return ("audio/ogg", "ogg");
    }
    if data.starts_with(b"fLaC") {
        return ("audio/flac", "flac");
    }

    ("audio/mpeg", "mp3")
}

/// Encode audio as a `data:` URI suitable for `<audio src>` and download links.
pub fn data_uri(audio: &[u8]) -> String {
    let (mime, _) = detect_audio_format(audio);
    format!("data:{};base64,{}", mime, STANDARD.encode(audio))
}

/// File name offered when downloading a clip: `{voice-slug}_{suffix}.{ext}`.
pub fn download_filename(voice_name: &str, suffix: &str, audio: &[u8]) -> String {
    let (_, ext) = detect_audio_format(audio);
    format!("{}_{}.{}", slugify(voice_name), suffix, ext)
}

/// Lowercase ASCII slug; runs of other characters collapse into a single `-`.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "voice".to_string()
    } else {
        slug.to_string()
    }
}
