use std::collections::VecDeque;

use bytes::Bytes;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::core::audio;
use crate::core::voice::Voice;

/// Maximum number of generations kept per session
pub const HISTORY_CAPACITY: usize = 20;

/// Characters of submitted text shown in the history list
pub const DISPLAY_TEXT_LIMIT: usize = 100;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// One past synthesis and its audio. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Time-derived id, unique within the session
    pub id: String,
    /// Full submitted text
    pub text: String,
    pub voice_name: String,
    pub voice_id: String,
    pub audio: Bytes,
    pub created_at: OffsetDateTime,
}

impl HistoryEntry {
    /// Text shortened for display; the stored text is left intact.
    pub fn display_text(&self) -> String {
        truncate_for_display(&self.text)
    }

    /// `YYYY-MM-DD HH:MM:SS` (UTC)
    pub fn timestamp(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).unwrap_or_default()
    }

    pub fn download_filename(&self) -> String {
        audio::download_filename(&self.voice_name, &self.id, &self.audio)
    }
}

/// Shorten `text` to [`DISPLAY_TEXT_LIMIT`] characters, appending `...` when cut.
pub fn truncate_for_display(text: &str) -> String {
    match text.char_indices().nth(DISPLAY_TEXT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Capped log of generations, newest first.
#[derive(Debug, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    last_stamp: i128,
}

impl History {
    /// Insert a new entry at the head, evicting the oldest beyond capacity.
    pub fn record(
        &mut self,
        text: &str,
        voice: &Voice,
        audio: Bytes,
        now: OffsetDateTime,
    ) -> &HistoryEntry {
        // Ids must stay unique even when two generations share a clock reading
        let stamp = now.unix_timestamp_nanos().max(self.last_stamp + 1);
        self.last_stamp = stamp;

        self.entries.push_front(HistoryEntry {
            id: format_stamp(stamp),
            text: text.to_string(),
            voice_name: voice.name.clone(),
            voice_id: voice.id.clone(),
            audio,
            created_at: now,
        });
        self.entries.truncate(HISTORY_CAPACITY);

        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }
}

/// `seconds.nanoseconds`, like a fractional Unix timestamp.
fn format_stamp(stamp: i128) -> String {
    const NANOS: i128 = 1_000_000_000;
    format!("{}.{:09}", stamp.div_euclid(NANOS), stamp.rem_euclid(NANOS))
}
