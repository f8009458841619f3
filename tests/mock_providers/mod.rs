//! Mock Provider Servers
//!
//! In-process stand-ins for the ElevenLabs REST API with request counters, so tests
//! can assert exactly how many provider calls an action made.

// Allow dead code in test infrastructure - not every test binary uses every helper
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics collector for mock server
#[derive(Debug, Default)]
pub struct MockStats {
    pub voices_requests: AtomicU64,
    pub tts_requests: AtomicU64,
    pub preview_requests: AtomicU64,
}

impl MockStats {
    pub fn record_voices(&self) {
        self.voices_requests.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_tts(&self) {
        self.tts_requests.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_preview(&self) {
        self.preview_requests.fetch_add(1, Ordering::SeqCst);
    }

    pub fn voices(&self) -> u64 {
        self.voices_requests.load(Ordering::SeqCst)
    }

    pub fn tts(&self) -> u64 {
        self.tts_requests.load(Ordering::SeqCst)
    }

    pub fn previews(&self) -> u64 {
        self.preview_requests.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> u64 {
        self.voices() + self.tts() + self.previews()
    }
}

pub mod http_mock;

pub use http_mock::{ElevenLabsMock, MockScript, MockVoice, spawn_http_mock};
