pub mod audio;
pub mod provider;
pub mod session;
pub mod voice;

pub use provider::{ElevenLabsClient, ProviderError, ProviderResult, VoiceProvider, VoiceSettings};
pub use session::{HistoryEntry, Session, SessionError};
pub use voice::Voice;
