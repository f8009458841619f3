use std::sync::Arc;

use moka::future::Cache;
use moka::policy::EvictionPolicy;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::core::provider::{ElevenLabsClient, VoiceProvider};
use crate::core::session::Session;

/// A session shared between the store and the request currently acting on it.
///
/// Handlers hold the lock for the whole of an action, provider round-trip included,
/// so a second action in the same session waits for the first to finish.
pub type SharedSession = Arc<Mutex<Session>>;

/// In-memory session table keyed by the opaque id carried in the session cookie.
///
/// Entries expire after the configured idle time; an expired id simply resolves to
/// a fresh session. When the table is full the least recently used session is
/// evicted, so a new visitor is always admitted. Nothing is persisted.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, SharedSession>,
}

impl SessionStore {
    pub fn new(idle_timeout: std::time::Duration, max_sessions: u64) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle_timeout)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self { sessions }
    }

    pub async fn get(&self, session_id: &str) -> Option<SharedSession> {
        self.sessions.get(session_id).await
    }

    /// Start a new, disconnected session and return its id.
    pub async fn create(&self) -> (String, SharedSession) {
        let session_id = Uuid::new_v4().simple().to_string();
        let session = Arc::new(Mutex::new(Session::new()));
        self.sessions
            .insert(session_id.clone(), session.clone())
            .await;
        debug!(session_id = %session_id, "Session created");
        (session_id, session)
    }

    /// Look up the session for a cookie value, creating one when it is missing or
    /// expired. The flag is `true` when a new session was started.
    pub async fn resolve(&self, session_id: Option<&str>) -> (String, SharedSession, bool) {
        if let Some(id) = session_id {
            if let Some(session) = self.get(id).await {
                return (id.to_string(), session, false);
            }
        }
        let (id, session) = self.create().await;
        (id, session, true)
    }

    pub async fn remove(&self, session_id: &str) {
        self.sessions.invalidate(session_id).await;
    }

    /// Approximate number of live sessions.
    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }

    /// Apply pending expirations and evictions; mostly useful for tests.
    pub async fn run_pending_tasks(&self) {
        self.sessions.run_pending_tasks().await;
    }
}

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
    pub provider: Arc<dyn VoiceProvider>,
    pub sessions: SessionStore,
}

impl AppState {
    /// Build the state with the ElevenLabs client pointed at the configured base URL.
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let provider = Arc::new(ElevenLabsClient::new(config.provider_base_url.clone()));
        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: ServerConfig, provider: Arc<dyn VoiceProvider>) -> Arc<Self> {
        let sessions = SessionStore::new(config.session_idle_timeout(), config.max_sessions);
        Arc::new(Self {
            config,
            provider,
            sessions,
        })
    }
}
