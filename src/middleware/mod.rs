pub mod session;

// Re-export middleware functions
pub use session::{SESSION_COOKIE, SessionHandle, session_middleware};
