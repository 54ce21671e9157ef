//! Session state persistence
//!
//! One document per session id holding the transcript and system directive.

mod prompt;
mod store;
mod types;

pub use prompt::DEFAULT_SYSTEM_PROMPT;
pub use store::{validate_session_id, SessionStore};
pub use types::SessionState;
