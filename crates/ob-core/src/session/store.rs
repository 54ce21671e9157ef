//! Session persistence as one JSON document per session id

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::session::SessionState;
use crate::storage;
use crate::{Error, Result};

/// File-backed session store
///
/// `{base_path}/{session_id}.json` holds the complete state of one session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    base_path: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at `base_path` (created lazily on first save)
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory holding the session documents
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn session_path(&self, session_id: &str) -> Result<PathBuf> {
        validate_session_id(session_id)?;
        Ok(self.base_path.join(format!("{}.json", session_id)))
    }

    /// Load a session, or `None` if it was never saved
    pub async fn load(&self, session_id: &str) -> Result<Option<SessionState>> {
        let path = self.session_path(session_id)?;
        match storage::read_optional(&path).await? {
            Some(bytes) => {
                let state: SessionState = serde_json::from_slice(&bytes)?;
                debug!(
                    "Loaded session {} ({} messages)",
                    session_id,
                    state.message_count()
                );
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    /// Load a session, falling back to a fresh default state
    ///
    /// A missing document is the normal first-turn case, not an error.
    pub async fn restore(&self, session_id: &str) -> Result<SessionState> {
        match self.load(session_id).await? {
            Some(state) => Ok(state),
            None => {
                info!("Creating new session: {}", session_id);
                Ok(SessionState::default())
            }
        }
    }

    /// Replace the stored state of a session
    pub async fn save(&self, session_id: &str, state: &SessionState) -> Result<()> {
        let path = self.session_path(session_id)?;
        let json = serde_json::to_vec(state)?;
        storage::write_atomic(&path, &json).await?;
        debug!(
            "Saved session {} ({} messages)",
            session_id,
            state.message_count()
        );
        Ok(())
    }

    /// Delete a session, returning whether it existed
    pub async fn delete(&self, session_id: &str) -> Result<bool> {
        let path = self.session_path(session_id)?;
        let existed = storage::remove_optional(&path).await?;
        if existed {
            info!("Deleted session: {}", session_id);
        }
        Ok(existed)
    }
}

/// Session ids become file names, so they must be a single plain path segment
pub fn validate_session_id(session_id: &str) -> Result<()> {
    let valid = !session_id.is_empty()
        && session_id.len() <= 200
        && !session_id.starts_with('.')
        && !session_id.chars().any(|c| c == '/' || c == '\\' || c.is_control());

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidSessionId(session_id.to_string()))
    }
}
