//! Persistent sign-in state.
//!
//! The store keeps the current [`Identity`] in memory behind an `RwLock`
//! and mirrors it to a JSON file, so a restart picks up where the user
//! left off. A file that cannot be read or parsed is treated as no
//! session rather than an error.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ClientError;
use crate::model::types::Identity;

#[derive(Serialize, Deserialize)]
struct StoredSession {
    identity: Identity,
    saved_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    path: Arc<PathBuf>,
    identity: Arc<RwLock<Option<Identity>>>,
}

impl SessionStore {
    /// Opens the store at `path`, restoring a previously saved session
    /// when one is present and readable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let identity = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<StoredSession>(&contents) {
                Ok(stored) => {
                    tracing::info!(
                        username = %stored.identity.username,
                        saved_at = %stored.saved_at,
                        "restored saved session"
                    );
                    Some(stored.identity)
                }
                Err(err) => {
                    tracing::warn!(%err, "ignoring unreadable session file");
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            path: Arc::new(path),
            identity: Arc::new(RwLock::new(identity)),
        }
    }

    /// Saves a new identity, replacing any existing one.
    pub async fn store(&self, identity: Identity) -> Result<(), ClientError> {
        let stored = StoredSession {
            identity: identity.clone(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| ClientError::Transport(format!("could not encode session: {e}")))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::Transport(format!("could not save session: {e}")))?;
        }
        std::fs::write(self.path.as_ref(), json)
            .map_err(|e| ClientError::Transport(format!("could not save session: {e}")))?;
        *self.identity.write().await = Some(identity);
        Ok(())
    }

    /// Forgets the session in memory and on disk. A missing file is fine.
    pub async fn clear(&self) -> Result<(), ClientError> {
        *self.identity.write().await = None;
        match std::fs::remove_file(self.path.as_ref()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ClientError::Transport(format!(
                "could not remove session file: {err}"
            ))),
        }
    }

    pub async fn current_identity(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.identity.read().await.as_ref().map(|i| i.token.clone())
    }

    pub async fn is_admin(&self) -> bool {
        self.identity
            .read()
            .await
            .as_ref()
            .map(|i| i.role.is_admin())
            .unwrap_or(false)
    }
}
