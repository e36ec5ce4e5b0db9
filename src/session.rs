//! Process-wide session store.
//!
//! Holds the tokens, the signed-in user and its role behind a `watch` channel so
//! any part of the client can observe sign-in and sign-out. Optionally mirrored
//! to a JSON file so a session survives restarts.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{
    error::ClientResult,
    models::{enums::Role, user::LoginResponse, User},
};

/// Signed-in state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            user: response.user,
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<Session>>>,
    file: Option<PathBuf>,
}

impl SessionStore {
    /// In-memory store, starts signed out
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            file: None,
        }
    }

    /// Store backed by `path`; a session previously saved there is restored
    pub fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref().to_path_buf();
        let restored = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                    None
                }
            }
        } else {
            None
        };

        if restored.is_some() {
            tracing::info!("Restored session from {}", path.display());
        }

        let (tx, _rx) = watch::channel(restored);
        Ok(Self {
            tx: Arc::new(tx),
            file: Some(path),
        })
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.access_token.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.tx.borrow().as_ref().map(Session::role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Observe sign-in / sign-out; the receiver sees the current value first
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    /// Replace the session with a freshly issued one
    pub fn sign_in(&self, response: LoginResponse) -> ClientResult<Session> {
        let session = Session::from(response);
        tracing::info!(
            "Signed in as {} ({})",
            session.user.email,
            session.role()
        );
        self.tx.send_replace(Some(session.clone()));
        self.persist(Some(&session))?;
        Ok(session)
    }

    /// Wipe the local session (logout or rejected token)
    pub fn clear(&self) -> ClientResult<()> {
        let was_signed_in = self.tx.send_if_modified(|current| current.take().is_some());
        if was_signed_in {
            tracing::info!("Session cleared");
        }
        self.persist(None)
    }

    fn persist(&self, session: Option<&Session>) -> ClientResult<()> {
        let Some(path) = &self.file else {
            return Ok(());
        };

        match session {
            Some(session) => {
                let raw = serde_json::to_string_pretty(session)
                    .map_err(|e| crate::error::ClientError::Decode(e.to_string()))?;
                write_private(path, raw.as_bytes())?;
            }
            None if path.exists() => fs::remove_file(path)?,
            None => {}
        }
        Ok(())
    }
}

/// Write `contents` readable by the owner only; the file holds bearer tokens
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // mode() only applies on creation
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)?;
    file.sync_all()
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
