//! The process-wide session slot.
//!
//! [`SessionStore`] holds the current [`Session`] in a `watch` channel:
//! screens read a snapshot when they mount, and anything that cares about
//! sign-in/sign-out subscribes for changes.  Screens never write to it.

use std::path::Path;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::sync::watch;

use cms_core::session::{guard, Access, Session};

use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Session>>,
}

impl SessionStore {
    pub fn new(initial: Session) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Receiver notified whenever the session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Gate a protected screen on the current session.
    pub fn guard(&self) -> Access {
        guard(&self.tx.borrow())
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        self.tx.send_replace(Session::with_token(token));
        tracing::info!("Signed in");
    }

    pub fn sign_out(&self) {
        self.tx.send_replace(Session::anonymous());
        tracing::info!("Signed out");
    }

    /// Load a store from a session file written by [`save`](Self::save).
    /// A missing file means nobody is signed in.
    pub async fn load(path: &Path) -> Result<Self, ClientError> {
        let session = match tokio::fs::read_to_string(path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Session::anonymous(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self::new(session))
    }

    /// Persist the current session.  Signing out removes the file.
    pub async fn save(&self, path: &Path) -> Result<(), ClientError> {
        let session = self.current();
        if !session.is_authenticated() {
            return match tokio::fs::remove_file(path).await {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        let contents = serde_json::to_string(&session)?;
        write_private(path, contents.as_bytes()).await?;
        tracing::debug!(path = %path.display(), "Session saved");
        Ok(())
    }
}

/// Write `contents` to `path`, readable and writable by the owner only.
async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    // `mode` only applies when the file is created.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .await?;
    }
    file.write_all(contents).await?;
    file.flush().await
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Session::anonymous())
    }
}
