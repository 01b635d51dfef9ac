//! Session value and the guard that gates protected screens.
//!
//! A [`Session`] is an immutable snapshot; the process-wide slot that
//! holds the current one lives in `cms-client`.  Screens receive
//! [`Credentials`] from [`guard`] and thread them into every request.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::route::Route;

/// Authentication state of the console.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredSession")]
pub struct Session {
    token: Option<String>,
}

/// On-disk shape of a session, read back through [`Session::with_token`].
#[derive(Deserialize)]
struct StoredSession {
    #[serde(default)]
    token: Option<String>,
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        stored
            .token
            .map(Session::with_token)
            .unwrap_or_else(Session::anonymous)
    }
}

impl Session {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// A session holding `token`.  Blank tokens count as absent.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            return Self::anonymous();
        }
        Self { token: Some(token) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.token.clone().map(Credentials)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// A bearer token known to be present.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn token(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(***)")
    }
}

/// Outcome of guarding a protected screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted(Credentials),
    Redirect(Route),
}

/// Grant access when a token is present, otherwise redirect to login.
///
/// There is no expiry check: an expired token is indistinguishable from
/// a valid one until the backend rejects it.
pub fn guard(session: &Session) -> Access {
    match session.credentials() {
        Some(credentials) => Access::Granted(credentials),
        None => Access::Redirect(Route::Login),
    }
}
