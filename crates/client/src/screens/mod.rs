//! Listing and create/edit screens, written once for every [`Resource`].
//!
//! A screen owns its local state (the loaded page, the form) and issues at
//! most one request at a time.  Navigation is never performed here: screens
//! return the [`Route`] to go to and the caller presents it.
//!
//! [`Resource`]: cms_core::resource::Resource

pub mod editor;
pub mod listing;

use cms_core::notice::Notice;
use cms_core::route::Route;
use cms_core::session::{Access, Credentials};

use crate::session::SessionStore;

pub use editor::{EditorScreen, SubmitOutcome};
pub use listing::ListingScreen;

/// A screen could not be shown; the user is sent to `to` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("redirecting to {to}")]
pub struct Redirect {
    pub to: Route,
    /// Notification to show on arrival, if any.
    pub notice: Option<Notice>,
}

/// Credentials for a protected screen, or a redirect to login.
pub(crate) fn require_session(store: &SessionStore, screen: &str) -> Result<Credentials, Redirect> {
    match store.guard() {
        Access::Granted(credentials) => Ok(credentials),
        Access::Redirect(route) => {
            tracing::warn!(screen, to = %route, "No session, redirecting");
            Err(Redirect {
                to: route,
                notice: None,
            })
        }
    }
}
