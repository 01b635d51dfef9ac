//! Console navigation targets.
//!
//! Screens never navigate themselves; they hand a [`Route`] back to the
//! caller, which decides how to present it (the CLI prints it).

use std::fmt;

use crate::types::RecordId;

/// Path of the login view that unauthenticated screens redirect to.
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    /// A resource listing, e.g. `/banners`.
    Listing(&'static str),
    /// The create form of a resource, e.g. `/banners/new`.
    New(&'static str),
    /// The edit form of one record, e.g. `/banners/{id}/edit`.
    Edit(&'static str, RecordId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => LOGIN_PATH.to_string(),
            Route::Listing(base) => (*base).to_string(),
            Route::New(base) => format!("{base}/new"),
            Route::Edit(base, id) => format!("{base}/{id}/edit"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
