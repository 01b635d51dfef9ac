//! HTTP side of the CMS console: the backend API client, the process-wide
//! session slot, and the listing/editor screens built on `cms-core`.

pub mod api;
pub mod config;
pub mod error;
pub mod screens;
pub mod session;

pub use api::CmsApi;
pub use config::ClientConfig;
pub use error::ClientError;
pub use session::SessionStore;
