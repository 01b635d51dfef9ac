//! Domain layer of the CMS admin console.
//!
//! Everything here is pure: resource schemas, form validation, payload
//! construction, envelope normalization, listing and editor state.  The
//! HTTP side lives in `cms-client`.

pub mod attachment;
pub mod editor;
pub mod envelope;
pub mod error;
pub mod form;
pub mod listing;
pub mod notice;
pub mod payload;
pub mod query;
pub mod resource;
pub mod resources;
pub mod route;
pub mod session;
pub mod types;
pub mod validation;
