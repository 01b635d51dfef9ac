//! The authenticated CRUD resource pattern.
//!
//! Every console area (banners, news, team, ...) is one [`Resource`]: a
//! static description of its endpoint, its listing envelope, its form
//! fields, and how a form becomes a request body.  Listing and editor
//! screens are written once against this trait.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::attachment::FileField;
use crate::error::CoreError;
use crate::form::Form;
use crate::payload::{Encoding, Fields, Payload};
use crate::query::SortDirection;
use crate::route::Route;
use crate::types::RecordId;
use crate::validation::FormCheck;

/// Whether a submission creates a new record or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}

impl SubmitMode {
    pub fn verb(self) -> &'static str {
        match self {
            SubmitMode::Create => "create",
            SubmitMode::Update => "update",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            SubmitMode::Create => "Created",
            SubmitMode::Update => "Updated",
        }
    }
}

/// Accessors the listing needs from a backend record.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;

    /// Field the listing sorts by (the title, or the name).
    fn sort_key(&self) -> &str;

    /// Text fields matched by the listing search box.
    fn search_fields(&self) -> Vec<&str>;

    /// Category used by listings that offer a category filter.
    fn category(&self) -> Option<&str> {
        None
    }

    fn is_active(&self) -> Option<bool> {
        None
    }

    /// Media references (image URLs) stored on the record.
    fn media(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Static description of one backend resource.
pub trait Resource: Send + Sync + 'static {
    type Record: Record;

    /// API path segment, e.g. `"banners"` for `/banners/{id}`.
    const PATH: &'static str;
    /// Console listing route, e.g. `"/home-slider"`.
    const ROUTE: &'static str;
    /// Singular, human-readable name used in notices.
    const LABEL: &'static str;
    /// Envelope key holding the items in list responses.
    const LIST_KEY: &'static str;
    const PAGE_SIZE: u32 = 10;
    /// Initial listing order; `None` keeps backend order.
    const DEFAULT_SORT: Option<SortDirection> = None;
    /// Whether list requests carry the bearer token.
    const AUTHENTICATED_READS: bool = true;
    const ENCODING: Encoding;
    const FILE_FIELDS: &'static [FileField] = &[];

    /// Default values of the create form.
    fn blank_form() -> Form;

    /// Populate the edit form from a fetched record.
    fn to_form(record: &Self::Record) -> Form;

    /// Read and validate the body fields.  Errors are recorded on `check`.
    fn fields(check: &mut FormCheck<'_>, mode: SubmitMode) -> Fields;

    /// Validate the whole form and encode the request body.
    fn build_payload(form: &Form, mode: SubmitMode) -> Result<Payload, CoreError> {
        let mut check = FormCheck::new(form);
        let fields = Self::fields(&mut check, mode);
        let files = check.files(Self::FILE_FIELDS, mode);
        check.finish()?;
        Ok(Payload::encode(Self::ENCODING, fields, files))
    }

    /// Whether `name` is one of the form's text inputs.
    fn has_field(name: &str) -> bool {
        Self::blank_form().get(name).is_some()
    }

    fn file_field(name: &str) -> Option<&'static FileField> {
        Self::FILE_FIELDS.iter().find(|f| f.name == name)
    }

    fn listing_route() -> Route {
        Route::Listing(Self::ROUTE)
    }

    fn edit_route(id: impl Into<RecordId>) -> Route {
        Route::Edit(Self::ROUTE, id.into())
    }

    fn new_route() -> Route {
        Route::New(Self::ROUTE)
    }
}
