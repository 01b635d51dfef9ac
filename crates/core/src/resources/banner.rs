//! Home-page banners: a title, one image, and an active flag.

use serde::{Deserialize, Serialize};

use crate::attachment::FileField;
use crate::form::{Form, FormValues};
use crate::payload::{Encoding, Fields};
use crate::resource::{Record, Resource, SubmitMode};
use crate::types::Timestamp;
use crate::validation::FormCheck;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Record for Banner {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn media(&self) -> Vec<&str> {
        vec![self.image.as_str()]
    }
}

pub struct Banners;

impl Resource for Banners {
    type Record = Banner;

    const PATH: &'static str = "banners";
    const ROUTE: &'static str = "/banners";
    const LABEL: &'static str = "Banner";
    const LIST_KEY: &'static str = "banners";
    const ENCODING: Encoding = Encoding::Multipart;
    const FILE_FIELDS: &'static [FileField] = &[FileField::image("image", "Image").required()];

    fn blank_form() -> Form {
        Form::new(FormValues::new().with("title", "").with("isActive", "true"))
    }

    fn to_form(record: &Banner) -> Form {
        Form::new(
            FormValues::new()
                .with("title", record.title.as_str())
                .with("isActive", record.is_active.to_string()),
        )
        .with_current_media("image", record.image.as_str())
    }

    fn fields(check: &mut FormCheck<'_>, _mode: SubmitMode) -> Fields {
        let title = check.required("title", "Title");
        let is_active = check.flag("isActive", true);
        vec![("title", title.into()), ("isActive", is_active.into())]
    }
}
