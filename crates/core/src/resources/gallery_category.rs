//! Categories that galleries are filed under.

use serde::{Deserialize, Serialize};

use crate::form::{Form, FormValues};
use crate::payload::{Encoding, Fields};
use crate::resource::{Record, Resource, SubmitMode};
use crate::types::Timestamp;
use crate::validation::FormCheck;

/// Query that restricts a category listing to active categories, as used
/// by the gallery form's category selector.
pub const ACTIVE_ONLY: (&str, &str) = ("isActive", "true");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Record for GalleryCategory {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

pub struct GalleryCategories;

impl Resource for GalleryCategories {
    type Record = GalleryCategory;

    const PATH: &'static str = "gallery-categories";
    const ROUTE: &'static str = "/gallery-categories";
    const LABEL: &'static str = "Gallery Category";
    const LIST_KEY: &'static str = "categories";
    const ENCODING: Encoding = Encoding::Json;

    fn blank_form() -> Form {
        Form::new(
            FormValues::new()
                .with("name", "")
                .with("description", "")
                .with("displayOrder", "0")
                .with("isActive", "true"),
        )
    }

    fn to_form(record: &GalleryCategory) -> Form {
        Form::new(
            FormValues::new()
                .with("name", record.name.as_str())
                .with("description", record.description.clone().unwrap_or_default())
                .with("displayOrder", record.display_order.to_string())
                .with("isActive", record.is_active.to_string()),
        )
    }

    fn fields(check: &mut FormCheck<'_>, _mode: SubmitMode) -> Fields {
        vec![
            ("name", check.required("name", "Name").into()),
            ("description", check.optional("description").into()),
            ("displayOrder", check.order("displayOrder", 0).into()),
            ("isActive", check.flag("isActive", true).into()),
        ]
    }
}
