//! Organization structure charts.

use serde::{Deserialize, Serialize};

use crate::attachment::FileField;
use crate::form::{Form, FormValues};
use crate::payload::{Encoding, Fields};
use crate::resource::{Record, Resource, SubmitMode};
use crate::types::Timestamp;
use crate::validation::FormCheck;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgStructure {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Chart image.
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Record for OrgStructure {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn media(&self) -> Vec<&str> {
        self.banner.as_deref().into_iter().collect()
    }
}

pub struct OrganizationStructure;

impl Resource for OrganizationStructure {
    type Record = OrgStructure;

    const PATH: &'static str = "organization-structure";
    const ROUTE: &'static str = "/organization-structure";
    const LABEL: &'static str = "Organization Structure";
    const LIST_KEY: &'static str = "structures";
    const ENCODING: Encoding = Encoding::Multipart;
    const FILE_FIELDS: &'static [FileField] = &[FileField::image("banner", "Banner")];

    fn blank_form() -> Form {
        Form::new(
            FormValues::new()
                .with("title", "")
                .with("description", "")
                .with("isActive", "true"),
        )
    }

    fn to_form(record: &OrgStructure) -> Form {
        Form::new(
            FormValues::new()
                .with("title", record.title.as_str())
                .with("description", record.description.clone().unwrap_or_default())
                .with("isActive", record.is_active.to_string()),
        )
        .with_current_media("banner", record.banner.clone().unwrap_or_default())
    }

    fn fields(check: &mut FormCheck<'_>, _mode: SubmitMode) -> Fields {
        vec![
            ("title", check.required("title", "Title").into()),
            ("description", check.optional("description").into()),
            ("isActive", check.flag("isActive", true).into()),
        ]
    }
}
