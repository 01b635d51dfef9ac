//! Team members shown on the "About us" page.

use serde::{Deserialize, Serialize};

use crate::attachment::FileField;
use crate::form::{Form, FormValues};
use crate::payload::{Encoding, Fields};
use crate::resource::{Record, Resource, SubmitMode};
use crate::types::Timestamp;
use crate::validation::FormCheck;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Record for TeamMember {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.position.as_str()]
    }

    fn media(&self) -> Vec<&str> {
        self.image.as_deref().into_iter().collect()
    }
}

pub struct Team;

impl Resource for Team {
    type Record = TeamMember;

    const PATH: &'static str = "team";
    const ROUTE: &'static str = "/team";
    const LABEL: &'static str = "Team Member";
    const LIST_KEY: &'static str = "team";
    const PAGE_SIZE: u32 = 5;
    const ENCODING: Encoding = Encoding::Multipart;
    const FILE_FIELDS: &'static [FileField] = &[FileField::image("image", "Photo")];

    fn blank_form() -> Form {
        Form::new(
            FormValues::new()
                .with("name", "")
                .with("position", "")
                .with("bio", ""),
        )
    }

    fn to_form(record: &TeamMember) -> Form {
        Form::new(
            FormValues::new()
                .with("name", record.name.as_str())
                .with("position", record.position.as_str())
                .with("bio", record.bio.clone().unwrap_or_default()),
        )
        .with_current_media("image", record.image.clone().unwrap_or_default())
    }

    fn fields(check: &mut FormCheck<'_>, _mode: SubmitMode) -> Fields {
        vec![
            ("name", check.required("name", "Name").into()),
            ("position", check.required("position", "Position").into()),
            ("bio", check.optional("bio").into()),
        ]
    }
}
