//! Downloadable publications: a document plus an optional cover image.

use serde::{Deserialize, Serialize};

use crate::attachment::FileField;
use crate::form::{Form, FormValues};
use crate::payload::{Encoding, Fields};
use crate::resource::{Record, Resource, SubmitMode};
use crate::types::Timestamp;
use crate::validation::FormCheck;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// URL of the uploaded document.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Record for Publication {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.author.as_deref());
        fields.extend(self.description.as_deref());
        fields
    }

    fn media(&self) -> Vec<&str> {
        self.file.as_deref().into_iter().chain(self.image.as_deref()).collect()
    }
}

pub struct Publications;

impl Resource for Publications {
    type Record = Publication;

    const PATH: &'static str = "publications";
    const ROUTE: &'static str = "/publications";
    const LABEL: &'static str = "Publication";
    const LIST_KEY: &'static str = "publications";
    const ENCODING: Encoding = Encoding::Multipart;
    const FILE_FIELDS: &'static [FileField] = &[
        FileField::document("file", "Document").required(),
        FileField::image("image", "Cover image"),
    ];

    fn blank_form() -> Form {
        Form::new(
            FormValues::new()
                .with("title", "")
                .with("description", "")
                .with("author", ""),
        )
    }

    fn to_form(record: &Publication) -> Form {
        Form::new(
            FormValues::new()
                .with("title", record.title.as_str())
                .with("description", record.description.clone().unwrap_or_default())
                .with("author", record.author.clone().unwrap_or_default()),
        )
        .with_current_media("file", record.file.clone().unwrap_or_default())
        .with_current_media("image", record.image.clone().unwrap_or_default())
    }

    fn fields(check: &mut FormCheck<'_>, _mode: SubmitMode) -> Fields {
        vec![
            ("title", check.required("title", "Title").into()),
            ("description", check.optional("description").into()),
            ("author", check.optional("author").into()),
        ]
    }
}
