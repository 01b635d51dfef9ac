//! News and events.

use serde::{Deserialize, Serialize};

use crate::attachment::FileField;
use crate::form::{Form, FormValues};
use crate::payload::{Encoding, Fields};
use crate::resource::{Record, Resource, SubmitMode};
use crate::types::Timestamp;
use crate::validation::FormCheck;

pub const CATEGORY_MEDIA: &str = "Media News";
pub const CATEGORY_GENERAL: &str = "General News";
pub const CATEGORY_EVENTS: &str = "Events and Trainings";
pub const CATEGORY_RADIO: &str = "Radio Programmes";

/// The categories an article may be filed under.
pub const CATEGORIES: [&str; 4] = [
    CATEGORY_MEDIA,
    CATEGORY_GENERAL,
    CATEGORY_EVENTS,
    CATEGORY_RADIO,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Event or publication date, `YYYY-MM-DD` (or a full timestamp).
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Record for NewsItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn media(&self) -> Vec<&str> {
        self.image.as_deref().into_iter().collect()
    }
}

pub struct News;

impl Resource for News {
    type Record = NewsItem;

    const PATH: &'static str = "news";
    const ROUTE: &'static str = "/news-and-events";
    const LABEL: &'static str = "News";
    const LIST_KEY: &'static str = "news";
    const PAGE_SIZE: u32 = 5;
    const ENCODING: Encoding = Encoding::Multipart;
    const FILE_FIELDS: &'static [FileField] = &[FileField::image("image", "Image")];

    fn blank_form() -> Form {
        Form::new(
            FormValues::new()
                .with("title", "")
                .with("description", "")
                .with("category", "")
                .with("date", ""),
        )
    }

    fn to_form(record: &NewsItem) -> Form {
        // Timestamps from the backend are cut down to the date part.
        let date = record
            .date
            .as_deref()
            .map(|d| d.get(..10).unwrap_or(d))
            .unwrap_or_default();
        Form::new(
            FormValues::new()
                .with("title", record.title.as_str())
                .with("description", record.description.as_str())
                .with("category", record.category.as_str())
                .with("date", date),
        )
        .with_current_media("image", record.image.clone().unwrap_or_default())
    }

    fn fields(check: &mut FormCheck<'_>, mode: SubmitMode) -> Fields {
        let title = check.required("title", "Title");
        let description = check.required("description", "Description");
        let category = check.one_of("category", "Category", &CATEGORIES);
        let date = check.date("date", "Date");

        let mut fields: Fields = vec![
            ("title", title.into()),
            ("description", description.into()),
            ("category", category.into()),
        ];
        // Clearing a stored date on edit sends it blank; otherwise a blank
        // date is left out.
        if !date.is_empty() || (mode == SubmitMode::Update && check.had_value("date")) {
            fields.push(("date", date.into()));
        }
        fields
    }
}
