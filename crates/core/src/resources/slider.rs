//! Home-page slider slides.
//!
//! A slide has a title, an optional subtitle, up to two call-to-action
//! buttons, an ordering hint and an optional background image.

use serde::{Deserialize, Serialize};

use crate::attachment::FileField;
use crate::form::{Form, FormValues};
use crate::payload::{Encoding, Fields};
use crate::query::SortDirection;
use crate::resource::{Record, Resource, SubmitMode};
use crate::types::Timestamp;
use crate::validation::FormCheck;

/// Default position of a new slide.
pub const DEFAULT_DISPLAY_ORDER: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSlide {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub primary_button_text: Option<String>,
    #[serde(default)]
    pub primary_button_link: Option<String>,
    #[serde(default)]
    pub secondary_button_text: Option<String>,
    #[serde(default)]
    pub secondary_button_link: Option<String>,
    #[serde(default)]
    pub display_order: Option<i64>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Record for HomeSlide {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(subtitle) = self.subtitle.as_deref() {
            fields.push(subtitle);
        }
        fields
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn media(&self) -> Vec<&str> {
        self.background_image.as_deref().into_iter().collect()
    }
}

pub struct HomeSlider;

impl Resource for HomeSlider {
    type Record = HomeSlide;

    const PATH: &'static str = "slider";
    const ROUTE: &'static str = "/home-slider";
    const LABEL: &'static str = "Home Slider";
    const LIST_KEY: &'static str = "sliders";
    const PAGE_SIZE: u32 = 5;
    const DEFAULT_SORT: Option<SortDirection> = Some(SortDirection::Asc);
    const AUTHENTICATED_READS: bool = false;
    const ENCODING: Encoding = Encoding::Multipart;
    const FILE_FIELDS: &'static [FileField] =
        &[FileField::image("backgroundImage", "Background image")];

    fn blank_form() -> Form {
        Form::new(
            FormValues::new()
                .with("title", "")
                .with("subtitle", "")
                .with("primaryButtonText", "")
                .with("primaryButtonLink", "")
                .with("secondaryButtonText", "")
                .with("secondaryButtonLink", "")
                .with("displayOrder", DEFAULT_DISPLAY_ORDER.to_string())
                .with("isActive", "true"),
        )
    }

    fn to_form(record: &HomeSlide) -> Form {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Form::new(
            FormValues::new()
                .with("title", record.title.as_str())
                .with("subtitle", text(&record.subtitle))
                .with("primaryButtonText", text(&record.primary_button_text))
                .with("primaryButtonLink", text(&record.primary_button_link))
                .with("secondaryButtonText", text(&record.secondary_button_text))
                .with("secondaryButtonLink", text(&record.secondary_button_link))
                .with(
                    "displayOrder",
                    record
                        .display_order
                        .unwrap_or(DEFAULT_DISPLAY_ORDER)
                        .to_string(),
                )
                .with("isActive", record.is_active.to_string()),
        )
        .with_current_media(
            "backgroundImage",
            record.background_image.clone().unwrap_or_default(),
        )
    }

    fn fields(check: &mut FormCheck<'_>, _mode: SubmitMode) -> Fields {
        vec![
            ("title", check.required("title", "Title").into()),
            ("subtitle", check.optional("subtitle").into()),
            ("primaryButtonText", check.optional("primaryButtonText").into()),
            ("primaryButtonLink", check.optional("primaryButtonLink").into()),
            ("secondaryButtonText", check.optional("secondaryButtonText").into()),
            ("secondaryButtonLink", check.optional("secondaryButtonLink").into()),
            ("displayOrder", check.order("displayOrder", DEFAULT_DISPLAY_ORDER).into()),
            ("isActive", check.flag("isActive", true).into()),
        ]
    }
}
