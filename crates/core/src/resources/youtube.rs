//! Featured YouTube videos.
//!
//! Videos carry no files, so they are submitted as JSON.  The list is read
//! without credentials and shown newest first.

use serde::{Deserialize, Serialize};

use crate::form::{Form, FormValues};
use crate::payload::{Encoding, Fields};
use crate::query::SortDirection;
use crate::resource::{Record, Resource, SubmitMode};
use crate::types::Timestamp;
use crate::validation::FormCheck;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeVideo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub youtube_url: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub button_link: String,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Record for YouTubeVideo {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

pub struct YouTubeVideos;

impl Resource for YouTubeVideos {
    type Record = YouTubeVideo;

    const PATH: &'static str = "youtube";
    const ROUTE: &'static str = "/youtube-videos";
    const LABEL: &'static str = "YouTube Video";
    const LIST_KEY: &'static str = "videos";
    const PAGE_SIZE: u32 = 5;
    const DEFAULT_SORT: Option<SortDirection> = Some(SortDirection::Desc);
    const AUTHENTICATED_READS: bool = false;
    const ENCODING: Encoding = Encoding::Json;

    fn blank_form() -> Form {
        Form::new(
            FormValues::new()
                .with("title", "")
                .with("description", "")
                .with("youtubeUrl", "")
                .with("buttonText", "")
                .with("buttonLink", "")
                .with("displayOrder", "0")
                .with("isActive", "true"),
        )
    }

    fn to_form(record: &YouTubeVideo) -> Form {
        Form::new(
            FormValues::new()
                .with("title", record.title.as_str())
                .with("description", record.description.as_str())
                .with("youtubeUrl", record.youtube_url.as_str())
                .with("buttonText", record.button_text.as_str())
                .with("buttonLink", record.button_link.as_str())
                .with("displayOrder", record.display_order.to_string())
                .with("isActive", record.is_active.to_string()),
        )
    }

    fn fields(check: &mut FormCheck<'_>, _mode: SubmitMode) -> Fields {
        vec![
            ("title", check.required("title", "Title").into()),
            ("description", check.optional("description").into()),
            ("youtubeUrl", check.url("youtubeUrl", "YouTube URL").into()),
            ("buttonText", check.required("buttonText", "Button text").into()),
            ("buttonLink", check.required("buttonLink", "Button link").into()),
            ("displayOrder", check.order("displayOrder", 0).into()),
            ("isActive", check.flag("isActive", true).into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Payload;
    use serde_json::json;

    #[test]
    fn create_body_matches_backend_shape() {
        let mut form = YouTubeVideos::blank_form();
        form.set("title", "Intro");
        form.set("youtubeUrl", "https://youtu.be/abc123");
        form.set("buttonText", "Watch");
        form.set("buttonLink", "https://example.org");

        let payload = YouTubeVideos::build_payload(&form, SubmitMode::Create).unwrap();
        let Payload::Json(map) = payload else {
            panic!("expected a JSON body");
        };
        assert_eq!(
            serde_json::Value::Object(map),
            json!({
                "title": "Intro",
                "description": "",
                "youtubeUrl": "https://youtu.be/abc123",
                "buttonText": "Watch",
                "buttonLink": "https://example.org",
                "displayOrder": 0,
                "isActive": true
            })
        );
    }

    #[test]
    fn invalid_url_blocks_submission() {
        let mut form = YouTubeVideos::blank_form();
        form.set("title", "Intro");
        form.set("youtubeUrl", "youtube dot com");
        form.set("buttonText", "Watch");
        form.set("buttonLink", "https://example.org");
        let err = YouTubeVideos::build_payload(&form, SubmitMode::Create).unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("youtubeUrl").unwrap().message, "Must be a valid URL");
    }

    #[test]
    fn newest_first_and_public() {
        assert_eq!(YouTubeVideos::DEFAULT_SORT, Some(SortDirection::Desc));
        assert!(!YouTubeVideos::AUTHENTICATED_READS);
        assert!(YouTubeVideos::FILE_FIELDS.is_empty());
    }
}
