//! Photo galleries.
//!
//! A gallery belongs to one gallery category and holds one or more photos.
//! Depending on the endpoint the backend either populates the category or
//! returns its bare id, so [`CategoryRef`] accepts both.

use serde::{Deserialize, Serialize};

use crate::attachment::FileField;
use crate::form::{Form, FormValues};
use crate::payload::{Encoding, Fields};
use crate::resource::{Record, Resource, SubmitMode};
use crate::types::{RecordId, Timestamp};
use crate::validation::FormCheck;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Populated {
        #[serde(rename = "_id")]
        id: RecordId,
        name: String,
    },
    Id(RecordId),
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Populated { id, .. } => id,
            CategoryRef::Id(id) => id,
        }
    }

    /// Display name, or the id when the category was not populated.
    pub fn name(&self) -> &str {
        match self {
            CategoryRef::Populated { name, .. } => name,
            CategoryRef::Id(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: CategoryRef,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Record for Gallery {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.category.name()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.id())
    }

    fn media(&self) -> Vec<&str> {
        self.photos.iter().map(String::as_str).collect()
    }
}

pub struct Galleries;

impl Resource for Galleries {
    type Record = Gallery;

    const PATH: &'static str = "gallery";
    const ROUTE: &'static str = "/gallery";
    const LABEL: &'static str = "Gallery";
    const LIST_KEY: &'static str = "galleries";
    const ENCODING: Encoding = Encoding::Multipart;
    const FILE_FIELDS: &'static [FileField] =
        &[FileField::image("photos", "Photos").required().multiple()];

    fn blank_form() -> Form {
        Form::new(
            FormValues::new()
                .with("title", "")
                .with("description", "")
                .with("category", ""),
        )
    }

    fn to_form(record: &Gallery) -> Form {
        // Only the first photo is previewed; new uploads are added to the set.
        let cover = record.photos.first().cloned().unwrap_or_default();
        Form::new(
            FormValues::new()
                .with("title", record.title.as_str())
                .with("description", record.description.clone().unwrap_or_default())
                .with("category", record.category.id()),
        )
        .with_current_media("photos", cover)
    }

    fn fields(check: &mut FormCheck<'_>, _mode: SubmitMode) -> Fields {
        vec![
            ("title", check.required("title", "Title").into()),
            ("description", check.optional("description").into()),
            ("category", check.choice("category", "Category").into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::Attachment;
    use crate::payload::Payload;
    use serde_json::json;

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];

    #[test]
    fn category_may_be_populated_or_bare() {
        let populated: Gallery = serde_json::from_value(json!({
            "_id": "g1",
            "title": "Launch",
            "category": { "_id": "c1", "name": "Events" },
            "photos": ["https://cdn.example/1.jpg", "https://cdn.example/2.jpg"]
        }))
        .unwrap();
        assert_eq!(populated.category.id(), "c1");
        assert_eq!(populated.category.name(), "Events");
        assert_eq!(populated.media().len(), 2);

        let bare: Gallery = serde_json::from_value(json!({
            "_id": "g2", "title": "Field day", "category": "c2"
        }))
        .unwrap();
        assert_eq!(bare.category, CategoryRef::Id("c2".into()));
        assert!(bare.photos.is_empty());
    }

    #[test]
    fn create_needs_at_least_one_photo() {
        let mut form = Galleries::blank_form();
        form.set("title", "Launch");
        form.set("category", "c1");
        let err = Galleries::build_payload(&form, SubmitMode::Create).unwrap_err();
        assert_eq!(err.to_string(), "At least one photos is required");
    }

    #[test]
    fn every_staged_photo_is_uploaded() {
        let mut form = Galleries::blank_form();
        form.set("title", "Launch");
        form.set("category", "c1");
        form.stage(Attachment::new("photos", "a.jpg", JPEG.to_vec()), true);
        form.stage(Attachment::new("photos", "b.jpg", JPEG.to_vec()), true);

        let Payload::Multipart(body) = Galleries::build_payload(&form, SubmitMode::Create).unwrap()
        else {
            panic!("expected multipart");
        };
        assert_eq!(body.files.len(), 2);
        assert!(body.files.iter().all(|f| f.field == "photos"));
    }

    #[test]
    fn edit_form_selects_category_id() {
        let gallery: Gallery = serde_json::from_value(json!({
            "_id": "g1",
            "title": "Launch",
            "category": { "_id": "c1", "name": "Events" },
            "photos": ["https://cdn.example/1.jpg"]
        }))
        .unwrap();
        let form = Galleries::to_form(&gallery);
        assert_eq!(form.get("category"), Some("c1"));
        assert_eq!(form.current_media("photos"), Some("https://cdn.example/1.jpg"));
    }

    #[test]
    fn category_must_be_a_loaded_option() {
        let mut form = Galleries::blank_form();
        form.set("title", "Launch");
        form.set("category", "retired");
        form.stage(Attachment::new("photos", "a.jpg", JPEG.to_vec()), true);
        form.set_choices("category", vec!["c1".to_string()]);

        let err = Galleries::build_payload(&form, SubmitMode::Create).unwrap_err();
        assert!(err.field_errors().unwrap().get("category").is_some());

        form.set("category", "c1");
        assert!(Galleries::build_payload(&form, SubmitMode::Create).is_ok());
    }
}
