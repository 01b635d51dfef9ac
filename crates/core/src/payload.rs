//! Request bodies for create and update calls.
//!
//! Resources produce typed [`FieldValue`]s; [`Payload::encode`] turns them
//! into either a JSON object or a multipart form.  Multipart has no types,
//! so booleans and integers are sent in their string form (`"true"`, `"1"`).

use serde_json::{Map, Value};

use crate::attachment::Attachment;

/// How a resource submits its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `Content-Type: application/json`.
    Json,
    /// `multipart/form-data`, used by every resource that carries files.
    Multipart,
}

/// A typed body field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Int(i64),
}

impl FieldValue {
    /// The multipart (string) rendering of the value.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::from(*i),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

/// Ordered list of body fields produced by a resource.
pub type Fields = Vec<(&'static str, FieldValue)>;

/// A `multipart/form-data` body before it is handed to the HTTP client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub texts: Vec<(String, String)>,
    pub files: Vec<Attachment>,
}

impl MultipartForm {
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.texts.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, attachment: Attachment) -> Self {
        self.files.push(attachment);
        self
    }
}

/// A ready-to-send request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Map<String, Value>),
    Multipart(MultipartForm),
}

impl Payload {
    /// Encode typed fields and staged files.
    ///
    /// Files are only meaningful for multipart bodies; a JSON resource
    /// never declares file inputs, so any files passed alongside
    /// [`Encoding::Json`] are ignored.
    pub fn encode(encoding: Encoding, fields: Fields, files: Vec<Attachment>) -> Self {
        match encoding {
            Encoding::Json => {
                let map = fields
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value.to_json()))
                    .collect();
                Payload::Json(map)
            }
            Encoding::Multipart => {
                let form = fields
                    .into_iter()
                    .fold(MultipartForm::default(), |form, (name, value)| {
                        form.text(name, value.as_text())
                    });
                Payload::Multipart(files.into_iter().fold(form, MultipartForm::file))
            }
        }
    }

    /// Whether the body carries `field`, as a value or as a file part.
    pub fn contains(&self, field: &str) -> bool {
        match self {
            Payload::Json(map) => map.contains_key(field),
            Payload::Multipart(form) => {
                form.texts.iter().any(|(name, _)| name == field)
                    || form.files.iter().any(|f| f.field == field)
            }
        }
    }

    /// String rendering of a non-file field, if present.
    pub fn text(&self, field: &str) -> Option<String> {
        match self {
            Payload::Json(map) => map.get(field).map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            Payload::Multipart(form) => form
                .texts
                .iter()
                .find(|(name, _)| name == field)
                .map(|(_, value)| value.clone()),
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> Fields {
        vec![
            ("title", "Intro".into()),
            ("isActive", true.into()),
            ("displayOrder", 0_i64.into()),
        ]
    }

    #[test]
    fn json_keeps_types() {
        let payload = Payload::encode(Encoding::Json, sample_fields(), vec![]);
        let Payload::Json(map) = payload else {
            panic!("expected JSON payload");
        };
        assert_eq!(map["title"], "Intro");
        assert_eq!(map["isActive"], true);
        assert_eq!(map["displayOrder"], 0);
    }

    #[test]
    fn multipart_stringifies_scalars() {
        let payload = Payload::encode(Encoding::Multipart, sample_fields(), vec![]);
        assert!(payload.is_multipart());
        assert_eq!(payload.text("isActive").as_deref(), Some("true"));
        assert_eq!(payload.text("displayOrder").as_deref(), Some("0"));
    }

    #[test]
    fn multipart_contains_file_parts() {
        let file = Attachment::new("image", "a.pdf", b"%PDF".to_vec());
        let payload = Payload::encode(Encoding::Multipart, sample_fields(), vec![file]);
        assert!(payload.contains("image"));
        assert_eq!(payload.text("image"), None);
    }
}
