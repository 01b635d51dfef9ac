//! Files staged on a form before submission.
//!
//! An [`Attachment`] is a file the user picked locally; it is not uploaded
//! until the form is submitted, and only the fields that have a staged
//! attachment are sent.

use std::path::Path;

/// What a file input accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `image/*` only; content is sniffed.
    Image,
    /// Any document (PDF, office files, ...).
    Document,
}

/// Static description of one file input on a resource form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileField {
    /// Multipart field name, e.g. `"image"` or `"backgroundImage"`.
    pub name: &'static str,
    /// Human-readable label used in validation messages.
    pub label: &'static str,
    pub kind: FileKind,
    /// Whether a new record cannot be created without this file.
    pub required_on_create: bool,
    /// Whether several files may be staged under this name.
    pub multiple: bool,
}

impl FileField {
    pub const fn image(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FileKind::Image,
            required_on_create: false,
            multiple: false,
        }
    }

    pub const fn document(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FileKind::Document,
            required_on_create: false,
            multiple: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required_on_create = true;
        self
    }

    pub const fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }
}

/// A locally selected file, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Stage `bytes` under `field`.  The content type is sniffed from the
    /// bytes and falls back to the file extension.
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = sniff_content_type(&file_name, &bytes).to_string();
        Self {
            field: field.into(),
            file_name,
            content_type,
            bytes,
        }
    }

    /// Whether the bytes decode as one of the supported image formats.
    pub fn is_image(&self) -> bool {
        image::guess_format(&self.bytes).is_ok()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

fn sniff_content_type(file_name: &str, bytes: &[u8]) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
