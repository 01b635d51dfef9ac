//! The editable state of a create/edit form.
//!
//! Field values are kept as the strings a user typed; typing and
//! validation happen in [`crate::validation::FormCheck`] when the form is
//! turned into a payload.

use std::collections::BTreeMap;

use crate::attachment::Attachment;

/// String-typed field values keyed by wire name (`title`, `isActive`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used for defaults and record population.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// What a file input currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// A newly selected local file that has not been uploaded yet.
    Staged(String),
    /// The reference already stored by the backend.
    Current(String),
}

/// A form: typed-in values, staged files, and the record's existing media.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    values: FormValues,
    /// Values the form was opened with.
    initial: FormValues,
    staged: Vec<Attachment>,
    current_media: BTreeMap<String, String>,
    choices: BTreeMap<String, Vec<String>>,
}

impl Form {
    pub fn new(values: FormValues) -> Self {
        Self {
            initial: values.clone(),
            values,
            staged: Vec::new(),
            current_media: BTreeMap::new(),
            choices: BTreeMap::new(),
        }
    }

    /// Record the backend's stored reference for a file field so it can be
    /// previewed while editing.
    pub fn with_current_media(mut self, field: &str, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.current_media.insert(field.to_string(), url);
        }
        self
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.set(field, value);
    }

    /// The value `field` held when the form was opened.
    pub fn initial(&self, field: &str) -> Option<&str> {
        self.initial.get(field)
    }

    /// Restrict `field` to the given options (e.g. ids loaded from the
    /// backend for a select input).
    pub fn set_choices(&mut self, field: &str, options: impl IntoIterator<Item = String>) {
        self.choices
            .insert(field.to_string(), options.into_iter().collect());
    }

    /// Options loaded for `field`, if it has any.
    pub fn choices(&self, field: &str) -> Option<&[String]> {
        self.choices.get(field).map(Vec::as_slice)
    }

    /// Stage a file.  Single-file inputs replace any earlier selection;
    /// inputs accepting several files append.
    pub fn stage(&mut self, attachment: Attachment, multiple: bool) {
        if !multiple {
            self.staged.retain(|a| a.field != attachment.field);
        }
        self.staged.push(attachment);
    }

    /// Drop every staged file for `field`.
    pub fn clear_staged(&mut self, field: &str) {
        self.staged.retain(|a| a.field != field);
    }

    pub fn staged(&self, field: &str) -> impl Iterator<Item = &Attachment> {
        let field = field.to_string();
        self.staged.iter().filter(move |a| a.field == field)
    }

    pub fn has_staged(&self, field: &str) -> bool {
        self.staged.iter().any(|a| a.field == field)
    }

    pub fn current_media(&self, field: &str) -> Option<&str> {
        self.current_media.get(field).map(String::as_str)
    }

    /// The staged file's name if one was picked, else the stored reference.
    pub fn preview(&self, field: &str) -> Option<Preview> {
        if let Some(staged) = self.staged(field).last() {
            return Some(Preview::Staged(staged.file_name.clone()));
        }
        self.current_media(field)
            .map(|url| Preview::Current(url.to_string()))
    }
}
