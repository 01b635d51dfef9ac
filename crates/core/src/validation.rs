//! Client-side form validation.
//!
//! [`FormCheck`] walks a [`Form`] field by field, collecting every failure
//! instead of stopping at the first one, so all inline errors can be shown
//! at once.  Nothing here touches the network.

use chrono::NaiveDate;
use validator::{ValidateEmail, ValidateUrl};

use crate::attachment::{Attachment, FileField, FileKind};
use crate::error::{CoreError, FieldError, FieldErrors};
use crate::form::Form;
use crate::resource::SubmitMode;

/// Accumulates field errors while reading typed values out of a form.
pub struct FormCheck<'a> {
    form: &'a Form,
    errors: Vec<FieldError>,
}

impl<'a> FormCheck<'a> {
    pub fn new(form: &'a Form) -> Self {
        Self {
            form,
            errors: Vec::new(),
        }
    }

    fn raw(&self, field: &str) -> &'a str {
        self.form.get(field).unwrap_or("")
    }

    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// A non-blank text field.  The value is returned untrimmed.
    pub fn required(&mut self, field: &str, label: &str) -> String {
        let value = self.raw(field);
        if value.trim().is_empty() {
            self.fail(field, format!("{label} is required"));
        }
        value.to_string()
    }

    /// An optional text field; blank becomes the empty string.
    pub fn optional(&self, field: &str) -> String {
        self.raw(field).to_string()
    }

    /// A required, absolute URL.
    pub fn url(&mut self, field: &str, label: &str) -> String {
        let value = self.raw(field).trim().to_string();
        if value.is_empty() {
            self.fail(field, format!("{label} is required"));
        } else if !value.validate_url() {
            self.fail(field, "Must be a valid URL");
        }
        value
    }

    /// A required email address.
    pub fn email(&mut self, field: &str, label: &str) -> String {
        let value = self.raw(field).trim().to_string();
        if value.is_empty() {
            self.fail(field, format!("{label} is required"));
        } else if !value.validate_email() {
            self.fail(field, "Must be a valid email address");
        }
        value
    }

    /// A required value restricted to `allowed`.
    pub fn one_of(&mut self, field: &str, label: &str, allowed: &[&str]) -> String {
        let value = self.raw(field).trim();
        if value.is_empty() {
            self.fail(field, format!("{label} is required"));
        } else if !allowed.contains(&value) {
            self.fail(
                field,
                format!("{label} must be one of: {}", allowed.join(", ")),
            );
        }
        value.to_string()
    }

    /// A required selection.  When options were loaded onto the form the
    /// value must be one of them.
    pub fn choice(&mut self, field: &str, label: &str) -> String {
        let value = self.raw(field).trim();
        let form = self.form;
        if value.is_empty() {
            self.fail(field, format!("{label} is required"));
        } else if let Some(options) = form.choices(field) {
            if !options.iter().any(|o| o == value) {
                self.fail(
                    field,
                    format!("{label} '{value}' is not one of the available options"),
                );
            }
        }
        value.to_string()
    }

    /// Whether `field` held a non-blank value when the form was opened.
    pub fn had_value(&self, field: &str) -> bool {
        self.form
            .initial(field)
            .is_some_and(|v| !v.trim().is_empty())
    }

    /// A checkbox.  Blank means `default`.
    pub fn flag(&mut self, field: &str, default: bool) -> bool {
        match self.raw(field).trim().to_ascii_lowercase().as_str() {
            "" => default,
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            other => {
                let message = format!("'{other}' is not a valid true/false value");
                self.fail(field, message);
                default
            }
        }
    }

    /// A non-negative ordering integer.  Blank means `default`.
    pub fn order(&mut self, field: &str, default: i64) -> i64 {
        let raw = self.raw(field).trim();
        if raw.is_empty() {
            return default;
        }
        match raw.parse::<i64>() {
            Ok(n) if n >= 0 => n,
            _ => {
                self.fail(field, "Display order must be a non-negative number");
                default
            }
        }
    }

    /// An optional calendar date in `YYYY-MM-DD` form.
    pub fn date(&mut self, field: &str, label: &str) -> String {
        let raw = self.raw(field).trim();
        if !raw.is_empty() && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() {
            self.fail(field, format!("{label} must be a date (YYYY-MM-DD)"));
        }
        raw.to_string()
    }

    /// Validate the staged files for every declared file input and return
    /// the ones to upload.  Unstaged inputs contribute nothing, which
    /// leaves the stored file untouched on update.
    pub fn files(&mut self, fields: &[FileField], mode: SubmitMode) -> Vec<Attachment> {
        let mut out = Vec::new();
        for spec in fields {
            let staged: Vec<&Attachment> = self.form.staged(spec.name).collect();

            if staged.is_empty() {
                if spec.required_on_create && mode == SubmitMode::Create {
                    let message = if spec.multiple {
                        format!("At least one {} is required", spec.label.to_lowercase())
                    } else {
                        format!("Please select {}", with_article(spec.label))
                    };
                    self.fail(spec.name, message);
                }
                continue;
            }

            for file in staged {
                if file.is_empty() {
                    self.fail(spec.name, format!("{} is empty", file.file_name));
                } else if spec.kind == FileKind::Image && !file.is_image() {
                    self.fail(spec.name, format!("{} must be an image", file.file_name));
                } else {
                    out.push(file.clone());
                }
            }
        }
        out
    }

    /// Fail with every collected error, if any.
    pub fn finish(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidForm(FieldErrors(self.errors)))
        }
    }
}

fn with_article(label: &str) -> String {
    let lower = label.to_lowercase();
    match lower.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => format!("an {lower}"),
        _ => format!("a {lower}"),
    }
}
