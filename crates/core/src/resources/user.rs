//! Console user accounts.
//!
//! The password is write-only: it is required when creating a user, and on
//! update it is only sent when a new one was typed in.

use serde::{Deserialize, Serialize};

use crate::form::{Form, FormValues};
use crate::payload::{Encoding, Fields};
use crate::resource::{Record, Resource, SubmitMode};
use crate::types::Timestamp;
use crate::validation::FormCheck;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLES: [&str; 2] = [ROLE_ADMIN, ROLE_EDITOR];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(&self.role)
    }
}

pub struct Users;

impl Resource for Users {
    type Record = User;

    const PATH: &'static str = "users";
    const ROUTE: &'static str = "/users";
    const LABEL: &'static str = "User";
    const LIST_KEY: &'static str = "users";
    const ENCODING: Encoding = Encoding::Json;

    fn blank_form() -> Form {
        Form::new(
            FormValues::new()
                .with("name", "")
                .with("email", "")
                .with("password", "")
                .with("role", ROLE_EDITOR),
        )
    }

    fn to_form(record: &User) -> Form {
        Form::new(
            FormValues::new()
                .with("name", record.name.as_str())
                .with("email", record.email.as_str())
                .with("password", "")
                .with("role", record.role.as_str()),
        )
    }

    fn fields(check: &mut FormCheck<'_>, mode: SubmitMode) -> Fields {
        let mut fields: Fields = vec![
            ("name", check.required("name", "Name").into()),
            ("email", check.email("email", "Email").into()),
        ];
        match mode {
            SubmitMode::Create => {
                fields.push(("password", check.required("password", "Password").into()));
            }
            SubmitMode::Update => {
                let password = check.optional("password");
                if !password.is_empty() {
                    fields.push(("password", password.into()));
                }
            }
        }
        fields.push(("role", check.one_of("role", "Role", &ROLES).into()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn existing() -> User {
        serde_json::from_value(json!({
            "_id": "u1",
            "name": "Kofi",
            "email": "kofi@example.org",
            "role": "admin"
        }))
        .unwrap()
    }

    #[test]
    fn password_required_on_create() {
        let mut form = Users::blank_form();
        form.set("name", "Esi");
        form.set("email", "esi@example.org");
        let err = Users::build_payload(&form, SubmitMode::Create).unwrap_err();
        assert_eq!(err.to_string(), "Password is required");
    }

    #[test]
    fn blank_password_is_left_out_of_updates() {
        let payload = Users::build_payload(&Users::to_form(&existing()), SubmitMode::Update).unwrap();
        assert!(!payload.contains("password"));
        assert_eq!(payload.text("role").as_deref(), Some("admin"));
    }

    #[test]
    fn new_password_is_sent_on_update() {
        let mut form = Users::to_form(&existing());
        form.set("password", "s3cret!");
        let payload = Users::build_payload(&form, SubmitMode::Update).unwrap();
        assert_eq!(payload.text("password").as_deref(), Some("s3cret!"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut form = Users::to_form(&existing());
        form.set("role", "owner");
        assert!(Users::build_payload(&form, SubmitMode::Update).is_err());
    }
}
