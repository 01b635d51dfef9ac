//! Create/edit form screen.

use std::marker::PhantomData;
use std::path::Path;

use serde_json::Value;

use cms_core::attachment::Attachment;
use cms_core::editor::{Editor, EditorPhase};
use cms_core::error::CoreError;
use cms_core::form::{Form, Preview};
use cms_core::notice::Notice;
use cms_core::resource::{Resource, SubmitMode};
use cms_core::resources::gallery::Galleries;
use cms_core::resources::gallery_category::{GalleryCategories, GalleryCategory, ACTIVE_ONLY};
use cms_core::route::Route;
use cms_core::session::Credentials;

use super::{require_session, ListingScreen, Redirect};
use crate::api::{new_idempotency_key, CmsApi};
use crate::error::ClientError;
use crate::session::SessionStore;

/// Most categories offered by the gallery form's selector.
pub const CATEGORY_OPTIONS_LIMIT: u32 = 100;

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Saved; show `notice` and go to `navigate`.
    Saved {
        notice: Notice,
        navigate: Route,
        /// Body returned by the backend.
        response: Value,
    },
    /// Not saved; show `notice` and stay on the form with values intact.
    Rejected { notice: Notice },
}

impl SubmitOutcome {
    pub fn notice(&self) -> &Notice {
        match self {
            SubmitOutcome::Saved { notice, .. } | SubmitOutcome::Rejected { notice } => notice,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved { .. })
    }
}

pub struct EditorScreen<R: Resource> {
    api: CmsApi,
    credentials: Credentials,
    editor: Editor,
    /// Sent with every attempt at the current submission.  Renewed when
    /// the form changes or a save goes through.
    idempotency_key: String,
    _resource: PhantomData<R>,
}

impl<R: Resource> EditorScreen<R> {
    /// Open the create form (`id == None`) or the edit form for `id`.
    ///
    /// Edit forms fetch the record first; if that fails the user is sent
    /// back to the listing with an error notice.
    pub async fn mount(api: CmsApi, store: &SessionStore, id: Option<&str>) -> Result<Self, Redirect> {
        let credentials = require_session(store, R::ROUTE)?;
        let editor = match id {
            Some(id) => Editor::for_edit(id),
            None => Editor::for_create(R::blank_form()),
        };
        let mut screen = Self {
            api,
            credentials,
            editor,
            idempotency_key: new_idempotency_key(),
            _resource: PhantomData,
        };

        let id = screen.editor.target().unwrap_or_default().to_string();
        let phase = screen
            .editor
            .mount()
            .map_err(|e| screen.load_redirect(&id, e.into()))?;
        if phase == EditorPhase::Loading {
            screen.load_record(&id).await?;
        }
        Ok(screen)
    }

    async fn load_record(&mut self, id: &str) -> Result<(), Redirect> {
        match self.api.fetch::<R>(&self.credentials, id).await {
            Ok(record) => {
                self.editor
                    .loaded(R::to_form(&record))
                    .map_err(|e| self.load_redirect(id, e.into()))?;
                Ok(())
            }
            Err(e) => {
                self.editor
                    .load_failed(e.user_message())
                    .map_err(|t| self.load_redirect(id, t.into()))?;
                Err(self.load_redirect(id, e))
            }
        }
    }

    fn load_redirect(&self, id: &str, err: ClientError) -> Redirect {
        tracing::error!(resource = R::PATH, id, error = %err, "Failed to load record");
        Redirect {
            to: R::listing_route(),
            notice: Some(Notice::error(format!(
                "Failed to load {}.",
                R::LABEL.to_lowercase()
            ))),
        }
    }

    pub fn mode(&self) -> SubmitMode {
        self.editor.mode()
    }

    pub fn phase(&self) -> EditorPhase {
        self.editor.phase()
    }

    pub fn form(&self) -> &Form {
        self.editor.form()
    }

    /// Message shown under the form after the last failed submit.
    pub fn last_error(&self) -> Option<&str> {
        self.editor.last_error()
    }

    pub fn preview(&self, field: &str) -> Option<Preview> {
        self.editor.form().preview(field)
    }

    /// Type `value` into `field`.  Fields the form does not have are
    /// refused.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), ClientError> {
        if !R::has_field(field) {
            return Err(CoreError::Validation(format!(
                "{} has no field '{field}'",
                R::LABEL
            ))
            .into());
        }
        let value = value.into();
        let form = self.editor.form_mut()?;
        if form.get(field) != Some(value.as_str()) {
            form.set(field, value);
            self.idempotency_key = new_idempotency_key();
        }
        Ok(())
    }

    /// Key sent with the next submit.
    pub fn idempotency_key(&self) -> &str {
        &self.idempotency_key
    }

    /// Stage an in-memory file on a declared file input.
    pub fn stage(&mut self, attachment: Attachment) -> Result<(), ClientError> {
        let spec = R::file_field(&attachment.field).ok_or_else(|| {
            CoreError::Validation(format!(
                "{} has no file field '{}'",
                R::LABEL,
                attachment.field
            ))
        })?;
        self.editor.form_mut()?.stage(attachment, spec.multiple);
        self.idempotency_key = new_idempotency_key();
        Ok(())
    }

    /// Read a local file and stage it on `field`.  Nothing is uploaded
    /// until submit.
    pub async fn stage_file(&mut self, field: &str, path: &Path) -> Result<(), ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| field.to_string());
        tracing::debug!(field, file = %file_name, size = bytes.len(), "File staged");
        self.stage(Attachment::new(field, file_name, bytes))
    }

    /// Validate and submit the form.
    ///
    /// Validation failures never reach the network.  Backend failures leave
    /// the form as typed, with the backend's message (or a generic one).
    pub async fn submit(&mut self) -> Result<SubmitOutcome, ClientError> {
        let phase = self.editor.phase();
        if phase != EditorPhase::Ready {
            return Err(CoreError::InvalidTransition {
                from: phase.as_str(),
                to: EditorPhase::Submitting.as_str(),
            }
            .into());
        }

        let mode = self.editor.mode();
        let payload = match R::build_payload(self.editor.form(), mode) {
            Ok(payload) => payload,
            Err(e) => {
                let message = e.to_string();
                tracing::debug!(resource = R::PATH, error = %message, "Form rejected");
                self.editor.reject(message.clone());
                return Ok(SubmitOutcome::Rejected {
                    notice: Notice::error(message),
                });
            }
        };

        self.editor.begin_submit()?;
        let target = self.editor.target().map(str::to_string);
        let key = self.idempotency_key.as_str();
        let result = match target.as_deref() {
            Some(id) => self.api.update::<R>(&self.credentials, id, key, payload).await,
            None => self.api.create::<R>(&self.credentials, key, payload).await,
        };

        match result {
            Ok(response) => {
                self.editor.submit_succeeded()?;
                self.idempotency_key = new_idempotency_key();
                tracing::info!(resource = R::PATH, action = mode.verb(), "Record saved");
                let navigate = R::listing_route();
                Ok(SubmitOutcome::Saved {
                    notice: Notice::saved(R::LABEL, mode.past_tense(), navigate.clone()),
                    navigate,
                    response,
                })
            }
            Err(e) => {
                tracing::error!(resource = R::PATH, action = mode.verb(), error = %e, "Submit failed");
                let message = e.user_message();
                self.editor.submit_failed(message.clone())?;
                Ok(SubmitOutcome::Rejected {
                    notice: Notice::error(message),
                })
            }
        }
    }
}

impl EditorScreen<Galleries> {
    /// Load the active gallery categories and make their ids the only
    /// values the `category` field accepts.
    pub async fn load_category_options(&mut self) -> Result<Vec<GalleryCategory>, ClientError> {
        let mut categories = ListingScreen::<GalleryCategories>::with_credentials(
            self.api.clone(),
            self.credentials.clone(),
            CATEGORY_OPTIONS_LIMIT,
        )
        .with_query(ACTIVE_ONLY.0, ACTIVE_ONLY.1);
        categories.load(1).await?;

        let options = categories.listing().items().to_vec();
        self.editor
            .form_mut()?
            .set_choices("category", options.iter().map(|c| c.id.clone()));
        tracing::debug!(count = options.len(), "Gallery category options loaded");
        Ok(options)
    }
}
