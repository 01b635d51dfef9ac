//! Create/edit form lifecycle.
//!
//! ```text
//! Idle ──(edit)──▶ Loading ──▶ Ready ──▶ Submitting ──▶ Done
//!   └──(create)───────────────▲  ▲            │
//!                  Loading ──▶ Done (load failed)
//!                                └────────────┘ (submit failed)
//! ```
//!
//! Nothing is retried automatically; a failed submit returns to `Ready`
//! with the typed-in values intact.

use crate::error::CoreError;
use crate::form::Form;
use crate::resource::SubmitMode;
use crate::types::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Idle,
    Loading,
    Ready,
    Submitting,
    /// Navigated away: saved, or the record could not be loaded.
    Done,
}

impl EditorPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Done => "done",
        }
    }
}

/// Whether `from -> to` is a legal editor transition.
pub fn can_transition(from: EditorPhase, to: EditorPhase) -> bool {
    use EditorPhase::*;
    matches!(
        (from, to),
        (Idle, Loading)
            | (Idle, Ready)
            | (Loading, Ready)
            | (Loading, Done)
            | (Ready, Submitting)
            | (Submitting, Ready)
            | (Submitting, Done)
    )
}

#[derive(Debug, Clone)]
pub struct Editor {
    target: Option<RecordId>,
    phase: EditorPhase,
    form: Form,
    last_error: Option<String>,
}

impl Editor {
    /// A create form, idle until mounted.
    pub fn for_create(blank: Form) -> Self {
        Self {
            target: None,
            phase: EditorPhase::Idle,
            form: blank,
            last_error: None,
        }
    }

    /// An edit form for `id`, idle until mounted.
    pub fn for_edit(id: impl Into<RecordId>) -> Self {
        Self {
            target: Some(id.into()),
            phase: EditorPhase::Idle,
            form: Form::default(),
            last_error: None,
        }
    }

    pub fn mode(&self) -> SubmitMode {
        if self.target.is_some() {
            SubmitMode::Update
        } else {
            SubmitMode::Create
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Mutable access to the form; only allowed while `Ready`.
    pub fn form_mut(&mut self) -> Result<&mut Form, CoreError> {
        if self.phase != EditorPhase::Ready {
            return Err(CoreError::Validation(format!(
                "form cannot be edited while {}",
                self.phase.as_str()
            )));
        }
        Ok(&mut self.form)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn transition(&mut self, to: EditorPhase) -> Result<(), CoreError> {
        if !can_transition(self.phase, to) {
            return Err(CoreError::InvalidTransition {
                from: self.phase.as_str(),
                to: to.as_str(),
            });
        }
        self.phase = to;
        Ok(())
    }

    /// Mount the editor: edit forms start loading, create forms are ready.
    pub fn mount(&mut self) -> Result<EditorPhase, CoreError> {
        match self.mode() {
            SubmitMode::Update => self.transition(EditorPhase::Loading)?,
            SubmitMode::Create => self.transition(EditorPhase::Ready)?,
        }
        Ok(self.phase)
    }

    /// The record arrived; populate the form.
    pub fn loaded(&mut self, form: Form) -> Result<(), CoreError> {
        self.transition(EditorPhase::Ready)?;
        self.form = form;
        Ok(())
    }

    /// The record could not be fetched; the screen navigates away.
    pub fn load_failed(&mut self, message: impl Into<String>) -> Result<(), CoreError> {
        self.transition(EditorPhase::Done)?;
        self.last_error = Some(message.into());
        Ok(())
    }

    pub fn begin_submit(&mut self) -> Result<(), CoreError> {
        self.transition(EditorPhase::Submitting)?;
        self.last_error = None;
        Ok(())
    }

    pub fn submit_succeeded(&mut self) -> Result<(), CoreError> {
        self.transition(EditorPhase::Done)
    }

    /// Back to `Ready` with the form untouched and `message` shown.
    pub fn submit_failed(&mut self, message: impl Into<String>) -> Result<(), CoreError> {
        self.transition(EditorPhase::Ready)?;
        self.last_error = Some(message.into());
        Ok(())
    }

    /// Record a validation failure without leaving `Ready`.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormValues;
    use assert_matches::assert_matches;

    #[test]
    fn create_flow() {
        let mut editor = Editor::for_create(Form::default());
        assert_eq!(editor.mode(), SubmitMode::Create);
        assert_eq!(editor.mount().unwrap(), EditorPhase::Ready);
        editor.begin_submit().unwrap();
        editor.submit_succeeded().unwrap();
        assert_eq!(editor.phase(), EditorPhase::Done);
    }

    #[test]
    fn edit_flow_loads_first() {
        let mut editor = Editor::for_edit("42");
        assert_eq!(editor.mode(), SubmitMode::Update);
        assert_eq!(editor.mount().unwrap(), EditorPhase::Loading);
        assert!(editor.form_mut().is_err());

        editor
            .loaded(Form::new(FormValues::new().with("title", "Spring Promo")))
            .unwrap();
        assert_eq!(editor.form().get("title"), Some("Spring Promo"));
    }

    #[test]
    fn failed_submit_returns_to_ready_keeping_values() {
        let mut editor = Editor::for_create(Form::default());
        editor.mount().unwrap();
        editor.form_mut().unwrap().set("title", "Dup");
        editor.begin_submit().unwrap();
        editor.submit_failed("Title already exists").unwrap();

        assert_eq!(editor.phase(), EditorPhase::Ready);
        assert_eq!(editor.last_error(), Some("Title already exists"));
        assert_eq!(editor.form().get("title"), Some("Dup"));
    }

    #[test]
    fn load_failure_ends_the_editor() {
        let mut editor = Editor::for_edit("gone");
        editor.mount().unwrap();
        editor.load_failed("Failed to load").unwrap();
        assert_eq!(editor.phase(), EditorPhase::Done);
        assert_matches!(editor.begin_submit(), Err(CoreError::InvalidTransition { .. }));
    }

    #[test]
    fn cannot_submit_before_mount_or_twice() {
        let mut editor = Editor::for_create(Form::default());
        assert_matches!(
            editor.begin_submit(),
            Err(CoreError::InvalidTransition { from: "idle", to: "submitting" })
        );
        editor.mount().unwrap();
        editor.begin_submit().unwrap();
        assert!(editor.begin_submit().is_err());
    }

    #[test]
    fn transition_table() {
        use EditorPhase::*;
        assert!(can_transition(Idle, Loading));
        assert!(can_transition(Submitting, Ready));
        assert!(!can_transition(Done, Ready));
        assert!(!can_transition(Ready, Done));
        assert!(!can_transition(Loading, Submitting));
    }
}
