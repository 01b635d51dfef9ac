//! User-facing notifications (toasts in the browser, stderr lines in the CLI).

use std::fmt;

use crate::route::Route;

/// Shown when a request failed without a usable backend message.
pub const GENERIC_FAILURE: &str = "Something went wrong while submitting the form.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    /// Navigation affordance offered with the notice ("OK" back to the list).
    pub action: Option<Route>,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
            action: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, route: Route) -> Self {
        self.action = Some(route);
        self
    }

    /// `"Banner Created"` / `"Your banner was successfully created."`.
    pub fn saved(label: &str, past_tense: &str, back_to: Route) -> Self {
        Self::success(
            format!("{label} {past_tense}"),
            format!(
                "Your {} was successfully {}.",
                label.to_lowercase(),
                past_tense.to_lowercase()
            ),
        )
        .with_action(back_to)
    }

    pub fn deleted(label: &str) -> Self {
        Self::success("Deleted", format!("{label} deleted successfully"))
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_notice_offers_way_back() {
        let notice = Notice::saved("YouTube Video", "Created", Route::Listing("/youtube-videos"));
        assert_eq!(notice.title, "YouTube Video Created");
        assert_eq!(notice.message, "Your youtube video was successfully created.");
        assert_eq!(notice.action, Some(Route::Listing("/youtube-videos")));
        assert!(!notice.is_error());
    }

    #[test]
    fn error_notice_display() {
        let notice = Notice::error("Title already exists");
        assert!(notice.is_error());
        assert_eq!(notice.to_string(), "Error: Title already exists");
    }
}
