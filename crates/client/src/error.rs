use cms_core::error::CoreError;
use cms_core::notice::GENERIC_FAILURE;

use crate::config::ConfigError;

/// Errors from talking to the CMS backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend returned HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Backend {
        status: u16,
        /// The body's `message` (or `error`) string, when there was one.
        message: Option<String>,
    },

    /// Local validation, envelope normalization, or an illegal screen
    /// transition.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted session could not be read or written as JSON.
    #[error("Session file error: {0}")]
    SessionFile(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Text to show the user for this failure.
    ///
    /// Backend messages and form validation messages are shown verbatim;
    /// everything else collapses to [`GENERIC_FAILURE`].
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Core(err @ CoreError::InvalidForm(_)) => err.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// The message the backend put in its error body, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Backend { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of a backend rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}
