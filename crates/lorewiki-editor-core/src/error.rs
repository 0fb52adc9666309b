use lorewiki_common::UploadError;
use miette::Diagnostic;

use crate::platform::PlatformError;

/// Errors from editor operations. None of them leave a partial mutation
/// behind.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum EditorError {
    #[error(transparent)]
    #[diagnostic_source]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    #[diagnostic_source]
    Upload(#[from] UploadError),

    /// The host text field could not report or accept a selection.
    #[error("text field unavailable: {0}")]
    #[diagnostic(code(lorewiki::editor::host_unavailable))]
    HostUnavailable(#[from] PlatformError),
}

impl EditorError {
    /// Message for a blocking notification, or `None` when the failure should
    /// not interrupt the author.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            EditorError::Precondition(p) => p.user_message(),
            EditorError::Upload(e) => Some(e.user_message()),
            EditorError::HostUnavailable(_) => None,
        }
    }
}

/// An action was invoked without what it needs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum PreconditionError {
    #[error("{action} needs a text selection")]
    #[diagnostic(code(lorewiki::editor::no_selection), help("select some text first"))]
    NoSelection { action: &'static str },

    #[error("a url is required")]
    #[diagnostic(code(lorewiki::editor::empty_url))]
    EmptyUrl,

    #[error("`{0}` is not a #rgb or #rrggbb color")]
    #[diagnostic(code(lorewiki::editor::invalid_color))]
    InvalidColor(String),
}

impl PreconditionError {
    /// Empty URLs correspond to a disabled button, so they are not announced.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            PreconditionError::NoSelection { action: "color" } => {
                Some("Select some text to change its color")
            }
            PreconditionError::NoSelection { .. } => Some("Select some text to highlight it"),
            PreconditionError::EmptyUrl => None,
            PreconditionError::InvalidColor(_) => Some("Pick a valid color"),
        }
    }
}
