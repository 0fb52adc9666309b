//! Preview of the buffer as rendered HTML.
//!
//! Content comes from trusted administrators, so the buffer is handed to the
//! host as-is. No escaping or allow-listing happens here.

use std::fmt;

use crate::text::TextBuffer;

pub const EMPTY_PREVIEW: &str = r#"<p class="text-slate-500">Nothing here yet</p>"#;

/// HTML the host may inject without sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrustedHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Render the buffer verbatim, or the empty-state line if there is nothing.
pub fn render_preview<B: TextBuffer + ?Sized>(buf: &B) -> TrustedHtml {
    if buf.is_empty() {
        TrustedHtml(EMPTY_PREVIEW.to_string())
    } else {
        TrustedHtml(buf.to_string())
    }
}

/// Which pane the editor shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Source,
    Preview,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Source => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Source,
        }
    }

    /// Label for the toggle button.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ViewMode::Source => "Preview",
            ViewMode::Preview => "Editor",
        }
    }
}
