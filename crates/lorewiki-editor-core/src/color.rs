//! Text color and background highlight.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::error::PreconditionError;
use crate::inserter::replace_selection;
use crate::text::TextBuffer;
use crate::types::{EditInfo, Selection};

/// A `#rgb` or `#rrggbb` color, stored as typed (lowercased).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(SmolStr);

impl HexColor {
    pub fn parse(s: &str) -> Result<Self, PreconditionError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| PreconditionError::InvalidColor(s.to_string()))?;
        if !matches!(digits.len(), 3 | 6) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PreconditionError::InvalidColor(s.to_string()));
        }
        Ok(Self(SmolStr::new(trimmed.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = PreconditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const DEFAULT_TEXT_COLOR: &str = "#ff6b35";
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#fef3c7";

/// The two color pickers in the toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSelections {
    pub text: HexColor,
    pub highlight: HexColor,
}

impl Default for ColorSelections {
    fn default() -> Self {
        Self {
            text: HexColor(SmolStr::new_static(DEFAULT_TEXT_COLOR)),
            highlight: HexColor(SmolStr::new_static(DEFAULT_HIGHLIGHT_COLOR)),
        }
    }
}

pub fn color_span(color: &HexColor, text: &str) -> String {
    format!(r#"<span style="color: {color};">{text}</span>"#)
}

pub fn highlight_mark(color: &HexColor, text: &str) -> String {
    format!(
        r#"<mark style="background-color: {color}; padding: 2px 4px; border-radius: 3px;">{text}</mark>"#
    )
}

/// Replace the selection with a colored `<span>`.
///
/// Fails without touching the buffer when nothing is selected.
pub fn apply_color<B: TextBuffer + ?Sized>(
    buf: &mut B,
    selection: Selection,
    color: &HexColor,
) -> Result<EditInfo, PreconditionError> {
    replace_selection(buf, selection, |sel| color_span(color, sel))
        .ok_or(PreconditionError::NoSelection { action: "color" })
}

/// Replace the selection with a highlighted `<mark>`.
pub fn apply_highlight<B: TextBuffer + ?Sized>(
    buf: &mut B,
    selection: Selection,
    color: &HexColor,
) -> Result<EditInfo, PreconditionError> {
    replace_selection(buf, selection, |sel| highlight_mark(color, sel))
        .ok_or(PreconditionError::NoSelection { action: "highlight" })
}
