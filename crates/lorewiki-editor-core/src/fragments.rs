//! Insertion fragments: the fixed open/close tag pairs behind toolbar buttons.

use std::borrow::Cow;

/// An open tag, a close tag, and optional placeholder text used when nothing
/// is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionFragment {
    pub open: Cow<'static, str>,
    pub close: Cow<'static, str>,
    pub placeholder: Option<Cow<'static, str>>,
}

impl InsertionFragment {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self {
            open: Cow::Borrowed(open),
            close: Cow::Borrowed(close),
            placeholder: None,
        }
    }

    pub const fn with_placeholder(
        open: &'static str,
        close: &'static str,
        placeholder: &'static str,
    ) -> Self {
        Self {
            open: Cow::Borrowed(open),
            close: Cow::Borrowed(close),
            placeholder: Some(Cow::Borrowed(placeholder)),
        }
    }
}

pub const BOLD: InsertionFragment = InsertionFragment::new("<strong>", "</strong>");
pub const ITALIC: InsertionFragment = InsertionFragment::new("<em>", "</em>");
pub const UNDERLINE: InsertionFragment = InsertionFragment::new("<u>", "</u>");
pub const STRIKETHROUGH: InsertionFragment = InsertionFragment::new("<s>", "</s>");
pub const HEADING_2: InsertionFragment = InsertionFragment::with_placeholder(
    r#"<h2 style="color: #fff; font-size: 1.875rem; font-weight: 700; margin: 20px 0 12px 0;">"#,
    "</h2>",
    "Heading 2",
);
pub const HEADING_3: InsertionFragment = InsertionFragment::with_placeholder(
    r#"<h3 style="color: #fff; font-size: 1.5rem; font-weight: 600; margin: 16px 0 10px 0;">"#,
    "</h3>",
    "Heading 3",
);
pub const PARAGRAPH: InsertionFragment =
    InsertionFragment::new(r#"<p style="margin: 12px 0;">"#, "</p>");
/// Line break: a void element, so the close tag is empty.
pub const LINE_BREAK: InsertionFragment = InsertionFragment::new("<br/>", "");

/// Placeholder used by the alignment wrappers.
pub const ALIGNED_TEXT_PLACEHOLDER: &str = "Aligned text";

/// Inline formats that wrap the selection through the markup inserter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineFormat {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Heading2,
    Heading3,
    Paragraph,
    LineBreak,
}

impl InlineFormat {
    pub fn fragment(&self) -> InsertionFragment {
        match self {
            InlineFormat::Bold => BOLD,
            InlineFormat::Italic => ITALIC,
            InlineFormat::Underline => UNDERLINE,
            InlineFormat::Strikethrough => STRIKETHROUGH,
            InlineFormat::Heading2 => HEADING_2,
            InlineFormat::Heading3 => HEADING_3,
            InlineFormat::Paragraph => PARAGRAPH,
            InlineFormat::LineBreak => LINE_BREAK,
        }
    }

    /// Tooltip for the toolbar button.
    pub fn title(&self) -> &'static str {
        match self {
            InlineFormat::Bold => "Bold",
            InlineFormat::Italic => "Italic",
            InlineFormat::Underline => "Underline",
            InlineFormat::Strikethrough => "Strikethrough",
            InlineFormat::Heading2 => "Heading 2",
            InlineFormat::Heading3 => "Heading 3",
            InlineFormat::Paragraph => "Paragraph",
            InlineFormat::LineBreak => "Line break",
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    /// `<div style="text-align: ...;">` wrapper with the aligned-text placeholder.
    pub fn fragment(&self) -> InsertionFragment {
        InsertionFragment {
            open: Cow::Owned(format!(r#"<div style="text-align: {};">"#, self.as_str())),
            close: Cow::Borrowed("</div>"),
            placeholder: Some(Cow::Borrowed(ALIGNED_TEXT_PLACEHOLDER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_have_placeholders() {
        assert_eq!(
            InlineFormat::Heading2.fragment().placeholder.as_deref(),
            Some("Heading 2")
        );
        assert_eq!(
            InlineFormat::Heading3.fragment().placeholder.as_deref(),
            Some("Heading 3")
        );
        assert!(InlineFormat::Bold.fragment().placeholder.is_none());
    }

    #[test]
    fn test_alignment_fragment() {
        let frag = Alignment::Center.fragment();
        insta::assert_snapshot!(&*frag.open, @r#"<div style="text-align: center;">"#);
        assert_eq!(frag.close, "</div>");
        assert_eq!(frag.placeholder.as_deref(), Some("Aligned text"));
    }
}
