//! Editor actions.
//!
//! `EditorAction` is the semantic operation behind each toolbar control. It
//! carries everything it needs except the selection, which the editor reads
//! from the host text field when [`EditorAction::needs_selection`] says so.

use crate::blocks::Block;
use crate::color::HexColor;
use crate::fragments::{Alignment, InlineFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Wrap the selection (or insert a placeholder) with an inline format.
    Inline(InlineFormat),

    /// Wrap the selection in an aligned `<div>`.
    Align(Alignment),

    /// Append a canned block at the end of the buffer.
    InsertBlock(Block),

    /// Replace the selection with a colored span.
    Colorize(HexColor),

    /// Replace the selection with a highlighted mark.
    Highlight(HexColor),

    /// Append an anchor. An empty `text` shows the url as typed.
    InsertLink { url: String, text: String },

    /// Append an image by url. An empty `alt` uses the default.
    InsertImage { url: String, alt: String },
}

impl EditorAction {
    pub fn list(ordered: bool) -> Self {
        EditorAction::InsertBlock(Block::List { ordered })
    }

    /// Whether the action works on the host's current selection.
    ///
    /// The others append at the end of the buffer and ignore the caret.
    pub fn needs_selection(&self) -> bool {
        matches!(
            self,
            EditorAction::Inline(_)
                | EditorAction::Align(_)
                | EditorAction::Colorize(_)
                | EditorAction::Highlight(_)
        )
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            EditorAction::Inline(format) => format.title(),
            EditorAction::Align(Alignment::Left) => "Align left",
            EditorAction::Align(Alignment::Center) => "Align center",
            EditorAction::Align(Alignment::Right) => "Align right",
            EditorAction::InsertBlock(block) => block.title(),
            EditorAction::Colorize(_) => "Text color",
            EditorAction::Highlight(_) => "Highlight",
            EditorAction::InsertLink { .. } => "Link",
            EditorAction::InsertImage { .. } => "Image",
        }
    }
}

impl From<InlineFormat> for EditorAction {
    fn from(format: InlineFormat) -> Self {
        EditorAction::Inline(format)
    }
}

impl From<Block> for EditorAction {
    fn from(block: Block) -> Self {
        EditorAction::InsertBlock(block)
    }
}
