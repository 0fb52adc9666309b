//! Action execution against a text buffer.
//!
//! `execute_action` applies an [`EditorAction`] to any [`TextBuffer`]. It
//! touches nothing but the buffer; the editor owns the host side effects.

use crate::actions::EditorAction;
use crate::blocks::alignment_fragment;
use crate::color::{apply_color, apply_highlight};
use crate::error::PreconditionError;
use crate::inserter::{append_fragment, insert_fragment};
use crate::links::{image_fragment, link_fragment};
use crate::platform::PostRenderTask;
use crate::text::TextBuffer;
use crate::types::{EditInfo, Selection};

/// What an applied action changed, and what the host should do after the
/// next repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub edit: EditInfo,
    pub after_render: Option<PostRenderTask>,
}

/// Execute an action on a buffer.
///
/// `selection` is only consulted by actions that need one; when it is `None`
/// they act on a caret at the end of the buffer. On error the buffer is left
/// untouched.
pub fn execute_action<B: TextBuffer + ?Sized>(
    buf: &mut B,
    action: &EditorAction,
    selection: Option<Selection>,
) -> Result<Applied, PreconditionError> {
    let selection = selection.unwrap_or_else(|| Selection::collapsed(buf.len_chars()));

    match action {
        EditorAction::Inline(format) => {
            let out = insert_fragment(buf, selection, &format.fragment());
            Ok(restore(out.edit, out.selection))
        }
        EditorAction::Align(direction) => {
            let out = insert_fragment(buf, selection, &alignment_fragment(*direction));
            Ok(restore(out.edit, out.selection))
        }
        EditorAction::InsertBlock(block) => Ok(appended(append_fragment(buf, &block.render()))),
        EditorAction::Colorize(color) => {
            let edit = apply_color(buf, selection, color)?;
            Ok(focused(edit))
        }
        EditorAction::Highlight(color) => {
            let edit = apply_highlight(buf, selection, color)?;
            Ok(focused(edit))
        }
        EditorAction::InsertLink { url, text } => {
            let html = link_fragment(url, text)?;
            Ok(appended(append_fragment(buf, &html)))
        }
        EditorAction::InsertImage { url, alt } => {
            let html = image_fragment(url, alt)?;
            Ok(appended(append_fragment(buf, &html)))
        }
    }
}

fn restore(edit: EditInfo, selection: Selection) -> Applied {
    Applied {
        edit,
        after_render: Some(PostRenderTask::RestoreSelection(selection)),
    }
}

fn focused(edit: EditInfo) -> Applied {
    Applied {
        edit,
        after_render: Some(PostRenderTask::Focus),
    }
}

fn appended(edit: EditInfo) -> Applied {
    Applied {
        edit,
        after_render: None,
    }
}
