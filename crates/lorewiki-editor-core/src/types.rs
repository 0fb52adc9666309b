//! Core editor types: selection and edit tracking.
//!
//! All offsets are in Unicode scalar values (chars) into the content buffer.

use std::ops::Range;

/// A textarea selection as the host widget reports it.
///
/// Dragging right-to-left leaves `head` before `anchor`; toolbar actions only
/// care about the ordered `start()..end()` span.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    /// Caret end of the selection.
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// A bare caret.
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Selected chars.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Ordered copy with both ends clamped to `len`.
    ///
    /// Host widgets can report offsets from a stale render; slicing past the
    /// end behaves like a selection ending at the end of the buffer.
    pub fn clamped(&self, len: usize) -> Self {
        Self {
            anchor: self.start().min(len),
            head: self.end().min(len),
        }
    }
}

impl From<Range<usize>> for Selection {
    fn from(r: Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

/// Information about the most recent buffer mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditInfo {
    /// Character offset where the edit occurred
    pub edit_char_pos: usize,
    /// Number of characters inserted
    pub inserted_len: usize,
    /// Number of characters deleted
    pub deleted_len: usize,
    /// Buffer length (in chars) after this edit was applied.
    pub doc_len_after: usize,
}

impl EditInfo {
    /// Get the range that was affected by this edit.
    ///
    /// For insertions and replacements: the range of inserted text.
    /// For deletions: an empty range at the deletion point.
    pub fn affected_range(&self) -> Range<usize> {
        self.edit_char_pos..self.edit_char_pos + self.inserted_len
    }

    /// Whether the edit appended to the end of the buffer.
    pub fn is_append(&self) -> bool {
        self.deleted_len == 0 && self.edit_char_pos + self.inserted_len == self.doc_len_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{ContentBuffer, TextBuffer};

    #[test]
    fn test_backward_drag_over_heading_word() {
        // "<h2>Rules</h2>": the author drags from after "Rules" back to its start.
        let sel = Selection::new(9, 4);
        assert_eq!((sel.start(), sel.end()), (4, 9));
        assert_eq!(sel.len(), 5);
        let heading = ContentBuffer::from_str("<h2>Rules</h2>");
        assert_eq!(heading.slice(sel.to_range()).as_deref(), Some("Rules"));
    }

    #[test]
    fn test_caret_before_toolbar_click() {
        // Clicking Bold with the caret after "Welcome " wraps nothing.
        let caret = Selection::collapsed("Welcome ".chars().count());
        assert!(caret.is_empty());
        assert_eq!(caret.to_range(), 8..8);
        assert_eq!(caret.clamped(8), caret);
    }

    #[test]
    fn test_selection_clamped() {
        let sel = Selection::new(12, 3).clamped(8);
        assert_eq!(sel, Selection::new(3, 8));

        let past_end = Selection::new(20, 30).clamped(8);
        assert!(past_end.is_collapsed());
        assert_eq!(past_end.start(), 8);
    }

    #[test]
    fn test_edit_info_append() {
        let append = EditInfo {
            edit_char_pos: 5,
            inserted_len: 3,
            deleted_len: 0,
            doc_len_after: 8,
        };
        assert!(append.is_append());
        assert_eq!(append.affected_range(), 5..8);

        let wrap = EditInfo {
            edit_char_pos: 0,
            inserted_len: 22,
            deleted_len: 5,
            doc_len_after: 28,
        };
        assert!(!wrap.is_append());
    }
}
