//! Text buffer abstraction for the article content.
//!
//! The `TextBuffer` trait is what the inserter and block generators operate
//! on; `ContentBuffer` is the ropey-backed implementation the editor owns.

use smol_str::{SmolStr, ToSmolStr};
use std::ops::Range;

use crate::types::EditInfo;

/// A text buffer that supports editing and offset conversion.
///
/// All offsets are in Unicode scalar values (chars), not bytes or UTF-16.
pub trait TextBuffer {
    /// Total length in bytes (UTF-8).
    fn len_bytes(&self) -> usize;

    /// Total length in chars (Unicode scalar values).
    fn len_chars(&self) -> usize;

    /// Check if empty.
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Insert text at char offset.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// Append text at end.
    fn push(&mut self, text: &str) {
        self.insert(self.len_chars(), text);
    }

    /// Delete char range.
    fn delete(&mut self, char_range: Range<usize>);

    /// Replace char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        self.delete(char_range.clone());
        self.insert(char_range.start, text);
    }

    /// Get a slice as SmolStr. Returns None if range is invalid.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    /// Convert entire buffer to String.
    fn to_string(&self) -> String;

    /// Get info about the last edit operation, if any.
    fn last_edit(&self) -> Option<EditInfo>;
}

/// Ropey-backed article content.
#[derive(Clone, Default)]
pub struct ContentBuffer {
    rope: ropey::Rope,
    last_edit: Option<EditInfo>,
}

impl ContentBuffer {
    /// Create a new empty buffer (new article).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from existing article content (edit flow).
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
            last_edit: None,
        }
    }

    /// Replace the whole content, as when the author types directly into the
    /// text area.
    pub fn set(&mut self, s: &str) {
        let deleted_len = self.rope.len_chars();
        self.rope = ropey::Rope::from_str(s);
        self.last_edit = Some(EditInfo {
            edit_char_pos: 0,
            inserted_len: self.rope.len_chars(),
            deleted_len,
            doc_len_after: self.rope.len_chars(),
        });
    }

    /// Convert a char offset to UTF-16 code units (what browser text areas report).
    pub fn char_to_utf16(&self, char_offset: usize) -> usize {
        self.rope.char_to_utf16_cu(char_offset.min(self.rope.len_chars()))
    }

    /// Convert a UTF-16 code unit offset to a char offset.
    pub fn utf16_to_char(&self, utf16_offset: usize) -> usize {
        self.rope
            .utf16_cu_to_char(utf16_offset.min(self.rope.len_utf16_cu()))
    }
}

impl TextBuffer for ContentBuffer {
    fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.rope.insert(char_offset, text);

        self.last_edit = Some(EditInfo {
            edit_char_pos: char_offset,
            inserted_len: text.chars().count(),
            deleted_len: 0,
            doc_len_after: self.rope.len_chars(),
        });
    }

    fn delete(&mut self, char_range: Range<usize>) {
        let deleted_len = char_range.len();

        self.rope.remove(char_range.clone());

        self.last_edit = Some(EditInfo {
            edit_char_pos: char_range.start,
            inserted_len: 0,
            deleted_len,
            doc_len_after: self.rope.len_chars(),
        });
    }

    // Recorded as a single edit so change tracking sees one mutation.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        let deleted_len = char_range.len();

        self.rope.remove(char_range.clone());
        self.rope.insert(char_range.start, text);

        self.last_edit = Some(EditInfo {
            edit_char_pos: char_range.start,
            inserted_len: text.chars().count(),
            deleted_len,
            doc_len_after: self.rope.len_chars(),
        });
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.start > char_range.end || char_range.end > self.len_chars() {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn last_edit(&self) -> Option<EditInfo> {
        self.last_edit
    }
}

impl From<&str> for ContentBuffer {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for ContentBuffer {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl std::fmt::Debug for ContentBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentBuffer")
            .field("len_chars", &self.rope.len_chars())
            .field("last_edit", &self.last_edit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut buf = ContentBuffer::from_str("hello world");
        assert_eq!(buf.len_chars(), 11);
        assert_eq!(buf.to_string(), "hello world");

        buf.insert(5, " beautiful");
        assert_eq!(buf.to_string(), "hello beautiful world");

        // " beautiful" is 10 chars at positions 5..15
        buf.delete(5..15);
        assert_eq!(buf.to_string(), "hello world");
    }

    #[test]
    fn test_slice() {
        let buf = ContentBuffer::from_str("hello world");
        assert_eq!(buf.slice(0..5).as_deref(), Some("hello"));
        assert_eq!(buf.slice(6..11).as_deref(), Some("world"));
        assert_eq!(buf.slice(0..100), None);
    }

    #[test]
    fn test_replace_is_one_edit() {
        let mut buf = ContentBuffer::from_str("hello world");
        buf.replace(6..11, "rust");
        assert_eq!(buf.to_string(), "hello rust");
        let edit = buf.last_edit().unwrap();
        assert_eq!(edit.edit_char_pos, 6);
        assert_eq!(edit.inserted_len, 4);
        assert_eq!(edit.deleted_len, 5);
    }

    #[test]
    fn test_push_appends() {
        let mut buf = ContentBuffer::new();
        buf.push("<hr />");
        buf.push("<p>x</p>");
        assert_eq!(buf.to_string(), "<hr /><p>x</p>");
        assert!(buf.last_edit().unwrap().is_append());
    }

    #[test]
    fn test_utf16_conversion() {
        // "🎮" is one char but two UTF-16 code units.
        let buf = ContentBuffer::from_str("a🎮b");
        assert_eq!(buf.len_chars(), 3);
        assert_eq!(buf.char_to_utf16(2), 3);
        assert_eq!(buf.utf16_to_char(3), 2);
        assert_eq!(buf.utf16_to_char(99), 3);
    }

    #[test]
    fn test_set_replaces_everything() {
        let mut buf = ContentBuffer::from_str("old");
        buf.set("brand new");
        assert_eq!(buf.to_string(), "brand new");
        assert_eq!(buf.last_edit().unwrap().deleted_len, 3);
    }
}
