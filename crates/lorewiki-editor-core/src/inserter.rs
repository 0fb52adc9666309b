//! Selection-aware markup insertion.
//!
//! These functions are generic over [`TextBuffer`] and only compute the new
//! text and selection. Applying the selection to the host widget is the
//! caller's job and has to wait for the next repaint.

use crate::fragments::InsertionFragment;
use crate::text::TextBuffer;
use crate::types::{EditInfo, Selection};

/// Result of a wrap/insert: the single edit applied and the selection the
/// widget should show afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    pub edit: EditInfo,
    pub selection: Selection,
}

/// Wrap the selection in `open`/`close`, or insert `open + placeholder + close`
/// at the caret.
///
/// - With a selection `[s, e)`: the buffer becomes
///   `B[..s] + open + B[s..e] + close + B[e..]` and the new selection covers
///   the wrapped text, `(s + |open|, e + |open|)`.
/// - With a caret and a placeholder `P`: `open + P + close` is inserted and the
///   placeholder is selected so the author can type over it.
/// - With neither, `open + close` is inserted and the caret lands between them.
///
/// Applying it twice nests the tags.
pub fn insert_tag<B: TextBuffer + ?Sized>(
    buf: &mut B,
    selection: Selection,
    open: &str,
    close: &str,
    placeholder: Option<&str>,
) -> InsertOutcome {
    let sel = selection.clamped(buf.len_chars());
    let (start, end) = (sel.start(), sel.end());
    let selected = buf.slice(start..end).unwrap_or_default();

    let payload: &str = if !selected.is_empty() {
        &selected
    } else {
        placeholder.unwrap_or("")
    };

    let mut text = String::with_capacity(open.len() + payload.len() + close.len());
    text.push_str(open);
    text.push_str(payload);
    text.push_str(close);

    buf.replace(start..end, &text);

    let open_len = open.chars().count();
    let new_selection = if selected.is_empty() && !payload.is_empty() {
        Selection::new(start + open_len, start + open_len + payload.chars().count())
    } else {
        Selection::new(start + open_len, end + open_len)
    };

    tracing::debug!(
        start,
        end,
        open,
        new_start = new_selection.start(),
        new_end = new_selection.end(),
        "inserted markup"
    );

    InsertOutcome {
        edit: buf.last_edit().unwrap_or(EditInfo {
            edit_char_pos: start,
            inserted_len: text.chars().count(),
            deleted_len: end - start,
            doc_len_after: buf.len_chars(),
        }),
        selection: new_selection,
    }
}

/// [`insert_tag`] driven by a fragment.
pub fn insert_fragment<B: TextBuffer + ?Sized>(
    buf: &mut B,
    selection: Selection,
    fragment: &InsertionFragment,
) -> InsertOutcome {
    insert_tag(
        buf,
        selection,
        &fragment.open,
        &fragment.close,
        fragment.placeholder.as_deref(),
    )
}

/// Replace a non-empty selection with `render(selected_text)`.
///
/// Returns `None` without touching the buffer when the selection is empty.
pub fn replace_selection<B, F>(buf: &mut B, selection: Selection, render: F) -> Option<EditInfo>
where
    B: TextBuffer + ?Sized,
    F: FnOnce(&str) -> String,
{
    let sel = selection.clamped(buf.len_chars());
    if sel.is_collapsed() {
        return None;
    }
    let selected = buf.slice(sel.to_range())?;
    let replacement = render(&selected);
    buf.replace(sel.to_range(), &replacement);
    buf.last_edit()
}

/// Append a fragment at the end of the buffer, ignoring the caret.
pub fn append_fragment<B: TextBuffer + ?Sized>(buf: &mut B, html: &str) -> EditInfo {
    let offset = buf.len_chars();
    buf.push(html);
    buf.last_edit().unwrap_or(EditInfo {
        edit_char_pos: offset,
        inserted_len: html.chars().count(),
        deleted_len: 0,
        doc_len_after: buf.len_chars(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragments::{Alignment, BOLD, HEADING_2, LINE_BREAK};
    use crate::text::ContentBuffer;

    fn wrap(content: &str, sel: (usize, usize), open: &str, close: &str, ph: Option<&str>) -> (String, Selection) {
        let mut buf = ContentBuffer::from_str(content);
        let out = insert_tag(&mut buf, Selection::new(sel.0, sel.1), open, close, ph);
        (buf.to_string(), out.selection)
    }

    #[test]
    fn test_wrap_hello_in_strong() {
        let (text, sel) = wrap("Hello world", (0, 5), "<strong>", "</strong>", None);
        assert_eq!(text, "<strong>Hello</strong> world");
        assert_eq!(sel, Selection::new(8, 13));
    }

    #[test]
    fn test_wrap_with_selection_matches_formula() {
        let b = "one two three";
        for (s, e) in [(0, 3), (4, 7), (8, 13), (2, 9)] {
            let (text, sel) = wrap(b, (s, e), "<em>", "</em>", Some("ignored"));
            let expected = format!("{}<em>{}</em>{}", &b[..s], &b[s..e], &b[e..]);
            assert_eq!(text, expected);
            assert_eq!((sel.start(), sel.end()), (s + 4, e + 4));
        }
    }

    #[test]
    fn test_backwards_selection_is_ordered() {
        let (text, sel) = wrap("Hello world", (5, 0), "<u>", "</u>", None);
        assert_eq!(text, "<u>Hello</u> world");
        assert_eq!(sel, Selection::new(3, 8));
    }

    #[test]
    fn test_placeholder_is_selected() {
        let (text, sel) = wrap("ab", (1, 1), "<h2>", "</h2>", Some("Heading 2"));
        assert_eq!(text, "a<h2>Heading 2</h2>b");
        assert_eq!(sel, Selection::new(5, 14));
    }

    #[test]
    fn test_no_selection_no_placeholder_puts_caret_inside() {
        let (text, sel) = wrap("ab", (1, 1), "<strong>", "</strong>", None);
        assert_eq!(text, "a<strong></strong>b");
        assert_eq!(sel, Selection::collapsed(9));
    }

    #[test]
    fn test_repeated_wrap_nests() {
        let mut buf = ContentBuffer::from_str("x");
        let first = insert_fragment(&mut buf, Selection::new(0, 1), &BOLD);
        insert_fragment(&mut buf, first.selection, &BOLD);
        assert_eq!(buf.to_string(), "<strong><strong>x</strong></strong>");
    }

    #[test]
    fn test_offsets_are_chars() {
        let (text, sel) = wrap("héllo wörld", (6, 11), "<em>", "</em>", None);
        assert_eq!(text, "héllo <em>wörld</em>");
        assert_eq!(sel, Selection::new(10, 15));
    }

    #[test]
    fn test_selection_past_end_is_clamped() {
        let (text, sel) = wrap("abc", (1, 40), "<s>", "</s>", None);
        assert_eq!(text, "a<s>bc</s>");
        assert_eq!(sel, Selection::new(4, 6));
    }

    #[test]
    fn test_heading_and_alignment_fragments() {
        let mut buf = ContentBuffer::new();
        let out = insert_fragment(&mut buf, Selection::collapsed(0), &HEADING_2);
        let text = buf.to_string();
        assert!(text.ends_with("Heading 2</h2>"));
        assert_eq!(
            buf.slice(out.selection.to_range()).as_deref(),
            Some("Heading 2")
        );

        let mut buf = ContentBuffer::from_str("rules");
        insert_fragment(&mut buf, Selection::new(0, 5), &Alignment::Right.fragment());
        assert_eq!(
            buf.to_string(),
            r#"<div style="text-align: right;">rules</div>"#
        );
    }

    #[test]
    fn test_line_break_has_no_close() {
        let mut buf = ContentBuffer::from_str("ab");
        let out = insert_fragment(&mut buf, Selection::collapsed(1), &LINE_BREAK);
        assert_eq!(buf.to_string(), "a<br/>b");
        assert_eq!(out.selection, Selection::collapsed(6));
    }

    #[test]
    fn test_replace_selection_requires_selection() {
        let mut buf = ContentBuffer::from_str("abc");
        assert!(replace_selection(&mut buf, Selection::collapsed(1), |s| s.to_uppercase()).is_none());
        assert_eq!(buf.to_string(), "abc");

        let edit = replace_selection(&mut buf, Selection::new(1, 3), |s| s.to_uppercase()).unwrap();
        assert_eq!(buf.to_string(), "aBC");
        assert_eq!(edit.edit_char_pos, 1);
    }

    #[test]
    fn test_append_ignores_caret() {
        let mut buf = ContentBuffer::from_str("body");
        let edit = append_fragment(&mut buf, "<hr />");
        assert_eq!(buf.to_string(), "body<hr />");
        assert!(edit.is_append());
    }
}
