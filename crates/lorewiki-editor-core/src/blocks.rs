//! Canned block fragments.
//!
//! Every generator is pure; the editor appends the result to the end of the
//! buffer regardless of where the caret is.

use crate::fragments::{Alignment, InsertionFragment};

pub const LIST_ITEMS: [&str; 3] = ["Item 1", "Item 2", "Item 3"];
pub const TABLE_HEADERS: [&str; 3] = ["Header 1", "Header 2", "Header 3"];
pub const TABLE_ROWS: [[&str; 3]; 2] = [["Cell 1", "Cell 2", "Cell 3"], ["Cell 4", "Cell 5", "Cell 6"]];
pub const CODE_PLACEHOLDER: &str = "// Your code here";
pub const QUOTE_PLACEHOLDER: &str = "Quote or important information";

const BORDER: &str = "border: 1px solid #475569; padding: 12px;";

/// Bulleted (`<ul>`) or numbered (`<ol>`) list with three placeholder items.
pub fn list_fragment(ordered: bool) -> String {
    let tag = if ordered { "ol" } else { "ul" };
    let mut html = format!("<{tag} style=\"margin: 16px 0; padding-left: 24px;\">\n");
    for item in LIST_ITEMS {
        html.push_str("  <li>");
        html.push_str(item);
        html.push_str("</li>\n");
    }
    html.push_str("</");
    html.push_str(tag);
    html.push('>');
    html
}

pub fn divider_fragment() -> &'static str {
    r#"<hr style="border: none; border-top: 1px solid #475569; margin: 24px 0;" />"#
}

pub fn code_block_fragment() -> String {
    format!(
        r#"<pre style="background-color: #1e293b; padding: 16px; border-radius: 8px; overflow-x: auto; margin: 16px 0;"><code style="color: #e2e8f0; font-family: monospace;">{CODE_PLACEHOLDER}</code></pre>"#
    )
}

pub fn blockquote_fragment() -> String {
    format!(
        r#"<blockquote style="border-left: 4px solid #ff6b35; padding-left: 16px; margin: 16px 0; color: #94a3b8; font-style: italic;">{QUOTE_PLACEHOLDER}</blockquote>"#
    )
}

/// Three-column table with a header row and two body rows, wrapped in a
/// horizontally scrollable container so it survives narrow screens.
pub fn table_fragment() -> String {
    let mut html = String::from(
        "<div style=\"overflow-x: auto; -webkit-overflow-scrolling: touch; margin: 16px 0;\">\n\
         \x20 <table style=\"width: 100%; min-width: 500px; border-collapse: collapse;\">\n\
         \x20   <thead>\n\
         \x20     <tr style=\"background-color: #334155;\">\n",
    );
    for header in TABLE_HEADERS {
        html.push_str(&format!(
            "        <th style=\"{BORDER} color: #fff; white-space: nowrap;\">{header}</th>\n"
        ));
    }
    html.push_str("      </tr>\n    </thead>\n    <tbody>\n");
    for row in TABLE_ROWS {
        html.push_str("      <tr>\n");
        for cell in row {
            html.push_str(&format!("        <td style=\"{BORDER}\">{cell}</td>\n"));
        }
        html.push_str("      </tr>\n");
    }
    html.push_str("    </tbody>\n  </table>\n</div>");
    html
}

/// Alignment goes through the selection-aware inserter rather than being
/// appended.
pub fn alignment_fragment(direction: Alignment) -> InsertionFragment {
    direction.fragment()
}

/// Block kinds that are appended at the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    List { ordered: bool },
    Divider,
    CodeBlock,
    Blockquote,
    Table,
}

impl Block {
    pub fn render(&self) -> String {
        match self {
            Block::List { ordered } => list_fragment(*ordered),
            Block::Divider => divider_fragment().to_string(),
            Block::CodeBlock => code_block_fragment(),
            Block::Blockquote => blockquote_fragment(),
            Block::Table => table_fragment(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Block::List { ordered: false } => "List",
            Block::List { ordered: true } => "Numbered list",
            Block::Divider => "Divider",
            Block::CodeBlock => "Code",
            Block::Blockquote => "Quote",
            Block::Table => "Table",
        }
    }
}
