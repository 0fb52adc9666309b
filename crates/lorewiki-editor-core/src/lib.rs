//! lorewiki-editor-core: the wiki article editor, free of any UI framework.
//!
//! This crate provides:
//! - `TextBuffer` trait and `ContentBuffer`, the ropey-backed article body
//! - selection-aware markup insertion and canned block fragments
//! - link/image insertion, color, and the save-time href normalization pass
//! - `RichTextEditor`, which ties these to an injected host text field

pub mod actions;
pub mod article;
pub mod blocks;
pub mod color;
pub mod editor;
pub mod error;
pub mod execute;
pub mod fragments;
pub mod inserter;
pub mod links;
pub mod platform;
pub mod preview;
pub mod text;
pub mod types;

pub use actions::EditorAction;
pub use article::ArticleDraft;
pub use blocks::Block;
pub use color::{ColorSelections, HexColor};
pub use editor::{DEFAULT_PLACEHOLDER, RichTextEditor, upload_image};
pub use error::{EditorError, PreconditionError};
pub use execute::{Applied, execute_action};
pub use fragments::{Alignment, InlineFormat, InsertionFragment};
pub use inserter::{InsertOutcome, insert_tag};
pub use links::{ImageForm, LinkForm, normalize_links, normalize_url};
pub use platform::{LogNotifier, Notifier, PlatformError, PostRenderQueue, PostRenderTask, TextField};
pub use preview::{TrustedHtml, ViewMode, render_preview};
pub use smol_str::SmolStr;
pub use text::{ContentBuffer, TextBuffer};
pub use types::{EditInfo, Selection};
