//! Platform abstraction traits for editor operations.
//!
//! These traits define the interface between the editor logic and the host UI
//! (a browser text area, a native text widget, a test double). The editor
//! never looks widgets up by itself; the host hands it a controller.

use std::collections::VecDeque;

use crate::types::Selection;

/// Error type for platform operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Controller for the host text-input widget that displays the buffer.
///
/// Offsets are char offsets into the content buffer. Hosts whose widgets
/// speak UTF-16 convert with `ContentBuffer::utf16_to_char` and friends.
pub trait TextField {
    /// Current caret/selection. Fails when the widget is not mounted.
    fn selection(&self) -> Result<Selection, PlatformError>;

    /// Select the given range in the widget.
    fn set_selection(&self, selection: Selection) -> Result<(), PlatformError>;

    /// Give the widget keyboard focus.
    fn focus(&self) -> Result<(), PlatformError>;
}

/// Blocking, modal-style notification to the author.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that only logs, for hosts without a modal surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(%message, "editor notification");
    }
}

/// Work the host must run after its next repaint.
///
/// Text widgets drop selection changes made before the new value is
/// rendered, so selection restoration is queued here instead of applied
/// immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostRenderTask {
    /// Focus the text field.
    Focus,
    /// Focus the text field and select the range.
    RestoreSelection(Selection),
}

/// FIFO of post-render tasks, drained by the host once per repaint.
#[derive(Debug, Default, Clone)]
pub struct PostRenderQueue {
    tasks: VecDeque<PostRenderTask>,
}

impl PostRenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: PostRenderTask) {
        self.tasks.push_back(task);
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn pending(&self) -> impl Iterator<Item = &PostRenderTask> {
        self.tasks.iter()
    }

    /// Run every queued task against the text field, in order.
    ///
    /// All tasks are attempted; the first failure is returned.
    pub fn run<F: TextField + ?Sized>(&mut self, field: &F) -> Result<(), PlatformError> {
        let mut first_err = None;
        while let Some(task) = self.tasks.pop_front() {
            let result = match task {
                PostRenderTask::Focus => field.focus(),
                PostRenderTask::RestoreSelection(sel) => {
                    field.focus().and_then(|_| field.set_selection(sel))
                }
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, ?task, "post-render task failed");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
