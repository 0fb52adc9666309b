//! The rich content editor.
//!
//! `RichTextEditor` owns the article buffer and the transient toolbar state.
//! The host hands it a [`TextField`] controller for selection access and a
//! [`Notifier`] for blocking messages, calls [`RichTextEditor::dispatch`] for
//! toolbar actions, and calls [`RichTextEditor::after_render`] once per
//! repaint.

use std::fmt;

use lorewiki_common::{ImageFile, ImageHost, UploadError, UploadedImage};
use smol_str::SmolStr;

use crate::actions::EditorAction;
use crate::color::{ColorSelections, HexColor};
use crate::error::EditorError;
use crate::execute::{Applied, execute_action};
use crate::inserter::append_fragment;
use crate::links::{ImageForm, LinkForm, image_fragment};
use crate::platform::{LogNotifier, Notifier, PostRenderQueue, PostRenderTask, TextField};
use crate::preview::{TrustedHtml, ViewMode, render_preview};
use crate::text::{ContentBuffer, TextBuffer};

pub const DEFAULT_PLACEHOLDER: &str = "Enter the article HTML...";

type ChangeCallback = Box<dyn FnMut(&str)>;

pub struct RichTextEditor<F, N = LogNotifier> {
    buffer: ContentBuffer,
    field: F,
    notifier: N,
    on_change: Option<ChangeCallback>,
    placeholder: SmolStr,
    post_render: PostRenderQueue,
    view: ViewMode,
    pub link_form: LinkForm,
    pub image_form: ImageForm,
    pub colors: ColorSelections,
}

impl<F: TextField> RichTextEditor<F, LogNotifier> {
    /// Editor for a new, empty article that only logs notifications.
    pub fn new(field: F) -> Self {
        Self::with_notifier(field, LogNotifier)
    }
}

impl<F: TextField, N: Notifier> RichTextEditor<F, N> {
    pub fn with_notifier(field: F, notifier: N) -> Self {
        Self {
            buffer: ContentBuffer::new(),
            field,
            notifier,
            on_change: None,
            placeholder: SmolStr::new_static(DEFAULT_PLACEHOLDER),
            post_render: PostRenderQueue::new(),
            view: ViewMode::default(),
            link_form: LinkForm::default(),
            image_form: ImageForm::default(),
            colors: ColorSelections::default(),
        }
    }

    /// Start from existing article content. Does not fire the change callback.
    pub fn with_content(mut self, content: &str) -> Self {
        self.buffer = ContentBuffer::from_str(content);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<SmolStr>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Called with the full buffer after every mutation.
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn value(&self) -> String {
        self.buffer.to_string()
    }

    pub fn buffer(&self) -> &ContentBuffer {
        &self.buffer
    }

    /// Direct edit from the text area: replace everything.
    pub fn set_value(&mut self, value: &str) {
        self.buffer.set(value);
        self.emit_change();
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn toggle_preview(&mut self) -> ViewMode {
        self.view = self.view.toggled();
        self.view
    }

    pub fn preview(&self) -> TrustedHtml {
        render_preview(&self.buffer)
    }

    /// Tasks waiting for the next repaint.
    pub fn pending_post_render(&self) -> impl Iterator<Item = &PostRenderTask> {
        self.post_render.pending()
    }

    /// Drain post-render work. Hosts call this after the new value is on
    /// screen.
    pub fn after_render(&mut self) -> Result<(), EditorError> {
        self.post_render.run(&self.field)?;
        Ok(())
    }

    pub fn set_text_color(&mut self, color: &str) -> Result<(), EditorError> {
        self.colors.text = HexColor::parse(color)?;
        Ok(())
    }

    pub fn set_highlight_color(&mut self, color: &str) -> Result<(), EditorError> {
        self.colors.highlight = HexColor::parse(color)?;
        Ok(())
    }

    /// Apply an action, notifying the author of anything they need to act on.
    ///
    /// On error the buffer is unchanged and no change event fires.
    pub fn dispatch(&mut self, action: &EditorAction) -> Result<(), EditorError> {
        let result = self.apply(action);
        if let Err(err) = &result {
            self.report(action.name(), err);
        }
        result
    }

    fn apply(&mut self, action: &EditorAction) -> Result<(), EditorError> {
        let selection = if action.needs_selection() {
            Some(self.field.selection()?)
        } else {
            None
        };

        let Applied { edit, after_render } = execute_action(&mut self.buffer, action, selection)?;
        tracing::debug!(
            action = action.name(),
            pos = edit.edit_char_pos,
            inserted = edit.inserted_len,
            deleted = edit.deleted_len,
            "applied editor action"
        );

        self.emit_change();
        if let Some(task) = after_render {
            self.post_render.push(task);
        }
        Ok(())
    }

    /// Wrap the selection in a colored span using the current text color.
    pub fn colorize(&mut self) -> Result<(), EditorError> {
        self.dispatch(&EditorAction::Colorize(self.colors.text.clone()))
    }

    /// Wrap the selection in a mark using the current highlight color.
    pub fn highlight(&mut self) -> Result<(), EditorError> {
        self.dispatch(&EditorAction::Highlight(self.colors.highlight.clone()))
    }

    /// Insert a link from the link form and clear it.
    pub fn insert_link(&mut self) -> Result<(), EditorError> {
        let action = EditorAction::InsertLink {
            url: self.link_form.url.clone(),
            text: self.link_form.text.clone(),
        };
        self.dispatch(&action)?;
        self.link_form.clear();
        Ok(())
    }

    /// Insert an image from the image form and clear it.
    pub fn insert_image(&mut self) -> Result<(), EditorError> {
        let action = EditorAction::InsertImage {
            url: self.image_form.url.clone(),
            alt: self.image_form.alt.clone(),
        };
        self.dispatch(&action)?;
        self.image_form.clear();
        Ok(())
    }

    /// Apply the result of an upload started with [`upload_image`].
    ///
    /// The `<img>` is appended to whatever the buffer holds now. Failures
    /// notify the author and leave the buffer alone.
    pub fn finish_upload(
        &mut self,
        result: Result<UploadedImage, UploadError>,
    ) -> Result<(), EditorError> {
        let applied = result.map_err(EditorError::from).and_then(|image| {
            let html = image_fragment(&image.url, &image.filename)?;
            Ok(append_fragment(&mut self.buffer, &html))
        });
        match applied {
            Ok(edit) => {
                tracing::debug!(pos = edit.edit_char_pos, "appended uploaded image");
                self.emit_change();
                Ok(())
            }
            Err(err) => {
                self.report("Upload", &err);
                Err(err)
            }
        }
    }

    /// Upload and insert in one step, holding the editor for the whole
    /// request. Hosts that need to keep editing while the upload runs use
    /// [`upload_image`] and [`RichTextEditor::finish_upload`] instead.
    pub async fn upload_and_insert<H: ImageHost>(
        &mut self,
        host: &H,
        file: &ImageFile,
    ) -> Result<(), EditorError> {
        let result = upload_image(host, file).await;
        self.finish_upload(result)
    }

    fn emit_change(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            let value = self.buffer.to_string();
            callback(&value);
        }
    }

    fn report(&self, action: &str, err: &EditorError) {
        match err.user_message() {
            Some(message) => {
                tracing::debug!(action, error = %err, "editor action rejected");
                self.notifier.notify(message);
            }
            None => tracing::warn!(action, error = %err, "editor action skipped"),
        }
    }
}

/// Send `file` to the image host. Holds no reference to the editor, so the
/// author can keep typing while it runs.
pub async fn upload_image<H: ImageHost + ?Sized>(
    host: &H,
    file: &ImageFile,
) -> Result<UploadedImage, UploadError> {
    match host.upload_image(file).await {
        Ok(image) => {
            tracing::debug!(filename = %image.filename, url = %image.url, "upload finished");
            Ok(image)
        }
        Err(err) => {
            tracing::warn!(filename = %file.name, error = %err, "image upload failed");
            Err(err)
        }
    }
}

impl<F, N> fmt::Debug for RichTextEditor<F, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichTextEditor")
            .field("buffer", &self.buffer)
            .field("placeholder", &self.placeholder)
            .field("view", &self.view)
            .field("post_render", &self.post_render)
            .field("link_form", &self.link_form)
            .field("image_form", &self.image_form)
            .field("colors", &self.colors)
            .finish_non_exhaustive()
    }
}
