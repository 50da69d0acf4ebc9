//! Two-way binding between the selected prompt and the editor surfaces.

use prompt_primitives::PromptRecord;
use tracing::trace;

use crate::surface::{EditorSurface, SurfaceKind};

/// Title and content surfaces of the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBinding {
    title: EditorSurface,
    content: EditorSurface,
}

impl Default for EditorBinding {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorBinding {
    /// Creates an editor holding an empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: EditorSurface::new(SurfaceKind::PlainText),
            content: EditorSurface::new(SurfaceKind::RichText),
        }
    }

    /// Fills both surfaces from a stored record.
    pub fn populate(&mut self, record: &PromptRecord) {
        trace!(prompt_id = %record.id(), "populating editor");
        self.title.set_text(record.title());
        self.content.set_text(record.content());
    }

    /// Empties both surfaces for a new draft.
    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }

    /// Mirrors the selection: populate from `record`, or clear when there is
    /// none.
    pub fn show(&mut self, record: Option<&PromptRecord>) {
        match record {
            Some(record) => self.populate(record),
            None => self.clear(),
        }
    }

    /// Applies a user edit to the title.
    pub fn edit_title(&mut self, text: impl Into<String>) {
        self.title.set_text(text);
    }

    /// Applies a user edit to the content.
    pub fn edit_content(&mut self, text: impl Into<String>) {
        self.content.set_text(text);
    }

    /// Returns the raw title as typed.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.text()
    }

    /// Returns the raw content, markup included.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.text()
    }

    /// Returns the title surface.
    #[must_use]
    pub const fn title_surface(&self) -> &EditorSurface {
        &self.title
    }

    /// Returns the content surface.
    #[must_use]
    pub const fn content_surface(&self) -> &EditorSurface {
        &self.content
    }

    /// Text to place on the clipboard: `title\n\ncontent` with markup
    /// stripped, or the content alone when there is no title. Returns `None`
    /// when both surfaces are empty.
    #[must_use]
    pub fn clipboard_text(&self) -> Option<String> {
        let title = self.title.plain();
        let content = self.content.plain();

        match (title.is_empty(), content.is_empty()) {
            (true, true) => None,
            (true, false) => Some(content),
            (false, _) => Some(format!("{title}\n\n{content}")),
        }
    }
}
