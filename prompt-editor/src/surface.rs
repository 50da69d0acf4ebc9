//! A single editable surface and its empty-state flag.

use prompt_primitives::plain_text;

/// Kind of text a surface holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Plain single-line text (the title).
    PlainText,
    /// HTML fragment produced by a rich-text editor (the content).
    RichText,
}

/// Editable text plus the empty-state flag derived from it.
///
/// The flag is recomputed on every change, whether the change comes from the
/// user or from populating the surface programmatically, and depends only on
/// whether any text remains after trimming (and stripping markup for rich
/// text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSurface {
    kind: SurfaceKind,
    text: String,
    empty: bool,
}

impl EditorSurface {
    /// Creates an empty surface.
    #[must_use]
    pub const fn new(kind: SurfaceKind) -> Self {
        Self {
            kind,
            text: String::new(),
            empty: true,
        }
    }

    /// Returns the raw text, markup included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the trimmed text with any markup removed.
    #[must_use]
    pub fn plain(&self) -> String {
        match self.kind {
            SurfaceKind::PlainText => self.text.trim().to_owned(),
            SurfaceKind::RichText => plain_text(&self.text),
        }
    }

    /// Returns `true` while the surface shows no text.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.empty
    }

    /// Replaces the text and refreshes the empty-state flag.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.empty = self.plain().is_empty();
    }

    /// Clears the surface.
    pub fn clear(&mut self) {
        self.set_text(String::new());
    }
}
