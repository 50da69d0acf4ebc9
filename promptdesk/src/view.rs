//! List and editor presentation.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use prompt_editor::EditorBinding;
use prompt_primitives::PromptId;
use prompt_store::ListItem;

/// Maximum preview characters shown per list entry.
const PREVIEW_CHARS: usize = 60;

/// Receives the filtered prompt list whenever the controller re-renders.
pub trait ListView: Send + Sync {
    /// Replaces the displayed list with `items`.
    fn render(&self, items: &[ListItem]);
}

/// Prints the list to standard output, one entry per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleView;

impl ListView for ConsoleView {
    fn render(&self, items: &[ListItem]) {
        print!("{}", format_list(items));
    }
}

/// Formats the list as `id  title  preview` lines.
#[must_use]
pub fn format_list(items: &[ListItem]) -> String {
    if items.is_empty() {
        return "(no prompts)\n".to_owned();
    }

    let mut out = String::new();
    for item in items {
        let preview = truncate(&item.preview, PREVIEW_CHARS);
        let _ = writeln!(out, "{:>15}  {}  {}", item.id, item.title, preview);
    }
    out
}

/// Formats the editor surfaces for display, marking empty ones with their
/// placeholder.
#[must_use]
pub fn format_editor(editor: &EditorBinding, selection: Option<&PromptId>) -> String {
    let title = if editor.title_surface().is_empty() {
        "<title>".to_owned()
    } else {
        editor.title().to_owned()
    };
    let content = if editor.content_surface().is_empty() {
        "<content>".to_owned()
    } else {
        editor.content().to_owned()
    };
    let selection = selection.map_or_else(|| "new draft".to_owned(), |id| format!("editing {id}"));

    format!("[{selection}]\n{title}\n{content}\n")
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

/// View that records each render for later inspection.
#[derive(Debug, Default)]
pub struct CollectingView {
    renders: Mutex<Vec<Vec<ListItem>>>,
}

impl CollectingView {
    /// Creates a new collecting view.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns the most recently rendered list.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex has been poisoned by a previous panic.
    #[must_use]
    pub fn last(&self) -> Option<Vec<ListItem>> {
        self.renders
            .lock()
            .expect("collecting view poisoned")
            .last()
            .cloned()
    }

    /// Returns how many times the list was rendered.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex has been poisoned by a previous panic.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders.lock().expect("collecting view poisoned").len()
    }
}

impl ListView for CollectingView {
    fn render(&self, items: &[ListItem]) {
        self.renders
            .lock()
            .expect("collecting view poisoned")
            .push(items.to_vec());
    }
}
