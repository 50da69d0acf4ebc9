//! Interaction controller dispatching user actions.

use std::sync::Arc;

use prompt_editor::EditorBinding;
use prompt_primitives::PromptId;
use prompt_store::{KeyValueBackend, PromptStore};
use tracing::{debug, warn};

use crate::action::Action;
use crate::clipboard::Clipboard;
use crate::notify::{Notification, Notifier};
use crate::view::ListView;

/// Single dispatcher wiring actions to the store, editor, view, clipboard and
/// notifier.
///
/// Actions are handled one at a time and run to completion. Save, delete and
/// copy each produce exactly one notification; the list is re-rendered only
/// from here.
pub struct Controller<B> {
    store: PromptStore<B>,
    editor: EditorBinding,
    filter: String,
    view: Arc<dyn ListView>,
    notifier: Arc<dyn Notifier>,
    clipboard: Arc<dyn Clipboard>,
}

impl<B: KeyValueBackend> Controller<B> {
    /// Creates a controller around an opened store with an empty draft in
    /// the editor.
    #[must_use]
    pub fn new(
        store: PromptStore<B>,
        view: Arc<dyn ListView>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            store,
            editor: EditorBinding::new(),
            filter: String::new(),
            view,
            notifier,
            clipboard,
        }
    }

    /// Renders the initial, unfiltered list.
    pub fn start(&mut self) {
        self.filter.clear();
        self.refresh();
    }

    /// Returns the prompt store.
    #[must_use]
    pub fn store(&self) -> &PromptStore<B> {
        &self.store
    }

    /// Returns the editor binding.
    #[must_use]
    pub fn editor(&self) -> &EditorBinding {
        &self.editor
    }

    /// Returns the active filter term.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Re-renders the list with the active filter term.
    pub fn refresh(&self) {
        let items = self.store.render(&self.filter);
        self.view.render(&items);
    }

    /// Handles one user action.
    pub async fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatching action");
        match action {
            Action::Save => self.save(),
            Action::New => self.new_draft(),
            Action::Delete(id) => self.delete(&id),
            Action::Select(id) => self.select(&id),
            Action::Search(term) => self.search(term),
            Action::Copy => self.copy().await,
            Action::EditTitle(text) => self.editor.edit_title(text),
            Action::EditContent(text) => self.editor.edit_content(text),
        }
    }

    fn save(&mut self) {
        match self.store.save(self.editor.title(), self.editor.content()) {
            Ok(outcome) => {
                if let Some(record) = self.store.get(outcome.id()) {
                    self.editor.populate(record);
                }
                self.refresh();
                self.notifier.notify(Notification::Saved(outcome));
            }
            Err(error) => {
                debug!(%error, "save rejected");
                self.notifier.notify(Notification::ValidationFailed(error));
            }
        }
    }

    fn new_draft(&mut self) {
        self.store.start_new_draft();
        self.editor.clear();
    }

    fn delete(&mut self, id: &PromptId) {
        let was_selected = self.store.selection() == Some(id);
        if !self.store.delete_by_id(id) {
            warn!(prompt_id = %id, "cannot delete unknown prompt");
            return;
        }
        if was_selected {
            self.editor.clear();
        }
        self.refresh();
        self.notifier.notify(Notification::Deleted(id.clone()));
    }

    fn select(&mut self, id: &PromptId) {
        if self.store.select_by_id(id) {
            self.editor.show(self.store.selected());
        } else {
            warn!(prompt_id = %id, "cannot select unknown prompt");
        }
    }

    fn search(&mut self, term: String) {
        self.filter = term;
        self.refresh();
    }

    async fn copy(&self) {
        let Some(text) = self.editor.clipboard_text() else {
            self.notifier.notify(Notification::NothingToCopy);
            return;
        };

        let notification = match self.clipboard.write_text(&text).await {
            Ok(()) => Notification::Copied,
            Err(error) => {
                warn!(%error, "clipboard write failed");
                Notification::CopyFailed(error.to_string())
            }
        };
        self.notifier.notify(notification);
    }
}
