//! Authoritative in-memory prompt collection and selection.

use std::collections::HashSet;

use prompt_primitives::{
    IdGenerator, PromptId, PromptRecord, ValidationError, ValidationResult, has_text,
};
use tracing::{debug, info, warn};

use crate::backend::KeyValueBackend;
use crate::filter::{ListItem, TitleFilter, render_list};
use crate::persistence::PromptPersistence;

/// What a successful [`PromptStore::save`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new record was inserted at the front and selected.
    Created(PromptId),
    /// The selected record was updated in place.
    Updated(PromptId),
}

impl SaveOutcome {
    /// Returns the id of the saved record.
    #[must_use]
    pub fn id(&self) -> &PromptId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }

    /// Returns `true` when the save created a record.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Ordered prompt collection plus the id of the record loaded in the editor.
///
/// The collection is newest-first and never holds two records with the same
/// id. The selection is either `None` (an unsaved draft) or the id of a record
/// that exists. Every create, update and delete rewrites the durable copy
/// before returning; write failures are logged and the in-memory state stays
/// authoritative for the session.
#[derive(Debug)]
pub struct PromptStore<B> {
    records: Vec<PromptRecord>,
    selection: Option<PromptId>,
    ids: IdGenerator,
    persistence: PromptPersistence<B>,
}

impl<B: KeyValueBackend> PromptStore<B> {
    /// Opens the store, loading whatever the persistence adapter can provide.
    ///
    /// Load failures yield an empty collection. Records repeating an id seen
    /// earlier in the stored data are dropped. The selection starts empty.
    #[must_use]
    pub fn open(persistence: PromptPersistence<B>) -> Self {
        let mut ids = IdGenerator::new();
        let mut seen = HashSet::new();
        let mut records = persistence.load_or_empty();
        records.retain(|record| {
            ids.observe(record.id());
            let fresh = seen.insert(record.id().clone());
            if !fresh {
                warn!(prompt_id = %record.id(), "dropping stored prompt with duplicate id");
            }
            fresh
        });

        info!(count = records.len(), key = persistence.key(), "prompt store opened");

        Self {
            records,
            selection: None,
            ids,
            persistence,
        }
    }

    /// Returns the collection, newest first.
    #[must_use]
    pub fn records(&self) -> &[PromptRecord] {
        &self.records
    }

    /// Returns the number of stored prompts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no prompts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the selected id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&PromptId> {
        self.selection.as_ref()
    }

    /// Returns the selected record, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&PromptRecord> {
        self.selection.as_ref().and_then(|id| self.get(id))
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &PromptId) -> Option<&PromptRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Returns the persistence adapter.
    #[must_use]
    pub fn persistence(&self) -> &PromptPersistence<B> {
        &self.persistence
    }

    /// Selects `id` when it names a stored record. Unknown ids leave the
    /// selection untouched and return `false`.
    pub fn select_by_id(&mut self, id: &PromptId) -> bool {
        if self.get(id).is_none() {
            debug!(prompt_id = %id, "ignoring selection of unknown prompt");
            return false;
        }
        self.selection = Some(id.clone());
        true
    }

    /// Clears the selection so the next save creates a record.
    pub fn start_new_draft(&mut self) {
        self.selection = None;
    }

    /// Saves editor input.
    ///
    /// With a selection the selected record is updated in place; without one a
    /// record with a fresh id is inserted at the front and selected. A selection
    /// whose record has disappeared is treated like no selection, so the input
    /// is kept as a new record. Title and content are stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] when the trimmed title is empty
    /// and [`ValidationError::EmptyContent`] when the content has no text once
    /// markup is stripped. Nothing is changed in either case.
    pub fn save(&mut self, title: &str, content: &str) -> ValidationResult<SaveOutcome> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if !has_text(content) {
            return Err(ValidationError::EmptyContent);
        }
        let content = content.trim();

        let outcome = if let Some(record) = self.selected_mut() {
            record.update(title, content);
            SaveOutcome::Updated(record.id().clone())
        } else {
            if let Some(stale) = self.selection.take() {
                warn!(prompt_id = %stale, "selected prompt no longer exists; saving as new");
            }
            let id = self.fresh_id();
            self.records
                .insert(0, PromptRecord::new(id.clone(), title, content));
            self.selection = Some(id.clone());
            SaveOutcome::Created(id)
        };

        debug!(prompt_id = %outcome.id(), created = outcome.is_created(), "saved prompt");
        self.persist();
        Ok(outcome)
    }

    /// Removes the record with `id`, clearing the selection when it pointed at
    /// it. Returns whether a record was removed; the collection is persisted
    /// either way.
    pub fn delete_by_id(&mut self, id: &PromptId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        let removed = self.records.len() != before;

        if self.selection.as_ref() == Some(id) {
            self.selection = None;
        }

        if removed {
            debug!(prompt_id = %id, "deleted prompt");
        } else {
            debug!(prompt_id = %id, "delete requested for unknown prompt");
        }
        self.persist();
        removed
    }

    /// Returns records whose title contains `term` (trimmed, case-insensitive),
    /// in collection order. A blank term returns every record.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&PromptRecord> {
        let filter = TitleFilter::new(term);
        self.records
            .iter()
            .filter(|record| filter.matches(record.title()))
            .collect()
    }

    /// Renders the list view for `term`.
    #[must_use]
    pub fn render(&self, term: &str) -> Vec<ListItem> {
        render_list(&self.records, term)
    }

    fn selected_mut(&mut self) -> Option<&mut PromptRecord> {
        let id = self.selection.as_ref()?;
        self.records.iter_mut().find(|record| record.id() == id)
    }

    fn fresh_id(&mut self) -> PromptId {
        // The generator never repeats itself, so at most `len` candidates can
        // collide with stored ids and the last one drawn here is free.
        let mut id = self.ids.next_id();
        for _ in 0..self.records.len() {
            if self.get(&id).is_none() {
                break;
            }
            id = self.ids.next_id();
        }
        id
    }

    fn persist(&self) {
        // Best effort: the session keeps working from memory when the write fails.
        if let Err(error) = self.persistence.save(&self.records) {
            warn!(key = self.persistence.key(), %error, "failed to persist prompts");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileBackend, MemoryBackend};
    use crate::persistence::DEFAULT_STORAGE_KEY;
    use crate::{StoreError, StoreResult};
    use tempfile::tempdir;

    struct FailingBackend;

    impl KeyValueBackend for FailingBackend {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::unavailable("read refused"))
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::unavailable("write refused"))
        }
    }

    fn empty_store() -> PromptStore<MemoryBackend> {
        PromptStore::open(PromptPersistence::with_default_key(MemoryBackend::new()))
    }

    fn stored(store: &PromptStore<MemoryBackend>) -> Vec<PromptRecord> {
        store.persistence().load().expect("load persisted copy")
    }

    fn titles<B: KeyValueBackend>(store: &PromptStore<B>) -> Vec<&str> {
        store.records().iter().map(PromptRecord::title).collect()
    }

    #[test]
    fn walkthrough_create_create_delete_delete() {
        let mut store = empty_store();

        let x = store.save("Greeting", "Hello").expect("save greeting");
        assert!(x.is_created());
        let x = x.id().clone();
        assert_eq!(store.selection(), Some(&x));
        assert_eq!(titles(&store), ["Greeting"]);

        store.start_new_draft();
        let y = store.save("Farewell", "Bye").expect("save farewell").id().clone();
        assert_ne!(x, y);
        assert_eq!(titles(&store), ["Farewell", "Greeting"]);
        assert_eq!(store.selection(), Some(&y));

        assert!(store.delete_by_id(&x));
        assert_eq!(titles(&store), ["Farewell"]);
        assert_eq!(store.selection(), Some(&y));

        assert!(store.select_by_id(&y));
        assert!(store.delete_by_id(&y));
        assert!(store.is_empty());
        assert_eq!(store.selection(), None);
        assert!(stored(&store).is_empty());
    }

    #[test]
    fn ids_stay_unique_across_rapid_creates() {
        let mut store = empty_store();
        for i in 0..50 {
            store.start_new_draft();
            store.save(&format!("prompt {i}"), "body").expect("save");
        }

        let unique: HashSet<_> = store.records().iter().map(PromptRecord::id).collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn invalid_saves_change_nothing() {
        let mut store = empty_store();
        let id = store.save("Keep", "me").expect("save").id().clone();
        let before = store.records().to_vec();

        assert_eq!(store.save("", "anything"), Err(ValidationError::EmptyTitle));
        assert_eq!(store.save("   ", "anything"), Err(ValidationError::EmptyTitle));
        assert_eq!(store.save("x", ""), Err(ValidationError::EmptyContent));
        assert_eq!(store.save("x", "<p> </p>"), Err(ValidationError::EmptyContent));
        assert_eq!(
            store.save("x", "<strong> </strong>"),
            Err(ValidationError::EmptyContent)
        );

        assert_eq!(store.records(), before.as_slice());
        assert_eq!(store.selection(), Some(&id));
    }

    #[test]
    fn save_with_selection_updates_in_place() {
        let mut store = empty_store();
        let first = store.save("First", "one").expect("save").id().clone();
        store.start_new_draft();
        store.save("Second", "two").expect("save");

        assert!(store.select_by_id(&first));
        let outcome = store.save("  First (edited) ", " <b>uno</b> ").expect("update");

        assert_eq!(outcome, SaveOutcome::Updated(first.clone()));
        assert_eq!(titles(&store), ["Second", "First (edited)"]);
        let record = store.get(&first).expect("record");
        assert_eq!(record.content(), "<b>uno</b>");
        assert_eq!(stored(&store), store.records());
    }

    #[test]
    fn save_with_stale_selection_creates_new_record() {
        let mut store = empty_store();
        store.save("Existing", "body").expect("save");
        store.selection = Some(PromptId::from("vanished"));

        let outcome = store.save("Rescued", "draft").expect("save");

        assert!(outcome.is_created());
        assert_ne!(outcome.id().as_str(), "vanished");
        assert_eq!(titles(&store), ["Rescued", "Existing"]);
        assert_eq!(store.selection(), Some(outcome.id()));
    }

    #[test]
    fn selecting_unknown_id_keeps_selection() {
        let mut store = empty_store();
        let id = store.save("A", "a").expect("save").id().clone();

        assert!(!store.select_by_id(&PromptId::from("missing")));
        assert_eq!(store.selection(), Some(&id));
    }

    #[test]
    fn deleting_unknown_id_is_a_noop() {
        let mut store = empty_store();
        let id = store.save("A", "a").expect("save").id().clone();

        assert!(!store.delete_by_id(&PromptId::from("missing")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.selection(), Some(&id));
    }

    #[test]
    fn search_filters_titles_in_order() {
        let mut store = empty_store();
        for title in ["alpha notes", "Beta", "ALPHA draft"] {
            store.start_new_draft();
            store.save(title, "body").expect("save");
        }

        let found: Vec<_> = store.search("Alpha").into_iter().map(PromptRecord::title).collect();
        assert_eq!(found, ["ALPHA draft", "alpha notes"]);
        assert_eq!(store.search(" ").len(), 3);
        assert!(store.search("body").is_empty());
    }

    #[test]
    fn reopening_restores_collection_without_selection() {
        let dir = tempdir().expect("tempdir");
        let open = || {
            PromptStore::open(PromptPersistence::with_default_key(FileBackend::new(
                dir.path(),
            )))
        };

        let mut store = open();
        store.save("Greeting", "Hello").expect("save");
        store.start_new_draft();
        store.save("Farewell", "Bye").expect("save");
        let expected = store.records().to_vec();
        drop(store);

        let mut reopened = open();
        assert_eq!(reopened.records(), expected.as_slice());
        assert_eq!(reopened.selection(), None);

        reopened.start_new_draft();
        let id = reopened.save("Third", "3").expect("save").id().clone();
        assert!(expected.iter().all(|record| record.id() != &id));
    }

    #[test]
    fn duplicate_stored_ids_are_dropped_on_open() {
        let raw = r#"[
            {"id":"1","title":"first","content":"a"},
            {"id":"1","title":"shadow","content":"b"},
            {"id":"2","title":"second","content":"c"}
        ]"#;
        let store = PromptStore::open(PromptPersistence::with_default_key(
            MemoryBackend::with_entry(DEFAULT_STORAGE_KEY, raw),
        ));

        assert_eq!(titles(&store), ["first", "second"]);
    }

    #[test]
    fn creates_after_loading_the_largest_timestamp_id() {
        let max = i64::MAX.to_string();
        let raw = serde_json::json!([
            { "id": max, "title": "last", "content": "x" },
            { "id": format!("{max}-1"), "title": "taken", "content": "y" },
        ]);
        let mut store = PromptStore::open(PromptPersistence::with_default_key(
            MemoryBackend::with_entry(DEFAULT_STORAGE_KEY, raw.to_string()),
        ));

        let first = store.save("new", "body").expect("save").id().clone();
        store.start_new_draft();
        let second = store.save("newer", "body").expect("save").id().clone();

        let unique: HashSet<_> = store.records().iter().map(PromptRecord::id).collect();
        assert_eq!(unique.len(), 4);
        assert_ne!(first, second);
        assert_eq!(titles(&store), ["newer", "new", "last", "taken"]);
    }

    #[test]
    fn search_and_render_agree() {
        let mut store = empty_store();
        for title in ["Daily standup", "Weekly review", "standup notes"] {
            store.start_new_draft();
            store.save(title, "body").expect("save");
        }

        let searched: Vec<_> = store
            .search(" STANDUP")
            .into_iter()
            .map(PromptRecord::id)
            .collect();
        let rendered = store.render(" STANDUP");
        let listed: Vec<_> = rendered.iter().map(|item| &item.id).collect();
        assert_eq!(searched, listed);
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn persistence_failures_do_not_block_mutations() {
        let mut store = PromptStore::open(PromptPersistence::with_default_key(FailingBackend));
        assert!(store.is_empty());

        let id = store.save("Offline", "still works").expect("save").id().clone();
        assert_eq!(store.selection(), Some(&id));
        assert_eq!(store.len(), 1);

        assert!(store.delete_by_id(&id));
        assert!(store.is_empty());
        assert_eq!(store.selection(), None);
    }
}
