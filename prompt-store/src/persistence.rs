//! Persistence adapter mapping the prompt collection onto a single storage
//! entry.

use prompt_primitives::PromptRecord;
use tracing::{debug, warn};

use crate::StoreResult;
use crate::backend::KeyValueBackend;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "prompt-storage";

/// Reads and writes the full prompt collection as one JSON array stored under
/// a single key.
#[derive(Debug)]
pub struct PromptPersistence<B> {
    backend: B,
    key: String,
}

impl<B: KeyValueBackend> PromptPersistence<B> {
    /// Creates an adapter storing the collection under `key`.
    #[must_use]
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Creates an adapter using [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn with_default_key(backend: B) -> Self {
        Self::new(backend, DEFAULT_STORAGE_KEY)
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the stored collection. An absent (or `null`) entry yields an empty
    /// collection.
    ///
    /// # Errors
    ///
    /// Propagates backend failures and malformed stored data.
    pub fn load(&self) -> StoreResult<Vec<PromptRecord>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let records: Option<Vec<PromptRecord>> = serde_json::from_str(&raw)?;
        Ok(records.unwrap_or_default())
    }

    /// Loads the stored collection, substituting an empty one on any failure.
    #[must_use]
    pub fn load_or_empty(&self) -> Vec<PromptRecord> {
        match self.load() {
            Ok(records) => {
                debug!(key = %self.key, count = records.len(), "loaded prompts");
                records
            }
            Err(error) => {
                warn!(key = %self.key, %error, "failed to load prompts; starting empty");
                Vec::new()
            }
        }
    }

    /// Serializes `records` and replaces the stored entry with them.
    ///
    /// # Errors
    ///
    /// Propagates serialization and backend write failures. Nothing is retried.
    pub fn save(&self, records: &[PromptRecord]) -> StoreResult<()> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(&self.key, &raw)?;
        debug!(key = %self.key, count = records.len(), "persisted prompts");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;
    use crate::backend::{FileBackend, MemoryBackend};
    use prompt_primitives::PromptId;
    use tempfile::tempdir;

    fn sample() -> Vec<PromptRecord> {
        vec![
            PromptRecord::new(PromptId::from("2"), "Farewell", "Bye"),
            PromptRecord::new(PromptId::from("1"), "Greeting", "<p>Hello</p>"),
        ]
    }

    #[test]
    fn absent_entry_loads_empty() {
        let persistence = PromptPersistence::with_default_key(MemoryBackend::new());
        assert!(persistence.load().expect("load").is_empty());
    }

    #[test]
    fn null_entry_loads_empty() {
        let persistence = PromptPersistence::with_default_key(MemoryBackend::with_entry(
            DEFAULT_STORAGE_KEY,
            "null",
        ));
        assert!(persistence.load().expect("load").is_empty());
    }

    #[test]
    fn roundtrip_through_fresh_adapter() {
        let dir = tempdir().expect("tempdir");
        let records = sample();

        PromptPersistence::new(FileBackend::new(dir.path()), "prompts")
            .save(&records)
            .expect("save");

        let loaded = PromptPersistence::new(FileBackend::new(dir.path()), "prompts")
            .load()
            .expect("load");
        assert_eq!(loaded, records);
    }

    #[test]
    fn corrupt_entry_is_an_error_but_load_or_empty_absorbs_it() {
        let persistence = PromptPersistence::with_default_key(MemoryBackend::with_entry(
            DEFAULT_STORAGE_KEY,
            "{not json",
        ));

        let err = persistence.load().expect_err("corrupt data");
        assert!(matches!(err, StoreError::Serialization { .. }));
        assert!(persistence.load_or_empty().is_empty());
    }

    #[test]
    fn reads_timestamp_ids_and_markup_content() {
        let raw = r#"[{"id":"1718000000000","title":"Greeting","content":"Hello <b>there</b>"}]"#;
        let persistence = PromptPersistence::with_default_key(MemoryBackend::with_entry(
            DEFAULT_STORAGE_KEY,
            raw,
        ));

        let records = persistence.load().expect("load");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id().as_str(), "1718000000000");
        assert_eq!(records[0].content(), "Hello <b>there</b>");
    }
}
