//! Key-value backends holding serialized prompt collections.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::{StoreError, StoreResult};

/// Durable storage addressed by string keys.
///
/// Each `set` replaces the whole value stored under a key; readers never see a
/// partially written value.
pub trait KeyValueBackend {
    /// Returns the value stored under `key`, or `None` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be read.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the value cannot be written.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Box<B> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// File-backed storage writing one `<key>.json` file per key under a root
/// directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Creates a backend rooted at `root`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file path holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] when the key is empty, a relative
    /// path component, or contains a path separator.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "storage entry absent");
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        // Write beside the target, then rename over it.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;

        debug!(path = %path.display(), bytes = value.len(), "wrote storage entry");
        Ok(())
    }
}

/// In-process storage, used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with a single entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| StoreError::unavailable("memory backend lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StoreError::unavailable("memory backend lock poisoned"))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

fn validate_key(key: &str) -> StoreResult<()> {
    let reason = if key.trim().is_empty() {
        "key must not be empty"
    } else if key == "." || key == ".." {
        "key must not be a relative path component"
    } else if key.contains(['/', '\\']) {
        "key must not contain path separators"
    } else {
        return Ok(());
    };

    Err(StoreError::InvalidKey {
        key: key.to_owned(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_backend_roundtrip() {
        let dir = tempdir().expect("tempdir");
        let backend = FileBackend::new(dir.path().join("nested"));
        assert_eq!(backend.root(), dir.path().join("nested"));
        assert!(backend.get("prompt-storage").expect("get").is_none());

        backend.set("prompt-storage", "[1]").expect("set");
        backend.set("prompt-storage", "[2]").expect("overwrite");

        let value = backend.get("prompt-storage").expect("get").expect("value");
        assert_eq!(value, "[2]");
        assert!(backend.root().join("prompt-storage.json").exists());
        assert!(!backend.root().join("prompt-storage.json.tmp").exists());
    }

    #[test]
    fn file_backend_rejects_path_like_keys() {
        let dir = tempdir().expect("tempdir");
        let backend = FileBackend::new(dir.path());

        for key in ["", "..", "a/b", "a\\b"] {
            let err = backend.set(key, "x").expect_err("key should be rejected");
            assert!(matches!(err, StoreError::InvalidKey { .. }), "{key}");
        }
    }

    #[test]
    fn memory_backend_overwrites() {
        let backend = MemoryBackend::with_entry("k", "old");
        backend.set("k", "new").expect("set");
        assert_eq!(backend.get("k").expect("get").as_deref(), Some("new"));
        assert!(backend.get("missing").expect("get").is_none());
    }
}
