//! Error types for the storage subsystem.

use serde_json::Error as SerdeError;
use thiserror::Error;

/// Errors emitted while reading or writing durable prompt data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage key cannot be mapped onto the backend.
    #[error("invalid storage key `{key}`: {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// Underlying I/O failure while reading or writing storage files.
    #[error("i/o error: {source}")]
    Io {
        /// Source [`std::io::Error`].
        #[from]
        source: std::io::Error,
    },
    /// Serialization or deserialization error.
    #[error("serialization error: {source}")]
    Serialization {
        /// Source [`serde_json::Error`].
        #[from]
        source: SerdeError,
    },
    /// The backend could not be used at all (poisoned lock, injected failure).
    #[error("storage unavailable: {reason}")]
    Unavailable {
        /// Human-readable reason describing the failure.
        reason: String,
    },
}

impl StoreError {
    /// Helper to construct [`StoreError::Unavailable`] from string-like values.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
