//! Shared error definitions for prompt primitives.

use thiserror::Error;

/// Result alias for operations that validate editor input.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Reasons a save request is rejected before any state is touched.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Title was empty after trimming whitespace.
    #[error("prompt title must not be empty")]
    EmptyTitle,

    /// Content had no text left once markup was stripped.
    #[error("prompt content must not be empty")]
    EmptyContent,
}
