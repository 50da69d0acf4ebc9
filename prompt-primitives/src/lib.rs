//! Core shared types for promptdesk.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod markup;
mod record;

/// Validation error raised when a prompt cannot be saved.
pub use error::{ValidationError, ValidationResult};
/// Prompt identifiers and the monotonic generator that mints them.
pub use ids::{IdGenerator, PromptId};
/// Helpers for reducing rich-text content to plain text.
pub use markup::{has_text, plain_text, preview};
/// Persisted prompt record.
pub use record::PromptRecord;
