//! Prompt storage for promptdesk.
//!
//! The [`PromptStore`] owns the ordered collection and the current selection,
//! and rewrites the durable copy through [`PromptPersistence`] after every
//! mutation. [`render_list`] derives the filtered view shown to the user.

#![warn(missing_docs, clippy::pedantic)]

pub mod backend;
mod error;
pub mod filter;
pub mod persistence;
pub mod store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::{StoreError, StoreResult};
pub use filter::{ListItem, TitleFilter, render_list};
pub use persistence::{DEFAULT_STORAGE_KEY, PromptPersistence};
pub use store::{PromptStore, SaveOutcome};
