//! Editor binding for promptdesk.
//!
//! An [`EditorBinding`] holds the title and content surfaces the user types
//! into. It mirrors the selected prompt (or an empty draft) and keeps an
//! empty-state flag per surface for placeholder rendering.

#![warn(missing_docs, clippy::pedantic)]

pub mod binding;
pub mod surface;

pub use binding::EditorBinding;
pub use surface::{EditorSurface, SurfaceKind};
