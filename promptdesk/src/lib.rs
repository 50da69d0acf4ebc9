//! Local prompt manager.
//!
//! The [`Controller`] receives typed [`Action`]s and drives the prompt store,
//! the editor binding, the list view, the clipboard and user notifications.
//! The component crates are re-exported for convenience.

#![warn(missing_docs, clippy::pedantic)]

pub mod action;
pub mod clipboard;
pub mod controller;
pub mod notify;
pub mod session;
pub mod telemetry;
pub mod view;

pub use action::Action;
pub use clipboard::{Clipboard, ClipboardError, ClipboardResult, CommandClipboard, MemoryClipboard};
pub use controller::Controller;
pub use notify::{CollectingNotifier, ConsoleNotifier, Notification, Notifier};
pub use view::{CollectingView, ConsoleView, ListView};

/// Re-export shared primitives.
pub use prompt_primitives as primitives;

/// Prompt store, persistence, and list rendering.
pub use prompt_store as store;

/// Editor surfaces and binding.
pub use prompt_editor as editor;

/// Configuration loading.
pub use prompt_config as config;
