//! User-facing notifications.

use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex};

use prompt_primitives::{PromptId, ValidationError};
use prompt_store::SaveOutcome;

/// Acknowledgement-style notice shown after a save, delete, or copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The save was rejected; nothing changed.
    ValidationFailed(ValidationError),
    /// The prompt was saved.
    Saved(SaveOutcome),
    /// The prompt was removed.
    Deleted(PromptId),
    /// The editor contents were placed on the clipboard.
    Copied,
    /// Both editor surfaces were empty.
    NothingToCopy,
    /// The clipboard rejected the text.
    CopyFailed(String),
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(_) => f.write_str("Title and content are required."),
            Self::Saved(SaveOutcome::Created(id)) => write!(f, "Prompt saved ({id})."),
            Self::Saved(SaveOutcome::Updated(id)) => write!(f, "Prompt updated ({id})."),
            Self::Deleted(id) => write!(f, "Prompt removed ({id})."),
            Self::Copied => f.write_str("Prompt copied!"),
            Self::NothingToCopy => f.write_str("There is nothing to copy."),
            Self::CopyFailed(reason) => write!(f, "Could not copy the prompt: {reason}"),
        }
    }
}

/// Receives notifications routed by the controller.
pub trait Notifier: Send + Sync {
    /// Presents a notification to the user.
    fn notify(&self, notification: Notification);
}

/// Prints notifications to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        println!("! {notification}");
    }
}

/// Notifier that stores every notification for later inspection.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    /// Creates a new collecting notifier.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns and clears the collected notifications.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex has been poisoned by a previous panic.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        let mut lock = self.received.lock().expect("collecting notifier poisoned");
        lock.drain(..).collect()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .expect("collecting notifier poisoned")
            .push(notification);
    }
}
