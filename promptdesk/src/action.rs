//! Typed user actions handled by the controller.

use prompt_primitives::PromptId;

/// A user interaction, dispatched one at a time to
/// [`Controller::dispatch`](crate::Controller::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Save the editor contents (update the selection or create a prompt).
    Save,
    /// Start a new, empty draft.
    New,
    /// Delete the prompt with the given id.
    Delete(PromptId),
    /// Load the prompt with the given id into the editor.
    Select(PromptId),
    /// Filter the list by title.
    Search(String),
    /// Copy the editor contents to the clipboard.
    Copy,
    /// The user changed the title surface.
    EditTitle(String),
    /// The user changed the content surface.
    EditContent(String),
}
