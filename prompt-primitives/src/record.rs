//! The persisted prompt record.

use serde::{Deserialize, Serialize};

use crate::PromptId;

/// A titled block of content, the unit of storage.
///
/// The serialized shape is exactly `{ "id", "title", "content" }`; durable
/// data carries no version field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    id: PromptId,
    title: String,
    content: String,
}

impl PromptRecord {
    /// Creates a record from its parts.
    #[must_use]
    pub fn new(id: PromptId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns the immutable identifier.
    #[must_use]
    pub fn id(&self) -> &PromptId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the rich-text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces title and content, keeping the id.
    pub fn update(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_matches_stored_entries() {
        let record = PromptRecord::new(PromptId::from("42"), "Greeting", "<b>Hello</b>");
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({ "id": "42", "title": "Greeting", "content": "<b>Hello</b>" })
        );
    }

    #[test]
    fn update_keeps_identifier() {
        let mut record = PromptRecord::new(PromptId::from("7"), "old", "old body");
        record.update("new", "new body");
        assert_eq!(record.id().as_str(), "7");
        assert_eq!(record.title(), "new");
        assert_eq!(record.content(), "new body");
    }
}
