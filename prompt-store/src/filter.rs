//! Filter/render pipeline producing the list shown beside the editor.

use prompt_primitives::{PromptId, PromptRecord, preview};
use serde::Serialize;

/// One entry of the rendered prompt list.
///
/// The id addresses both the select and the delete affordance of the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// Identifier of the underlying record.
    pub id: PromptId,
    /// Record title.
    pub title: String,
    /// Single-line plain-text rendering of the record content.
    pub preview: String,
}

impl From<&PromptRecord> for ListItem {
    fn from(record: &PromptRecord) -> Self {
        Self {
            id: record.id().clone(),
            title: record.title().to_owned(),
            preview: preview(record.content()),
        }
    }
}

/// Case-insensitive title matcher built once per filter term.
#[derive(Debug, Clone)]
pub struct TitleFilter {
    needle: String,
}

impl TitleFilter {
    /// Builds a matcher for `term`; surrounding whitespace is ignored.
    #[must_use]
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.trim().to_lowercase(),
        }
    }

    /// Returns `true` when the term is blank and every title matches.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns `true` when `title` contains the term.
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        self.is_blank() || title.to_lowercase().contains(&self.needle)
    }
}

/// Derives the displayed list from the collection and a filter term.
///
/// Only titles are searched; collection order is preserved.
#[must_use]
pub fn render_list(records: &[PromptRecord], term: &str) -> Vec<ListItem> {
    let filter = TitleFilter::new(term);
    records
        .iter()
        .filter(|record| filter.matches(record.title()))
        .map(ListItem::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<PromptRecord> {
        vec![
            PromptRecord::new(PromptId::from("3"), "Code Review", "<p>Check the diff</p>"),
            PromptRecord::new(PromptId::from("2"), "Summary", "Summarise the review"),
            PromptRecord::new(PromptId::from("1"), "review notes", "notes"),
        ]
    }

    fn ids(items: &[ListItem]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn blank_term_keeps_everything_in_order() {
        let records = records();
        assert_eq!(ids(&render_list(&records, "")), ["3", "2", "1"]);
        assert_eq!(ids(&render_list(&records, "   ")), ["3", "2", "1"]);
    }

    #[test]
    fn matches_titles_case_insensitively() {
        let records = records();
        assert_eq!(ids(&render_list(&records, " REVIEW ")), ["3", "1"]);
    }

    #[test]
    fn title_filter_trims_and_folds_case() {
        let filter = TitleFilter::new("  Review\t");
        assert!(!filter.is_blank());
        assert!(filter.matches("code REVIEW"));
        assert!(!filter.matches("summary"));
        assert!(TitleFilter::new(" \n ").is_blank());
    }

    #[test]
    fn content_is_not_searched() {
        let records = records();
        assert!(render_list(&records, "diff").is_empty());
        assert!(render_list(&records, "summarise").is_empty());
    }

    #[test]
    fn items_carry_plain_previews() {
        let records = records();
        let items = render_list(&records, "code");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Code Review");
        assert_eq!(items[0].preview, "Check the diff");
    }

    #[test]
    fn rendering_is_idempotent() {
        let records = records();
        let snapshot = records.clone();
        let first = render_list(&records, "re");
        let second = render_list(&records, "re");
        assert_eq!(first, second);
        assert_eq!(records, snapshot);
    }
}
