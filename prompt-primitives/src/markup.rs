//! Rich-text content helpers.
//!
//! Prompt content is an HTML fragment produced by a rich-text editor. Saving,
//! empty-state detection, list previews and clipboard export all work on the
//! text that remains once the markup is gone.

use html2text::render::TrivialDecorator;

/// Line width handed to the renderer; wide enough that prompt text is never
/// re-wrapped.
const RENDER_WIDTH: usize = 10_000;

/// Returns the trimmed plain text of an HTML fragment.
///
/// Fragments without tags or entities are returned trimmed and otherwise
/// untouched.
#[must_use]
pub fn plain_text(markup: &str) -> String {
    if !markup.contains(['<', '&']) {
        return markup.trim().to_owned();
    }

    // No emphasis markers, heading prefixes or link footnotes: only the text.
    // The renderer only fails for widths too narrow to lay out text; keep the
    // raw fragment in that case.
    html2text::from_read_with_decorator(markup.as_bytes(), RENDER_WIDTH, TrivialDecorator::new())
        .map_or_else(|_| markup.trim().to_owned(), |text| text.trim().to_owned())
}

/// Returns `true` when the fragment holds visible text.
#[must_use]
pub fn has_text(markup: &str) -> bool {
    !plain_text(markup).is_empty()
}

/// Single-line preview of a fragment with whitespace runs collapsed.
#[must_use]
pub fn preview(markup: &str) -> String {
    plain_text(markup)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
