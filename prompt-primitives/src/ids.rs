//! Prompt identifier types.

use std::fmt::{self, Display, Formatter};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Identifier of a stored prompt.
///
/// Freshly minted ids are the decimal millisecond timestamp of their creation,
/// but any string read back from durable storage is accepted as-is.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(String);

impl PromptId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn timestamp(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl Display for PromptId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PromptId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for PromptId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<PromptId> for String {
    fn from(value: PromptId) -> Self {
        value.0
    }
}

/// Mints strictly increasing timestamp ids.
///
/// Two ids requested within the same millisecond (or after the wall clock
/// stepped backwards) are bumped past the previous one, and [`observe`] lets
/// the owner raise the floor above ids that already exist so a deleted id is
/// never handed out again.
///
/// A generator never returns the same id twice. Once the floor reaches
/// `i64::MAX` it continues with `<i64::MAX>-<n>` ids.
///
/// [`observe`]: IdGenerator::observe
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
    spill: u64,
}

impl IdGenerator {
    /// Creates a generator with no history.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0, spill: 0 }
    }

    /// Raises the floor above `id` when it is a timestamp id.
    pub fn observe(&mut self, id: &PromptId) {
        if let Some(value) = id.timestamp() {
            self.last = self.last.max(value);
        }
    }

    /// Returns the next identifier.
    pub fn next_id(&mut self) -> PromptId {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&mut self, now_millis: i64) -> PromptId {
        if let Some(floor) = self.last.checked_add(1) {
            let value = now_millis.max(floor);
            self.last = value;
            return PromptId(value.to_string());
        }

        self.spill += 1;
        PromptId(format!("{}-{}", self.last, self.spill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_within_one_millisecond_are_distinct() {
        let mut generator = IdGenerator::new();
        let first = generator.next_at(1_000);
        let second = generator.next_at(1_000);
        assert_eq!(first.as_str(), "1000");
        assert_eq!(second.as_str(), "1001");
    }

    #[test]
    fn observed_ids_are_never_reissued() {
        let mut generator = IdGenerator::new();
        generator.observe(&PromptId::from("5000"));
        generator.observe(&PromptId::from("not-a-timestamp"));

        let next = generator.next_at(4_000);
        assert_eq!(next, PromptId::from("5001"));
    }

    #[test]
    fn clock_going_backwards_still_increases() {
        let mut generator = IdGenerator::new();
        let a = generator.next_at(2_000);
        let b = generator.next_at(1_500);
        assert!(b.timestamp() > a.timestamp());
    }

    #[test]
    fn exhausted_counter_keeps_minting_distinct_ids() {
        let mut generator = IdGenerator::new();
        generator.observe(&PromptId::from(i64::MAX.to_string()));

        let first = generator.next_at(1_000);
        let second = generator.next_at(1_000);
        assert_eq!(first.as_str(), format!("{}-1", i64::MAX));
        assert_eq!(second.as_str(), format!("{}-2", i64::MAX));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = PromptId::from("1718000000000");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"1718000000000\"");
    }
}
