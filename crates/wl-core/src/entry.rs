//! Status entries: the labelled intervals of one day.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, StatusType};
use crate::time::{format_duration, time_to_minutes};

/// Identifier of a status entry, minted by the engine and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// One labelled interval `[start, end)` within a day.
///
/// `type_id` is not checked against the catalog; unknown ids render with the
/// catalog fallback. Times are kept as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub id: EntryId,
    pub type_id: String,
    pub start: String,
    pub end: String,
}

impl StatusEntry {
    pub fn start_minutes(&self) -> Option<i32> {
        time_to_minutes(&self.start)
    }

    pub fn end_minutes(&self) -> Option<i32> {
        time_to_minutes(&self.end)
    }

    /// Length in minutes, or `None` if either bound does not parse.
    pub fn duration_minutes(&self) -> Option<i32> {
        Some(self.end_minutes()?.saturating_sub(self.start_minutes()?))
    }

    /// True when both bounds parse and `end > start`.
    pub fn is_well_formed(&self) -> bool {
        self.duration_minutes().is_some_and(|d| d > 0)
    }

    pub fn status_type(&self) -> &'static StatusType {
        catalog::resolve_type(&self.type_id)
    }

    pub fn is_work(&self) -> bool {
        self.status_type().is_work()
    }

    /// Hover text: icon and name, the time span, then the duration.
    pub fn describe(&self) -> String {
        let t = self.status_type();
        format!(
            "{} {}\n{} - {}\nTrvání: {}",
            t.icon,
            t.name,
            self.start,
            self.end,
            format_duration(&self.start, &self.end)
        )
    }
}

/// Partial update applied by [`Engine::edit`](crate::Engine::edit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.type_id.is_none() && self.start.is_none() && self.end.is_none()
    }

    pub(crate) fn apply(self, entry: &mut StatusEntry) {
        if let Some(type_id) = self.type_id {
            entry.type_id = type_id;
        }
        if let Some(start) = self.start {
            entry.start = start;
        }
        if let Some(end) = self.end {
            entry.end = end;
        }
    }
}

/// Values proposed for a new entry before the user confirms them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub type_id: String,
    pub start: String,
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(type_id: &str, start: &str, end: &str) -> StatusEntry {
        StatusEntry {
            id: EntryId::new(1),
            type_id: type_id.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    #[test]
    fn durations() {
        assert_eq!(entry("prace", "05:33", "05:50").duration_minutes(), Some(17));
        assert_eq!(entry("prace", "x", "05:50").duration_minutes(), None);
    }

    #[test]
    fn well_formed_requires_positive_length() {
        assert!(entry("prace", "08:00", "08:01").is_well_formed());
        assert!(!entry("prace", "08:00", "08:00").is_well_formed());
        assert!(!entry("prace", "09:00", "08:00").is_well_formed());
    }

    #[test]
    fn describe_known_type() {
        let text = entry("prestavka", "10:30", "11:00").describe();
        assert_eq!(text, "☕ Přestávka\n10:30 - 11:00\nTrvání: 30 min");
    }

    #[test]
    fn describe_unknown_type_uses_fallback() {
        let text = entry("mystery", "08:00", "09:45").describe();
        assert_eq!(text, "❓ Neznámý\n08:00 - 09:45\nTrvání: 1h 45m");
    }

    #[test]
    fn patch_replaces_only_given_fields() {
        let mut e = entry("prace", "08:00", "09:00");
        EntryPatch {
            end: Some("09:30".to_string()),
            ..EntryPatch::default()
        }
        .apply(&mut e);

        assert_eq!(e.type_id, "prace");
        assert_eq!(e.start, "08:00");
        assert_eq!(e.end, "09:30");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&entry("udrzba", "05:50", "06:20")).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"typeId":"udrzba","start":"05:50","end":"06:20"}"#
        );
    }
}
