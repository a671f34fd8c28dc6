//! The interval engine: owns one day's entries and the operations on them.
//!
//! # Ordering
//!
//! `create` re-sorts the collection by start time. `edit` and `split` do not:
//! edits keep the entry where it is, and a split appends the new half at the
//! end. Callers that want a sorted view after edits call
//! [`Engine::sort_by_start`].
//!
//! # Validation
//!
//! The engine does not reject overlapping entries, `start >= end`, or
//! malformed time strings. Only `split` validates its argument.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{self, DEFAULT_TYPE_ID, StatusType};
use crate::entry::{EntryDraft, EntryId, EntryPatch, StatusEntry};
use crate::layout::{self, Layout, TimeMarker, TimeRange};
use crate::stats::{self, Aggregates};
use crate::time::{minutes_to_time, time_to_minutes};

/// Length proposed for a new entry.
const DRAFT_LENGTH_MINUTES: i32 = 30;

/// Start and end proposed when the day is empty.
const EMPTY_DAY_DRAFT: (&str, &str) = ("08:00", "08:30");

/// The day the mockup opens with: (id, type, start, end).
const SAMPLE_DAY: [(u64, &str, &str, &str); 10] = [
    (1, "priprava", "05:33", "05:50"),
    (2, "udrzba", "05:50", "06:20"),
    (3, "jizdaAreal", "06:20", "06:55"),
    (4, "prejezd", "06:55", "07:15"),
    (5, "pripravaPudy", "07:15", "10:30"),
    (6, "prestavka", "10:30", "11:00"),
    (7, "pripravaPudy", "11:00", "14:00"),
    (8, "prejezd", "14:00", "14:25"),
    (9, "jizdaAreal", "14:25", "14:45"),
    (10, "udrzba", "14:45", "15:30"),
];

/// Result of an operation that targets an existing entry by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum Outcome {
    /// The entry was found and the change was made.
    Applied,
    /// No entry has that id; nothing changed.
    NotFound,
}

/// Split rejections. The collection is unchanged when these are returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// No entry has the given id.
    #[error("status {id} not found")]
    NotFound { id: EntryId },

    /// The split time is not strictly inside the entry.
    #[error("split time {split_time} must fall strictly between {start} and {end}")]
    OutOfRange {
        split_time: String,
        start: String,
        end: String,
    },
}

/// Mints entry ids. Never hands out the same id twice.
#[derive(Debug, Clone)]
struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    fn after(entries: &[StatusEntry]) -> Self {
        let next = entries.iter().map(|e| e.id.get()).max().map_or(1, |max| max + 1);
        Self { next }
    }

    fn mint(&mut self) -> EntryId {
        let id = EntryId::new(self.next);
        self.next += 1;
        id
    }
}

/// One day's status entries.
#[derive(Debug, Clone)]
pub struct Engine {
    entries: Vec<StatusEntry>,
    ids: IdGenerator,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with no entries.
    pub fn new() -> Self {
        Self::from_entries(Vec::new())
    }

    /// Creates an engine over existing entries, kept in the given order.
    ///
    /// New ids start above the largest id present.
    pub fn from_entries(entries: Vec<StatusEntry>) -> Self {
        let ids = IdGenerator::after(&entries);
        Self { entries, ids }
    }

    /// The ten-entry demo day, 05:33 to 15:30.
    pub fn sample_day() -> Self {
        let entries = SAMPLE_DAY
            .iter()
            .map(|&(id, type_id, start, end)| StatusEntry {
                id: EntryId::new(id),
                type_id: type_id.to_string(),
                start: start.to_string(),
                end: end.to_string(),
            })
            .collect();
        Self::from_entries(entries)
    }

    // ========== Accessors ==========

    /// Entries in their stored order.
    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&StatusEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ========== Mutations ==========

    /// Adds an entry and re-sorts the collection by start time.
    ///
    /// Neither `start < end` nor overlap with other entries is checked.
    pub fn create(
        &mut self,
        type_id: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> EntryId {
        let id = self.ids.mint();
        let entry = StatusEntry {
            id,
            type_id: type_id.into(),
            start: start.into(),
            end: end.into(),
        };
        tracing::debug!(%id, type_id = %entry.type_id, start = %entry.start, end = %entry.end, "creating status");
        self.entries.push(entry);
        self.sort_by_start();
        id
    }

    /// Replaces the patched fields of an entry in place, without re-sorting.
    pub fn edit(&mut self, id: EntryId, patch: EntryPatch) -> Outcome {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            tracing::debug!(%id, "edit ignored, status not found");
            return Outcome::NotFound;
        };
        tracing::debug!(%id, ?patch, "editing status");
        patch.apply(entry);
        Outcome::Applied
    }

    /// Removes an entry.
    pub fn delete(&mut self, id: EntryId) -> Outcome {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            tracing::debug!(%id, "delete ignored, status not found");
            return Outcome::NotFound;
        };
        self.entries.remove(index);
        tracing::debug!(%id, "deleted status");
        Outcome::Applied
    }

    /// Splits an entry at `split_time`, returning the id of the second half.
    ///
    /// The first half stays where the entry was; the second half is appended
    /// at the end of the collection and keeps the same type.
    pub fn split(&mut self, id: EntryId, split_time: &str) -> Result<EntryId, SplitError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(SplitError::NotFound { id })?;
        let entry = &self.entries[index];

        let inside = match (
            entry.start_minutes(),
            entry.end_minutes(),
            time_to_minutes(split_time),
        ) {
            (Some(start), Some(end), Some(at)) => start < at && at < end,
            _ => false,
        };
        if !inside {
            tracing::debug!(%id, split_time, "split rejected");
            return Err(SplitError::OutOfRange {
                split_time: split_time.to_string(),
                start: entry.start.clone(),
                end: entry.end.clone(),
            });
        }

        let new_id = self.ids.mint();
        let entry = &mut self.entries[index];
        let tail = StatusEntry {
            id: new_id,
            type_id: entry.type_id.clone(),
            start: split_time.to_string(),
            end: std::mem::replace(&mut entry.end, split_time.to_string()),
        };
        self.entries.push(tail);

        tracing::debug!(%id, %new_id, split_time, "split status");
        Ok(new_id)
    }

    /// Stable sort by start time. Entries whose start does not parse go last.
    pub fn sort_by_start(&mut self) {
        self.entries
            .sort_by_key(|e| e.start_minutes().map_or((1, 0), |m| (0, m)));
    }

    /// Proposed type and times for the next entry: it starts where the last
    /// entry (in list order) ends and lasts half an hour.
    pub fn next_entry_defaults(&self) -> EntryDraft {
        let (start, end) = match self.entries.last() {
            Some(last) => {
                let end = time_to_minutes(&last.end).map_or_else(
                    || last.end.clone(),
                    |m| minutes_to_time(m.saturating_add(DRAFT_LENGTH_MINUTES)),
                );
                (last.end.clone(), end)
            }
            None => (EMPTY_DAY_DRAFT.0.to_string(), EMPTY_DAY_DRAFT.1.to_string()),
        };
        EntryDraft {
            type_id: DEFAULT_TYPE_ID.to_string(),
            start,
            end,
        }
    }

    // ========== Queries ==========

    pub fn time_range(&self) -> TimeRange {
        layout::compute_time_range(&self.entries)
    }

    pub fn layout(&self, entry: &StatusEntry) -> Layout {
        let range = self.time_range();
        layout::compute_layout(entry, range.min, range.width())
    }

    /// Hour ticks for the current range; empty when there are no entries.
    pub fn time_markers(&self) -> Vec<TimeMarker> {
        layout::bounds(&self.entries)
            .map(|range| layout::compute_time_markers(range.min, range.max))
            .unwrap_or_default()
    }

    pub fn aggregates(&self) -> Aggregates {
        stats::compute_aggregates(&self.entries)
    }

    pub fn resolve_type(&self, type_id: &str) -> &'static StatusType {
        catalog::resolve_type(type_id)
    }
}
