//! Day totals for the stats bar.

use serde::Serialize;

use crate::entry::StatusEntry;
use crate::layout::bounds;

/// Aggregate figures over one day's entries.
///
/// `total_span_minutes`, `first_start` and `last_end` follow the stored list
/// order (first element's start, last element's end). After an edit that
/// breaks the ordering they can disagree with `envelope_span_minutes`, which
/// is always the true max end minus min start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    pub total_span_minutes: i32,
    pub envelope_span_minutes: i32,
    pub total_work_minutes: i32,
    pub count: usize,
    pub first_start: Option<String>,
    pub last_end: Option<String>,
}

/// Computes the stats bar figures. Never fails, including on an empty day.
pub fn compute_aggregates(entries: &[StatusEntry]) -> Aggregates {
    let first = entries.first();
    let last = entries.last();

    let total_span_minutes = match (
        first.and_then(StatusEntry::start_minutes),
        last.and_then(StatusEntry::end_minutes),
    ) {
        (Some(start), Some(end)) => end.saturating_sub(start),
        _ => 0,
    };

    let envelope_span_minutes = bounds(entries).map_or(0, |range| range.width());

    let total_work_minutes = entries
        .iter()
        .filter(|e| e.is_work())
        .filter_map(StatusEntry::duration_minutes)
        .fold(0, i32::saturating_add);

    Aggregates {
        total_span_minutes,
        envelope_span_minutes,
        total_work_minutes,
        count: entries.len(),
        first_start: first.map(|e| e.start.clone()),
        last_end: last.map(|e| e.end.clone()),
    }
}
