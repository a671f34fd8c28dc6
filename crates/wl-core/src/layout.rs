//! Timeline geometry derived from a set of entries.
//!
//! Positions are percentages of the day's time range so a renderer can map
//! them onto any width. Degenerate inputs (no entries, zero-width range,
//! unparseable times) produce zeros instead of dividing by zero.

use serde::Serialize;

use crate::entry::StatusEntry;

/// Earliest start and latest end across a collection, in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub min: i32,
    pub max: i32,
}

impl TimeRange {
    pub fn width(&self) -> i32 {
        self.max.saturating_sub(self.min)
    }
}

/// Horizontal placement of one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Layout {
    pub left_percent: f64,
    pub width_percent: f64,
}

impl Layout {
    /// Places `[start, end)` within a range starting at `min_time`.
    pub fn from_minutes(start: i32, end: i32, min_time: i32, range_width: i32) -> Self {
        if range_width <= 0 {
            return Self::default();
        }
        let width = f64::from(range_width);
        Self {
            left_percent: (f64::from(start) - f64::from(min_time)) / width * 100.0,
            width_percent: (f64::from(end) - f64::from(start)) / width * 100.0,
        }
    }
}

/// An hour tick on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeMarker {
    pub label: String,
    pub position_percent: f64,
}

pub(crate) fn bounds(entries: &[StatusEntry]) -> Option<TimeRange> {
    let min = entries.iter().filter_map(StatusEntry::start_minutes).min()?;
    let max = entries.iter().filter_map(StatusEntry::end_minutes).max()?;
    Some(TimeRange { min, max })
}

/// Computes the min start / max end over all entries.
///
/// Entries whose times do not parse are skipped. An empty collection gives
/// the zero-width range `0..0`.
pub fn compute_time_range(entries: &[StatusEntry]) -> TimeRange {
    bounds(entries).unwrap_or_default()
}

/// Computes where an entry sits on the timeline.
pub fn compute_layout(entry: &StatusEntry, min_time: i32, range_width: i32) -> Layout {
    match (entry.start_minutes(), entry.end_minutes()) {
        (Some(start), Some(end)) => Layout::from_minutes(start, end, min_time, range_width),
        _ => Layout::default(),
    }
}

/// One marker per whole hour inside `[min_time, max_time]`, inclusive.
pub fn compute_time_markers(min_time: i32, max_time: i32) -> Vec<TimeMarker> {
    let range = max_time.saturating_sub(min_time);
    let first_hour = min_time.div_euclid(60);
    let last_hour = max_time.saturating_add(59).div_euclid(60);

    (first_hour..=last_hour)
        .filter_map(|hour| hour.checked_mul(60))
        .filter(|mins| (min_time..=max_time).contains(mins))
        .map(|mins| TimeMarker {
            label: format!("{:02}:00", mins / 60),
            position_percent: if range > 0 {
                (f64::from(mins) - f64::from(min_time)) / f64::from(range) * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
