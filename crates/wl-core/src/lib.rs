//! Core domain logic for the work-status timeline.
//!
//! This crate contains:
//! - Time utilities: `HH:MM` strings to minute offsets and duration labels
//! - The status type catalog, with a total lookup that falls back to "unknown"
//! - The interval engine: create, edit, split and delete entries for one day
//! - Derived queries: time range, block layout, hour markers and day totals

pub mod catalog;
mod engine;
pub mod entry;
pub mod layout;
pub mod stats;
pub mod time;

pub use catalog::{Category, StatusType, resolve_type};
pub use engine::{Engine, Outcome, SplitError};
pub use entry::{EntryDraft, EntryId, EntryPatch, StatusEntry};
pub use layout::{
    Layout, TimeMarker, TimeRange, compute_layout, compute_time_markers, compute_time_range,
};
pub use stats::{Aggregates, compute_aggregates};
pub use time::{TimeError, format_duration, minutes_to_time, parse_time, time_to_minutes};
