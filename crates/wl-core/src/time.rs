//! Wall-clock helpers: `HH:MM` strings, minute offsets and duration labels.

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Errors from strict time parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The value is not a valid `HH:MM` time of day.
    #[error("invalid time '{value}', expected HH:MM between 00:00 and 23:59")]
    Invalid { value: String },
}

/// Converts an `HH:MM` string to minutes since midnight.
///
/// The two components are parsed and combined without range checks, so
/// `"25:99"` gives `1599`. Anything that is not two colon-separated integers,
/// or whose minute count does not fit an `i32`, yields `None`.
pub fn time_to_minutes(time: &str) -> Option<i32> {
    let (hours, minutes) = time.split_once(':')?;
    let hours: i32 = hours.trim().parse().ok()?;
    let minutes: i32 = minutes.trim().parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Converts minutes since midnight back to a zero-padded `HH:MM` string.
///
/// No wraparound is applied: `1500` renders as `"25:00"`.
pub fn minutes_to_time(minutes: i32) -> String {
    let hours = minutes.div_euclid(60);
    let minutes = minutes.rem_euclid(60);
    format!("{hours:02}:{minutes:02}")
}

/// Formats the duration between two `HH:MM` times.
///
/// Returns `"N min"` below one hour, `"N hod"` for whole hours and
/// `"Xh Ym"` otherwise. End before start is not special-cased.
pub fn format_duration(start: &str, end: &str) -> String {
    let diff = match (time_to_minutes(start), time_to_minutes(end)) {
        (Some(start), Some(end)) => end.saturating_sub(start),
        _ => 0,
    };
    format_minutes(diff)
}

/// Same labels as [`format_duration`], from a minute count.
pub fn format_minutes(diff: i32) -> String {
    let hours = diff / 60;
    let minutes = diff % 60;

    if hours == 0 {
        format!("{minutes} min")
    } else if minutes == 0 {
        format!("{hours} hod")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// Formats a minute total as `"Xh Ym"`, always showing both parts.
pub fn format_work_time(minutes: i32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Strictly parses an `HH:MM` time of day into minutes since midnight.
///
/// Use this to validate user input before it reaches a mutation.
pub fn parse_time(value: &str) -> Result<i32, TimeError> {
    let time = NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| TimeError::Invalid {
        value: value.to_string(),
    })?;
    #[allow(clippy::cast_possible_wrap)]
    let minutes = (time.hour() * 60 + time.minute()) as i32;
    Ok(minutes)
}

/// Parses and re-renders a time so `9:05` is stored as `09:05`.
pub fn normalize_time(value: &str) -> Result<String, TimeError> {
    parse_time(value).map(minutes_to_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_minute_of_the_day() {
        for minutes in 0..MINUTES_PER_DAY {
            let time = minutes_to_time(minutes);
            assert_eq!(time_to_minutes(&time), Some(minutes), "failed for {time}");
            assert_eq!(minutes_to_time(time_to_minutes(&time).unwrap()), time);
        }
    }

    #[test]
    fn time_to_minutes_combines_parts() {
        assert_eq!(time_to_minutes("00:00"), Some(0));
        assert_eq!(time_to_minutes("05:33"), Some(333));
        assert_eq!(time_to_minutes("23:59"), Some(1439));
    }

    #[test]
    fn time_to_minutes_does_not_range_check() {
        assert_eq!(time_to_minutes("25:99"), Some(1599));
    }

    #[test]
    fn time_to_minutes_rejects_overflowing_input() {
        assert_eq!(time_to_minutes("99999999:00"), None);
        assert_eq!(time_to_minutes("-99999999:00"), None);
        assert_eq!(time_to_minutes("35791394:7"), Some(i32::MAX));
        assert_eq!(time_to_minutes("35791394:8"), None);
    }

    #[test]
    fn format_duration_saturates_extreme_spans() {
        assert_eq!(format_duration("-35791394:00", "35791394:00"), format_minutes(i32::MAX));
    }

    #[test]
    fn time_to_minutes_rejects_malformed_input() {
        assert_eq!(time_to_minutes(""), None);
        assert_eq!(time_to_minutes("0900"), None);
        assert_eq!(time_to_minutes("ab:cd"), None);
        assert_eq!(time_to_minutes("09:"), None);
    }

    #[test]
    fn minutes_to_time_pads_and_does_not_wrap() {
        assert_eq!(minutes_to_time(0), "00:00");
        assert_eq!(minutes_to_time(65), "01:05");
        assert_eq!(minutes_to_time(1500), "25:00");
    }

    #[test]
    fn format_duration_labels() {
        assert_eq!(format_duration("09:00", "10:30"), "1h 30m");
        assert_eq!(format_duration("09:00", "10:00"), "1 hod");
        assert_eq!(format_duration("09:00", "09:15"), "15 min");
        assert_eq!(format_duration("09:00", "09:00"), "0 min");
    }

    #[test]
    fn format_duration_does_not_guard_negative_spans() {
        assert_eq!(format_duration("10:00", "09:30"), "-30 min");
        assert_eq!(format_minutes(-3), "-3 min");
        assert_eq!(format_minutes(-90), "-1h -30m");
    }

    #[test]
    fn format_duration_treats_malformed_as_zero() {
        assert_eq!(format_duration("nope", "10:00"), "0 min");
    }

    #[test]
    fn work_time_always_shows_both_parts() {
        assert_eq!(format_work_time(0), "0h 0m");
        assert_eq!(format_work_time(180), "3h 0m");
        assert_eq!(format_work_time(547), "9h 7m");
    }

    #[test]
    fn parse_time_validates_range() {
        assert_eq!(parse_time("05:40"), Ok(340));
        assert_eq!(parse_time("23:59"), Ok(1439));
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("12:60").is_err());
        assert!(parse_time("noon").is_err());
    }

    #[test]
    fn parse_time_error_message() {
        let err = parse_time("7").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid time '7', expected HH:MM between 00:00 and 23:59"
        );
    }
}
