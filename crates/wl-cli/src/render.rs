//! Text rendering of a day: header, stats bar, time axis, timeline and table.
//!
//! Everything here reads engine query results; no temporal logic lives in
//! this module.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use wl_core::time::{format_minutes, format_work_time};
use wl_core::{Aggregates, Category, Engine, Layout, StatusEntry, TimeMarker, catalog};

use crate::Config;

/// Narrowest timeline that still fits a few hour labels.
const MIN_TIMELINE_WIDTH: usize = 10;

const WORK_BLOCK: char = '█';
const NON_WORK_BLOCK: char = '░';
const UNKNOWN_BLOCK: char = '▒';

// ========== Header & Stats ==========

pub fn format_header(employee: &str, day: NaiveDate) -> String {
    format!("WORK LOG: {employee}\n{}\n", day.format("%A, %b %-d, %Y"))
}

pub fn format_stats(stats: &Aggregates) -> String {
    let mut output = String::new();
    let rows = [
        ("Total time:", format_minutes(stats.total_span_minutes)),
        ("Work time:", format_work_time(stats.total_work_minutes)),
        ("Statuses:", stats.count.to_string()),
        (
            "First status:",
            stats.first_start.clone().unwrap_or_else(|| "-".to_string()),
        ),
        (
            "Last status:",
            stats.last_end.clone().unwrap_or_else(|| "-".to_string()),
        ),
    ];
    for (label, value) in rows {
        writeln!(output, "{label:<15}{value}").unwrap();
    }
    output
}

// ========== Timeline ==========

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn column(percent: f64, width: usize) -> usize {
    let col = (percent / 100.0 * width as f64).round().max(0.0) as usize;
    col.min(width)
}

fn block_char(entry: &StatusEntry) -> char {
    let status_type = entry.status_type();
    if *status_type == catalog::UNKNOWN {
        UNKNOWN_BLOCK
    } else if status_type.is_work() {
        WORK_BLOCK
    } else {
        NON_WORK_BLOCK
    }
}

/// Hour labels placed over the timeline bar. Labels that would collide with
/// the previous one are dropped.
pub fn format_axis(markers: &[TimeMarker], width: usize) -> String {
    let width = width.max(MIN_TIMELINE_WIDTH);
    // +2 for the bar's border characters
    let mut line = vec![' '; width + 2];
    let mut last_end: Option<usize> = None;

    for marker in markers {
        // Hours past 99 give labels wider than `HH:00`
        let label_len = marker.label.chars().count();
        let Some(max_start) = line.len().checked_sub(label_len) else {
            continue;
        };
        let center = 1 + column(marker.position_percent, width);
        let start = center.saturating_sub(label_len / 2).min(max_start);
        if last_end.is_some_and(|end| start <= end) {
            continue;
        }
        for (offset, ch) in marker.label.chars().enumerate() {
            line[start + offset] = ch;
        }
        last_end = Some(start + label_len);
    }

    line.into_iter().collect::<String>().trim_end().to_string()
}

/// The proportional bar: work blocks solid, non-work shaded. Where entries
/// overlap, the one earlier in list order keeps the cell.
pub fn format_timeline(engine: &Engine, width: usize) -> String {
    let width = width.max(MIN_TIMELINE_WIDTH);
    let mut row = vec![' '; width];

    for entry in engine.entries() {
        let Layout {
            left_percent,
            width_percent,
        } = engine.layout(entry);
        let start = column(left_percent, width);
        let mut end = column(left_percent + width_percent, width);
        // Keep very short statuses visible
        if end <= start && width_percent > 0.0 && start < width {
            end = start + 1;
        }
        let fill = block_char(entry);
        for cell in row.iter_mut().take(end).skip(start) {
            if *cell == ' ' {
                *cell = fill;
            }
        }
    }

    format!("|{}|", row.into_iter().collect::<String>())
}

// ========== Table ==========

pub fn format_table(entries: &[StatusEntry]) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "{:<3}  {:<26}  {:<5}  {:<5}  {:<8}  Category",
        "ID", "Status", "Start", "End", "Duration"
    )
    .unwrap();
    writeln!(
        output,
        "───  ──────────────────────────  ─────  ─────  ────────  ────────"
    )
    .unwrap();

    for entry in entries {
        let status_type = entry.status_type();
        writeln!(
            output,
            "{:<3}  {:<26}  {:<5}  {:<5}  {:<8}  {}",
            entry.id.get(),
            status_type.name,
            entry.start,
            entry.end,
            wl_core::format_duration(&entry.start, &entry.end),
            status_type.category
        )
        .unwrap();
    }

    output
}

// ========== Full Day ==========

/// Renders the whole day view.
pub fn format_day(engine: &Engine, config: &Config) -> String {
    let mut output = format_header(&config.employee, config.day);
    writeln!(output).unwrap();
    output.push_str(&format_stats(&engine.aggregates()));
    writeln!(output).unwrap();

    if engine.is_empty() {
        writeln!(output, "No statuses recorded.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{}",
        format_axis(&engine.time_markers(), config.timeline_width)
    )
    .unwrap();
    writeln!(output, "{}", format_timeline(engine, config.timeline_width)).unwrap();
    writeln!(output).unwrap();
    output.push_str(&format_table(engine.entries()));
    output
}

/// Catalog listing grouped by category.
pub fn format_types() -> String {
    let mut output = String::new();
    for (heading, category) in [("WORK", Category::Work), ("NON-WORK", Category::NonWork)] {
        writeln!(output, "{heading}").unwrap();
        for status_type in catalog::types_in(category) {
            writeln!(
                output,
                "  {:<13} {} {}",
                status_type.id, status_type.icon, status_type.name
            )
            .unwrap();
        }
    }
    output
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    #[serde(flatten)]
    entry: &'a StatusEntry,
    name: &'static str,
    category: Category,
    duration: String,
    layout: Layout,
}

#[derive(Debug, Serialize)]
struct JsonDay<'a> {
    employee: &'a str,
    day: NaiveDate,
    aggregates: Aggregates,
    markers: Vec<TimeMarker>,
    entries: Vec<JsonEntry<'a>>,
}

/// Formats the day as pretty JSON.
pub fn format_day_json(engine: &Engine, config: &Config) -> Result<String> {
    let entries = engine
        .entries()
        .iter()
        .map(|entry| {
            let status_type = entry.status_type();
            JsonEntry {
                entry,
                name: status_type.name,
                category: status_type.category,
                duration: wl_core::format_duration(&entry.start, &entry.end),
                layout: engine.layout(entry),
            }
        })
        .collect();

    let day = JsonDay {
        employee: &config.employee,
        day: config.day,
        aggregates: engine.aggregates(),
        markers: engine.time_markers(),
        entries,
    };

    Ok(serde_json::to_string_pretty(&day)?)
}
