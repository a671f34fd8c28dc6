//! Show command for rendering the day.

use std::io::Write;

use anyhow::Result;
use wl_core::Engine;

use crate::Config;
use crate::render::{format_day, format_day_json};

/// Builds the starting day for a command.
pub fn initial_engine(config: &Config, empty: bool) -> Engine {
    if config.start_with_sample && !empty {
        Engine::sample_day()
    } else {
        Engine::new()
    }
}

pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool, empty: bool) -> Result<()> {
    let engine = initial_engine(config, empty);

    if json {
        writeln!(writer, "{}", format_day_json(&engine, config)?)?;
    } else {
        write!(writer, "{}", format_day(&engine, config))?;
    }

    Ok(())
}
