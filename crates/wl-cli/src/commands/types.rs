//! Types command for listing the status catalog.

use std::io::Write;

use anyhow::Result;

use crate::render::format_types;

pub fn run<W: Write>(writer: &mut W) -> Result<()> {
    write!(writer, "{}", format_types())?;
    Ok(())
}
