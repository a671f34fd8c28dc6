//! CLI subcommand implementations.

pub mod session;
pub mod show;
pub mod types;
