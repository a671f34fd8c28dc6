//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Work-status timeline for a single day.
///
/// Shows a day's statuses as a proportional timeline and a table, and lets
/// you add, edit, split and delete them in an interactive session.
#[derive(Debug, Parser)]
#[command(name = "wl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the day: stats, timeline and status table.
    Show {
        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Start from an empty day even if the config asks for the sample.
        #[arg(long)]
        empty: bool,
    },

    /// List the status types.
    Types,

    /// Edit the day interactively, one command per line on stdin.
    Session {
        /// Start from an empty day even if the config asks for the sample.
        #[arg(long)]
        empty: bool,
    },
}
