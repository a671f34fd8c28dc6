use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wl_cli::commands::{session, show, types};
use wl_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Show { json, empty }) => {
            show::run(&mut stdout, &config, *json, *empty)?;
        }
        Some(Commands::Types) => {
            types::run(&mut stdout)?;
        }
        Some(Commands::Session { empty }) => {
            let engine = show::initial_engine(&config, *empty);
            session::run(io::stdin().lock(), &mut stdout, &config, engine)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
