//! Work-status timeline CLI library.
//!
//! This crate is the presentation layer over `wl-core`: it renders engine
//! queries as text and turns user commands into engine operations.

mod cli;
pub mod commands;
mod config;
pub mod render;

pub use cli::{Cli, Commands};
pub use config::Config;
