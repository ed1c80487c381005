//! # pageaudit
//!
//! **CLI Binary**
//!
//! This is the entry point for the `pageaudit` command-line application.
//! It orchestrates the other crates to perform the requested actions.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Load configuration and resolve profiles
//! * Install logging
//! * Dispatch commands and map outcomes to exit codes
//!
//! This crate should contain minimal business logic.

mod cli;
mod commands;
mod config;
mod error_hints;
mod logging;

use anyhow::Result;
use clap::Parser;

pub use cli::{AuditArgs, Cli, Commands, FormatArg};
pub use commands::audit::EXIT_BELOW_THRESHOLD;
pub use config::{Profile, UserConfig, resolve_format, resolve_profile, resolve_settings};

/// Entry point used by the `pageaudit` binary. Returns the exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    commands::dispatch(cli)
}

pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}
