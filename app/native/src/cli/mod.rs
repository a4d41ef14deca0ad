//! CLI module for Widgetbox.
//!
//! The command-line front end over the dashboard service. Every command is
//! a single process invocation: it loads the configuration, opens the
//! owner's placements, performs one operation and exits.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::WidgetboxError;

/// Parses the process arguments, loads the configured dashboard and runs the
/// selected command for the requesting owner.
///
/// # Errors
///
/// Returns the config, storage or placement error that stopped the command.
pub fn run() -> Result<(), WidgetboxError> {
    let cli = Cli::parse();
    cli.execute()
}
