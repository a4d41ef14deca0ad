//! Config CLI commands.
//!
//! Commands for managing the Widgetbox configuration file.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;

use crate::cli::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{self, config_paths};
use crate::error::WidgetboxError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Initialize a new configuration file with all options documented.
    ///
    /// All options are commented out, showing their default values.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  widgetbox config init              # Create config at default location
  widgetbox config init --force      # Overwrite existing config
  widgetbox config init --path ~/my-config.jsonc
  widgetbox config init --stdout     # Print template to stdout"#
    )]
    Init {
        /// Overwrite existing configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// If not specified, uses the first search path.
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the configuration template to stdout instead of writing to a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the configuration search paths and which one is in use.
    Path,

    /// Show the effective configuration, defaults included.
    Show,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(
    cmd: &ConfigCommands,
    custom: Option<&Path>,
    json: bool,
) -> Result<(), WidgetboxError> {
    match cmd {
        ConfigCommands::Init { force, path, stdout } => {
            if *stdout {
                println!("{}", generate_config_template());
                Ok(())
            } else {
                init_config(*force, path.clone().or_else(|| custom.map(Path::to_path_buf)))
            }
        }
        ConfigCommands::Path => {
            show_config_path(custom);
            Ok(())
        }
        ConfigCommands::Show => show_config(custom, json),
    }
}

/// Initialize a new configuration file.
fn init_config(force: bool, target: Option<PathBuf>) -> Result<(), WidgetboxError> {
    let config_path = target
        .or_else(|| config_paths().into_iter().next())
        .unwrap_or_else(|| PathBuf::from("config.jsonc"));

    if config_path.exists() && !force {
        return Err(WidgetboxError::ConfigError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        )));
    }

    create_config_file(&config_path).map_err(|e| {
        WidgetboxError::ConfigError(format!(
            "Failed to create config file {}: {e}",
            config_path.display()
        ))
    })?;

    tracing::info!(path = %config_path.display(), "config: template written");
    println!("Configuration file created at: {}", config_path.display());
    println!("\nAll options are commented out by default.");
    println!("Edit the file and uncomment the options you want to configure.");
    Ok(())
}

/// Show the configuration file search paths.
fn show_config_path(custom: Option<&Path>) {
    if let Some(path) = custom {
        let marker = if path.exists() { " (active)" } else { " (missing)" };
        println!("Configuration file (from --config):\n\n  {}{marker}", path.display());
        return;
    }

    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;
    for (i, path) in config_paths().iter().enumerate() {
        let marker = match (path.exists(), found_config) {
            (true, false) => {
                found_config = true;
                " (active)".green().to_string()
            }
            (true, true) => " (exists)".dimmed().to_string(),
            _ => String::new(),
        };
        println!("  {}. {}{marker}", i + 1, path.display());
    }

    if !found_config {
        println!("\nNo configuration file found; defaults are in effect.");
        println!("Run 'widgetbox config init' to create one.");
    }
}

/// Show the effective configuration.
fn show_config(custom: Option<&Path>, json: bool) -> Result<(), WidgetboxError> {
    let loaded = config::load(custom)?;

    if !json {
        match &loaded.path {
            Some(path) => println!("{} {}", "Source:".bold(), path.display()),
            None => println!("{} {}", "Source:".bold(), "defaults".dimmed()),
        }
        println!("{} {}\n", "Placements:".bold(), loaded.placements_dir().display());
    }

    output::print_json(&loaded.config);
    Ok(())
}
