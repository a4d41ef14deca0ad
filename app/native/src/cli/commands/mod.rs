//! CLI command definitions using Clap.
//!
//! Commands are organized into submodules:
//!
//! - `catalog` - Widget and size class listings
//! - `config_cmd` - Configuration file management
//! - `placement` - Commands that read or change an owner's grid
//! - `types` - Argument types shared across commands

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config::{self, LoadedConfig};
use crate::constants::APP_NAME;
use crate::dashboard::Dashboard;
use crate::error::WidgetboxError;
use crate::schema;
use crate::store::{JsonFileStore, OwnerId};
use crate::widgets::WidgetRegistry;

pub mod catalog;
pub mod config_cmd;
pub mod placement;
pub mod types;

pub use config_cmd::ConfigCommands;
pub use placement::{AddArgs, DragArgs, MoveArgs, ReflowArgs, SetConfigArgs};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Owner used when none is given.
const DEFAULT_OWNER: &str = "default";

/// Widgetbox CLI - manage widget placements on a dashboard grid.
#[derive(Parser, Debug)]
#[command(name = "widgetbox")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding placement files. Overrides `storage.path`.
    #[arg(long, global = true, value_name = "DIR", env = "WIDGETBOX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Owner whose dashboard is used.
    #[arg(long, short, global = true, env = "WIDGETBOX_OWNER", default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Output in JSON format instead of tables.
    #[arg(long, short, global = true)]
    pub json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// List available widgets.
    Widgets,

    /// List size classes and their spans.
    Sizes,

    /// Show the owner's placements and a map of the grid.
    Show,

    /// Place a new widget.
    Add(AddArgs),

    /// Move and/or resize a placement.
    Move(MoveArgs),

    /// Move a placement by a pixel delta, as a drag gesture would.
    Drag(DragArgs),

    /// Apply a batch of positions atomically.
    Reflow(ReflowArgs),

    /// Remove a placement.
    Remove {
        /// Placement id (or a unique prefix).
        id: String,
    },

    /// Replace a placement's configuration payload.
    SetConfig(SetConfigArgs),

    /// Configuration file management commands.
    ///
    /// Initialize, view, and locate the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Can be redirected to a file for use with editors that support JSON
    /// Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(widgetbox completions --shell zsh)"
    ///   widgetbox completions --shell fish > ~/.config/fish/completions/widgetbox.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

/// Everything a placement command needs: configuration, the dashboard
/// service and the owner it acts for.
#[derive(Debug)]
pub struct Session {
    /// Loaded configuration.
    pub loaded: LoadedConfig,
    /// Dashboard over the on-disk store.
    pub dashboard: Dashboard<JsonFileStore>,
    /// Owner the command acts for.
    pub owner: OwnerId,
    /// JSON output requested.
    pub json: bool,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), WidgetboxError> {
        match &self.command {
            Commands::Widgets => catalog::list_widgets(&self.session()?),
            Commands::Sizes => catalog::list_sizes(&self.session()?),
            Commands::Show => placement::show(&self.session()?),
            Commands::Add(args) => placement::add(&self.session()?, args),
            Commands::Move(args) => placement::move_placement(&self.session()?, args),
            Commands::Drag(args) => placement::drag(&self.session()?, args),
            Commands::Reflow(args) => placement::reflow(&self.session()?, args),
            Commands::Remove { id } => placement::remove(&self.session()?, id),
            Commands::SetConfig(args) => placement::set_config(&self.session()?, args),
            Commands::Config(cmd) => config_cmd::execute(cmd, self.config.as_deref(), self.json),

            Commands::Schema => {
                println!("{}", schema::print_schema());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Loads configuration and opens the owner's dashboard.
    fn session(&self) -> Result<Session, WidgetboxError> {
        let loaded = config::load(self.config.as_deref())?;
        let owner = OwnerId::new(self.owner.as_str())?;
        let dir = self.data_dir.clone().unwrap_or_else(|| loaded.placements_dir());
        tracing::debug!(%owner, dir = %dir.display(), "cli: opening dashboard");

        let settings = &loaded.config;
        let catalog = settings.size_catalog();
        let registry = WidgetRegistry::with_system_widgets();
        for widget in registry.unresolved_sizes(&catalog) {
            tracing::warn!(
                widget = %widget.id,
                size = %widget.size,
                "cli: widget size class is not configured"
            );
        }

        let dashboard = Dashboard::new(
            JsonFileStore::new(dir),
            settings.bounds(),
            catalog,
            registry,
        )
        .with_drag_tuning(settings.drag);

        Ok(Session {
            loaded,
            dashboard,
            owner,
            json: self.json,
        })
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, APP_NAME, &mut io::stdout());
    }
}
