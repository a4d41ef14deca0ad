//! Root configuration type, file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::grid::{GridConfig, SizesConfig};
use super::storage::StorageConfig;
use crate::constants::APP_NAME;
use crate::grid::{DragTuning, GridBounds, SizeCatalog};

/// Root configuration structure for Widgetbox.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WidgetboxConfig {
    /// Grid dimensions.
    ///
    /// Example:
    /// ```json
    /// { "grid": { "columns": 6, "rows": 4 } }
    /// ```
    pub grid: GridConfig,

    /// Additional or overridden size classes, keyed by name.
    ///
    /// The built-in classes are `small` (1x1), `medium` (2x2) and `large` (3x2).
    ///
    /// Example:
    /// ```json
    /// { "sizes": { "wide": { "w": 4, "h": 1 } } }
    /// ```
    pub sizes: SizesConfig,

    /// Placement storage settings.
    pub storage: StorageConfig,

    /// Pixel-to-cell conversion for drag gestures.
    pub drag: DragTuning,
}

impl WidgetboxConfig {
    /// Returns the grid bounds.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds { self.grid.bounds() }

    /// Returns the size catalog.
    #[must_use]
    pub fn size_catalog(&self) -> SizeCatalog { self.sizes.catalog() }

    /// Validates values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate().map_err(ConfigError::Invalid)?;
        self.sizes.validate(&self.grid).map_err(ConfigError::Invalid)?;

        if !(self.drag.cell_size.is_finite() && self.drag.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "drag.cellSize must be a positive number, got {}",
                self.drag.cell_size
            )));
        }
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
    /// The configuration parsed but holds unusable values.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/{APP_NAME}/config.jsonc \
                or ~/.{APP_NAME}.jsonc"
            ),
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
            Self::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::ParseError(err) => Some(err),
            Self::NotFound | Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/widgetbox/config.jsonc` or `config.json`, if set
/// 2. `~/.config/widgetbox/config.jsonc` or `config.json`
/// 3. The platform config directory (`~/Library/Application Support` on macOS)
/// 4. `~/.widgetbox.jsonc` or `~/.widgetbox.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut push_dir = |dir: PathBuf| {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    };

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        push_dir(PathBuf::from(xdg_config).join(APP_NAME));
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(home.join(".config").join(APP_NAME));
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(config_dir.join(APP_NAME));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{APP_NAME}.jsonc")));
        paths.push(home.join(format!(".{APP_NAME}.json")));
    }

    paths
}

/// Loads the configuration from the first existing config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists, or the
/// errors of [`load_config_from_path`] for the file that was found.
pub fn load_config() -> Result<(WidgetboxConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}

/// Loads and validates the configuration at `path`.
///
/// Comments (`//` and `/* */`) are stripped before parsing.
///
/// # Errors
///
/// Returns `NotFound` if the file is missing, `IoError` if it cannot be
/// read, `ParseError` for invalid JSON and `Invalid` for bad values.
pub fn load_config_from_path(path: &Path) -> Result<(WidgetboxConfig, PathBuf), ConfigError> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(ConfigError::NotFound),
        Err(err) => return Err(err.into()),
    };

    let reader = json_comments::StripComments::new(file);
    let config: WidgetboxConfig = serde_json::from_reader(reader)?;
    config.validate()?;

    Ok((config, path.to_path_buf()))
}
