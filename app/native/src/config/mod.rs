//! Configuration module for Widgetbox.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//!
//! Configuration is loaded once per process by the entry point and passed
//! down explicitly; nothing in the library reads it from global state.

pub mod template;
pub mod types;

use std::path::{Path, PathBuf};

pub use types::{
    ConfigError, GridConfig, SizesConfig, StorageConfig, WidgetboxConfig, config_paths,
    load_config as load_config_default, load_config_from_path,
};

/// A configuration together with the file it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: WidgetboxConfig,
    /// Source file, or `None` when running on defaults.
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory holding placement files.
    #[must_use]
    pub fn placements_dir(&self) -> PathBuf {
        let base = self.path.as_deref().and_then(Path::parent);
        self.config.storage.placements_dir(base)
    }
}

/// Loads the configuration.
///
/// With `custom_path` the file must exist. Otherwise the search paths are
/// tried in order and a missing file means defaults.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a file was found (or required) but could not
/// be read, parsed or validated.
pub fn load(custom_path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let result = custom_path.map_or_else(load_config_default, load_config_from_path);

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "config: loaded");
            Ok(LoadedConfig {
                config,
                path: Some(path),
            })
        }
        Err(ConfigError::NotFound) if custom_path.is_none() => {
            tracing::debug!("config: no configuration file, using defaults");
            Ok(LoadedConfig::default())
        }
        Err(err) => {
            tracing::warn!(error = %err, "config: failed to load configuration");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::grid::GridBounds;

    #[test]
    fn test_load_custom_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("widgetbox.jsonc");
        fs::write(&path, r#"{ "grid": { "columns": 6 }, "storage": { "path": "data" } }"#).unwrap();

        let loaded = load(Some(&path)).unwrap();
        assert_eq!(loaded.config.bounds(), GridBounds::new(6, 5));
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.placements_dir(), dir.path().join("data"));
    }

    #[test]
    fn test_missing_custom_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load(Some(&dir.path().join("nope.jsonc")));
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_invalid_custom_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "grid": { "rows": 0 } }"#).unwrap();
        assert!(matches!(load(Some(&path)), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_defaults_use_default_placements_dir() {
        let loaded = LoadedConfig::default();
        assert_eq!(loaded.placements_dir(), crate::paths::default_placements_dir());
    }
}
