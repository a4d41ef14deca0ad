//! Placement storage configuration.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::paths;

/// Where placement files are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    /// Directory holding one `<owner>.json` file per owner.
    ///
    /// Supports `~`. Relative paths are resolved against the directory of
    /// the configuration file.
    /// Default: the platform data directory, e.g. `~/.local/share/widgetbox/placements`
    pub path: String,
}

impl StorageConfig {
    /// Resolves the placement directory.
    ///
    /// `config_dir` is the directory of the loaded configuration file, if any.
    #[must_use]
    pub fn placements_dir(&self, config_dir: Option<&Path>) -> PathBuf {
        if self.path.trim().is_empty() {
            return paths::default_placements_dir();
        }

        match config_dir {
            Some(base) => paths::expand_and_resolve(&self.path, base),
            None => paths::expand(&self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_uses_default() {
        let storage = StorageConfig::default();
        assert_eq!(storage.placements_dir(None), paths::default_placements_dir());
    }

    #[test]
    fn test_relative_path_resolves_against_config_dir() {
        let storage = StorageConfig {
            path: "data".to_string(),
        };
        assert_eq!(
            storage.placements_dir(Some(Path::new("/etc/widgetbox"))),
            PathBuf::from("/etc/widgetbox/data")
        );
        assert_eq!(storage.placements_dir(None), PathBuf::from("data"));
    }
}
