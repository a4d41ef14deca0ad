//! Grid and size class configuration types.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, MAX_GRID_DIMENSION};
use crate::grid::sizes::DEFAULT_SIZES;
use crate::grid::{GridBounds, SizeCatalog, Span};

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Number of columns.
    /// Default: 5
    pub columns: i32,

    /// Number of rows.
    /// Default: 5
    pub rows: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            rows: DEFAULT_GRID_ROWS,
        }
    }
}

impl GridConfig {
    /// Returns the configured bounds.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds { GridBounds::new(self.columns, self.rows) }

    /// Checks both dimensions are within `1..=MAX_GRID_DIMENSION`.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid dimension.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("columns", self.columns), ("rows", self.rows)] {
            if !(1..=MAX_GRID_DIMENSION).contains(&value) {
                return Err(format!(
                    "grid.{name} must be between 1 and {MAX_GRID_DIMENSION}, got {value}"
                ));
            }
        }
        Ok(())
    }
}

/// Size classes declared in the config file, merged over the built-in ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SizesConfig(pub BTreeMap<String, Span>);

impl SizesConfig {
    /// Builds the size catalog: built-in classes first, then configured ones.
    ///
    /// A configured class with the same (case-insensitive) name as a built-in
    /// one replaces it.
    #[must_use]
    pub fn catalog(&self) -> SizeCatalog {
        let builtin = DEFAULT_SIZES.iter().map(|(name, span)| ((*name).to_string(), *span));
        let custom = self.0.iter().map(|(name, span)| (name.clone(), *span));
        SizeCatalog::new(builtin.chain(custom))
    }

    /// Checks every configured span is at least 1×1 and fits in `grid`.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid size class.
    pub fn validate(&self, grid: &GridConfig) -> Result<(), String> {
        for (name, span) in &self.0 {
            if name.trim().is_empty() {
                return Err("sizes: size class names must not be empty".to_string());
            }
            if !span.is_valid() {
                return Err(format!("sizes.{name} must be at least 1x1, got {span}"));
            }
            if span.w > grid.columns || span.h > grid.rows {
                return Err(format!(
                    "sizes.{name} ({span}) does not fit a {}x{} grid",
                    grid.columns, grid.rows
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_config_default() {
        let grid = GridConfig::default();
        assert_eq!(grid.bounds(), GridBounds::new(5, 5));
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_grid_config_rejects_zero_and_huge() {
        assert!(GridConfig { columns: 0, rows: 5 }.validate().is_err());
        assert!(GridConfig { columns: 5, rows: -1 }.validate().is_err());
        assert!(GridConfig { columns: 5, rows: 65 }.validate().is_err());
    }

    #[test]
    fn test_sizes_merge_over_builtin() {
        let sizes: SizesConfig = serde_json::from_str(
            r#"{ "Medium": { "w": 2, "h": 1 }, "wide": { "w": 4, "h": 1 } }"#,
        )
        .unwrap();
        let catalog = sizes.catalog();

        assert_eq!(catalog.resolve("small").unwrap(), Span::new(1, 1));
        assert_eq!(catalog.resolve("medium").unwrap(), Span::new(2, 1));
        assert_eq!(catalog.resolve("wide").unwrap(), Span::new(4, 1));
    }

    #[test]
    fn test_sizes_validate() {
        let grid = GridConfig::default();
        let zero = SizesConfig(BTreeMap::from([("flat".to_string(), Span::new(2, 0))]));
        assert!(zero.validate(&grid).is_err());

        let huge = SizesConfig(BTreeMap::from([("huge".to_string(), Span::new(6, 1))]));
        assert!(huge.validate(&grid).is_err());

        let ok = SizesConfig(BTreeMap::from([("wide".to_string(), Span::new(5, 1))]));
        assert!(ok.validate(&grid).is_ok());
    }
}
