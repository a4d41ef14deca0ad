//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r##"// Widgetbox Configuration File
// ============================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.
//
// Run `widgetbox schema` to get the JSON Schema of this file.

{
  // ============================================================================
  // Grid
  // ============================================================================
  // "grid": {
  //   // Number of columns (1-64)
  //   "columns": 5,
  //
  //   // Number of rows (1-64)
  //   "rows": 5
  // },

  // ============================================================================
  // Size Classes
  // ============================================================================
  // Built-in classes: small (1x1), medium (2x2), large (3x2).
  // Entries here are added to them; an entry with a built-in name replaces it.
  // "sizes": {
  //   "wide": { "w": 4, "h": 1 },
  //   "tall": { "w": 1, "h": 3 }
  // },

  // ============================================================================
  // Storage
  // ============================================================================
  // "storage": {
  //   // Directory for placement files (one <owner>.json per owner).
  //   // Supports ~. Relative paths are resolved against this file's directory.
  //   // Empty = platform data directory, e.g. ~/.local/share/widgetbox/placements
  //   "path": ""
  // },

  // ============================================================================
  // Drag
  // ============================================================================
  // "drag": {
  //   // Size of one grid cell in pixels
  //   "cellSize": 100,
  //
  //   // Keep the dragged widget on the grid while dragging
  //   "snapToGrid": true
  // }
}
"##
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetboxConfig;

    #[test]
    fn test_template_parses_to_defaults() {
        let template = generate_config_template();
        let reader = json_comments::StripComments::new(template.as_bytes());
        let config: WidgetboxConfig = serde_json::from_reader(reader).unwrap();
        assert_eq!(config, WidgetboxConfig::default());
    }

    #[test]
    fn test_template_contains_all_sections() {
        let template = generate_config_template();
        for section in ["\"grid\"", "\"sizes\"", "\"storage\"", "\"drag\""] {
            assert!(template.contains(section), "missing {section}");
        }
    }

    #[test]
    fn test_create_config_file_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.jsonc");
        create_config_file(&path).unwrap();
        assert!(path.exists());
    }
}
