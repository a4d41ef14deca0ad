//! Application-wide constants.

/// Application name, used for config and data directories.
pub const APP_NAME: &str = "widgetbox";

/// Default number of grid columns.
pub const DEFAULT_GRID_COLUMNS: i32 = 5;

/// Default number of grid rows.
pub const DEFAULT_GRID_ROWS: i32 = 5;

/// Largest grid dimension accepted from configuration.
pub const MAX_GRID_DIMENSION: i32 = 64;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "WIDGETBOX_LOG";

/// Subdirectory of the data directory holding placement files.
pub const PLACEMENTS_DIR: &str = "placements";
