//! Configuration types for Widgetbox.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod grid;
pub mod root;
pub mod storage;

pub use grid::{GridConfig, SizesConfig};
pub use root::{ConfigError, WidgetboxConfig, config_paths, load_config, load_config_from_path};
pub use storage::StorageConfig;
