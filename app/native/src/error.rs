//! Error types for Widgetbox.
//!
//! Library subsystems have their own typed errors (`GridError`,
//! `StoreError`, `DashboardError`, `ConfigError`). [`WidgetboxError`] is the
//! flattened form returned by the command-line front end.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::dashboard::DashboardError;
use crate::grid::GridError;
use crate::store::StoreError;

/// Errors that can occur during application execution.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum WidgetboxError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// The placement engine rejected a request.
    #[error("Placement error: {0}")]
    PlacementError(String),
    /// Placement storage failed.
    #[error("Storage error: {0}")]
    StorageError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for WidgetboxError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for WidgetboxError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<String> for WidgetboxError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for WidgetboxError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}

impl From<ConfigError> for WidgetboxError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<GridError> for WidgetboxError {
    fn from(err: GridError) -> Self {
        if err.is_invalid_request() {
            Self::InvalidArguments(err.to_string())
        } else {
            Self::PlacementError(err.to_string())
        }
    }
}

impl From<StoreError> for WidgetboxError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidOwner(_) => Self::InvalidArguments(err.to_string()),
            other => Self::StorageError(other.to_string()),
        }
    }
}

impl From<DashboardError> for WidgetboxError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Grid(err) => err.into(),
            DashboardError::Storage(err) => err.into(),
            DashboardError::UnknownWidget(_) => Self::InvalidArguments(err.to_string()),
            DashboardError::GridFull { .. } => Self::PlacementError(err.to_string()),
        }
    }
}
