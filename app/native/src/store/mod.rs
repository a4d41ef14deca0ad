//! Persistence collaborators for placement sets.
//!
//! A [`PlacementStore`] loads and saves the complete placement set of one
//! owner. Stores do not lock: making load-validate-save a critical section
//! per owner is the responsibility of [`crate::dashboard::Dashboard`].
//!
//! # Implementations
//!
//! - [`MemoryStore`]: concurrent in-process map, used by tests and demos
//! - [`JsonFileStore`]: one JSON document per owner, written atomically

mod file;
mod memory;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::PlacementSet;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by persistence collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The owner id cannot be used as a storage key.
    #[error("Invalid owner id '{0}'")]
    InvalidOwner(String),

    /// Reading or writing the backing storage failed.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// File or directory that was being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Stored data could not be encoded or decoded.
    #[error("Invalid placement data for '{owner}': {source}")]
    Serialization {
        /// Owner whose data was affected.
        owner: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Identifier of the user owning a placement set.
///
/// Owner ids double as file names, so they are restricted to ASCII
/// letters, digits, `-`, `_` and `.`, and may not start with `.`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

/// Longest accepted owner id.
const MAX_OWNER_LEN: usize = 128;

impl OwnerId {
    /// Validates and wraps an owner id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOwner` if the id is empty, too long, starts with `.`,
    /// or contains characters other than ASCII alphanumerics, `-`, `_`, `.`.
    pub fn new(id: impl Into<String>) -> StoreResult<Self> {
        let id = id.into();
        let valid = !id.is_empty()
            && id.len() <= MAX_OWNER_LEN
            && !id.starts_with('.')
            && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if valid { Ok(Self(id)) } else { Err(StoreError::InvalidOwner(id)) }
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for OwnerId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::new(s) }
}

impl TryFrom<String> for OwnerId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<OwnerId> for String {
    fn from(owner: OwnerId) -> Self { owner.0 }
}

/// Loads and saves whole placement sets, one owner at a time.
pub trait PlacementStore: Send + Sync {
    /// Loads the owner's placement set. An owner without data has an empty set.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage cannot be read.
    fn load(&self, owner: &OwnerId) -> StoreResult<PlacementSet>;

    /// Replaces the owner's placement set.
    ///
    /// Implementations must either write the whole set or leave the previous
    /// one in place.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the set cannot be written.
    fn save(&self, owner: &OwnerId, set: &PlacementSet) -> StoreResult<()>;
}

impl<T: PlacementStore + ?Sized> PlacementStore for std::sync::Arc<T> {
    fn load(&self, owner: &OwnerId) -> StoreResult<PlacementSet> { (**self).load(owner) }

    fn save(&self, owner: &OwnerId, set: &PlacementSet) -> StoreResult<()> {
        (**self).save(owner, set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_id_accepts_safe_names() {
        assert_eq!(OwnerId::new("alice").unwrap().as_str(), "alice");
        assert!(OwnerId::new("user-42_b.c").is_ok());
    }

    #[test]
    fn test_owner_id_rejects_unsafe_names() {
        for bad in ["", ".hidden", "../etc", "a/b", "with space", &"x".repeat(200)] {
            assert!(
                matches!(OwnerId::new(bad), Err(StoreError::InvalidOwner(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_owner_id_serde_validates() {
        let owner: OwnerId = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(owner.to_string(), "bob");
        assert!(serde_json::from_str::<OwnerId>("\"../bob\"").is_err());
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::io("/tmp/x.json", std::io::Error::other("disk full"));
        assert!(err.to_string().contains("/tmp/x.json"));
        assert!(err.to_string().contains("disk full"));
    }
}
