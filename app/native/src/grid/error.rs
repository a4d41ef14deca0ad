//! Error types for the placement engine.
//!
//! Every rejected operation is reported as a [`GridError`]; nothing in the
//! engine panics on bad input and nothing is retried. The set an operation
//! was applied to is guaranteed to be unchanged whenever an error is
//! returned.
//!
//! # Error Categories
//!
//! - **Geometry**: `OutOfBounds`, `Overlap`
//! - **Lookup**: `NotFound`, `UnknownSize`
//! - **Input**: `MalformedProposal`

use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;

use super::geometry::GridRect;
use super::placement::PlacementId;

/// Result type alias for placement engine operations.
pub type GridResult<T> = Result<T, GridError>;

/// Ids involved in a collision. One for single moves, two for batch conflicts.
pub type ConflictIds = SmallVec<[PlacementId; 2]>;

/// Errors returned by the placement engine.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GridError {
    /// The candidate rectangle leaves the grid or has an empty span.
    #[error("Rectangle {rect} is outside the grid")]
    OutOfBounds {
        /// The rejected rectangle.
        rect: GridRect,
        /// The placement the rectangle was proposed for, when known.
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<PlacementId>,
    },

    /// The candidate rectangle collides with other placements.
    ///
    /// For a single move `ids` holds the first conflicting placement in
    /// storage order. For a batch it holds both sides of the conflict.
    #[error("Rectangle overlaps placement(s) {}", display_ids(.ids))]
    Overlap {
        /// Conflicting placement ids.
        ids: ConflictIds,
    },

    /// No placement with the given id exists in the owner's set.
    #[error("Placement {id} not found")]
    NotFound {
        /// The missing id.
        id: PlacementId,
    },

    /// The size class is not registered in the size catalog.
    #[error("Unknown size '{name}'")]
    UnknownSize {
        /// The requested size name.
        name: String,
    },

    /// A batch entry is missing required fields or references an unknown id.
    #[error("Malformed proposal at index {index}: {reason}")]
    MalformedProposal {
        /// Position of the entry in the submitted batch.
        index: usize,
        /// What is wrong with the entry.
        reason: String,
    },
}

fn display_ids(ids: &ConflictIds) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl GridError {
    /// Creates an out-of-bounds error for an anonymous rectangle.
    #[must_use]
    pub const fn out_of_bounds(rect: GridRect) -> Self { Self::OutOfBounds { rect, id: None } }

    /// Creates an overlap error with a single conflicting id.
    #[must_use]
    pub fn overlap(id: PlacementId) -> Self {
        let mut ids = ConflictIds::new();
        ids.push(id);
        Self::Overlap { ids }
    }

    /// Creates an overlap error between two placements.
    #[must_use]
    pub fn overlap_pair(first: PlacementId, second: PlacementId) -> Self {
        let mut ids = ConflictIds::new();
        ids.push(first);
        ids.push(second);
        Self::Overlap { ids }
    }

    /// Creates a malformed proposal error.
    #[must_use]
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedProposal {
            index,
            reason: reason.into(),
        }
    }

    /// Returns `true` if the request collided with the grid or other widgets.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::Overlap { .. })
    }

    /// Returns `true` if a referenced placement or size does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::UnknownSize { .. })
    }

    /// Returns `true` if the request itself was malformed.
    #[must_use]
    pub const fn is_invalid_request(&self) -> bool {
        matches!(self, Self::MalformedProposal { .. })
    }

    /// Returns the conflicting ids of an overlap error.
    #[must_use]
    pub fn conflicting_ids(&self) -> &[PlacementId] {
        match self {
            Self::Overlap { ids } => ids,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let rect = GridRect::new(4, 0, 2, 1);
        assert_eq!(
            GridError::out_of_bounds(rect).to_string(),
            "Rectangle (4, 0) 2x1 is outside the grid"
        );
        assert_eq!(
            GridError::UnknownSize { name: "huge".into() }.to_string(),
            "Unknown size 'huge'"
        );
        assert_eq!(
            GridError::malformed(2, "missing 'x'").to_string(),
            "Malformed proposal at index 2: missing 'x'"
        );
    }

    #[test]
    fn test_overlap_lists_ids() {
        let a = PlacementId::new();
        let b = PlacementId::new();
        let msg = GridError::overlap_pair(a, b).to_string();
        assert!(msg.contains(&a.to_string()));
        assert!(msg.contains(&b.to_string()));
        assert_eq!(GridError::overlap(a).conflicting_ids(), &[a]);
    }

    #[test]
    fn test_error_predicates() {
        let id = PlacementId::new();
        assert!(GridError::overlap(id).is_conflict());
        assert!(GridError::out_of_bounds(GridRect::default()).is_conflict());
        assert!(GridError::NotFound { id }.is_not_found());
        assert!(GridError::UnknownSize { name: "x".into() }.is_not_found());
        assert!(GridError::malformed(0, "x").is_invalid_request());
        assert!(!GridError::NotFound { id }.is_conflict());
        assert!(GridError::NotFound { id }.conflicting_ids().is_empty());
    }

    #[test]
    fn test_error_serializes_with_kind() {
        let json = serde_json::to_string(&GridError::UnknownSize { name: "huge".into() }).unwrap();
        assert!(json.contains("\"kind\":\"unknownSize\""));
        assert!(json.contains("huge"));
    }
}
