//! Placement records and the per-owner placement set.
//!
//! A [`PlacementSet`] is the complete collection of widget rectangles that
//! belong to one owner. It is the unit the engine validates against and the
//! unit the persistence layer loads and saves. Placements keep insertion
//! order so that conflict reporting is deterministic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{GridError, GridResult};
use super::geometry::{GridBounds, GridRect};

// ============================================================================
// Identifiers
// ============================================================================

/// Stable identifier of a placed widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(Uuid);

impl PlacementId {
    /// Creates a new time-ordered id.
    #[must_use]
    pub fn new() -> Self { Self(Uuid::now_v7()) }
}

impl Default for PlacementId {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl FromStr for PlacementId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Uuid::parse_str(s.trim()).map(Self) }
}

// ============================================================================
// Placement
// ============================================================================

/// A widget instance placed on an owner's grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Stable id, unique within the owner's set.
    pub id: PlacementId,
    /// Registry id of the widget kind (e.g. `system.time.simple`).
    pub widget_id: String,
    /// Position and span on the grid.
    #[serde(flatten)]
    pub rect: GridRect,
    /// Widget-defined settings. Never inspected by the engine.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub config: serde_json::Value,
}

impl Placement {
    /// Creates a placement with a fresh id and an empty config.
    #[must_use]
    pub fn new(widget_id: impl Into<String>, rect: GridRect) -> Self {
        Self {
            id: PlacementId::new(),
            widget_id: widget_id.into(),
            rect,
            config: serde_json::Value::Null,
        }
    }

    /// Replaces the config payload.
    #[must_use]
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }
}

// ============================================================================
// PlacementSet
// ============================================================================

/// All placements belonging to one owner, in storage order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementSet {
    placements: Vec<Placement>,
}

impl PlacementSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self { Self { placements: Vec::new() } }

    /// Builds a set from already-placed records without validating them.
    ///
    /// Use [`Self::check_invariants`] when the records come from an
    /// untrusted source.
    #[must_use]
    pub const fn from_placements(placements: Vec<Placement>) -> Self { Self { placements } }

    /// Number of placements.
    #[must_use]
    pub fn len(&self) -> usize { self.placements.len() }

    /// Returns `true` if the set holds no placements.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.placements.is_empty() }

    /// Iterates placements in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Placement> { self.placements.iter() }

    /// Returns the placements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Placement] { &self.placements }

    /// Looks up a placement by id.
    #[must_use]
    pub fn get(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Returns the storage index of a placement.
    #[must_use]
    pub fn position(&self, id: PlacementId) -> Option<usize> {
        self.placements.iter().position(|p| p.id == id)
    }

    /// Returns `true` if a placement with this id exists.
    #[must_use]
    pub fn contains(&self, id: PlacementId) -> bool { self.position(id).is_some() }

    /// Validates `placement.rect` and appends it to the set.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` or `Overlap` if the rectangle cannot be placed.
    /// The set is unchanged on error.
    pub fn insert(&mut self, placement: Placement, bounds: &GridBounds) -> GridResult<&Placement> {
        let id = placement.id;
        super::validator::validate(&placement.rect, self, None, bounds).map_err(|err| match err {
            GridError::OutOfBounds { rect, .. } => GridError::OutOfBounds { rect, id: Some(id) },
            other => other,
        })?;

        self.placements.push(placement);
        let last = self.placements.len() - 1;
        Ok(&self.placements[last])
    }

    /// Removes a placement and returns it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no placement has this id.
    pub fn remove(&mut self, id: PlacementId) -> GridResult<Placement> {
        let index = self.position(id).ok_or(GridError::NotFound { id })?;
        Ok(self.placements.remove(index))
    }

    /// Replaces the opaque config payload of a placement.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no placement has this id.
    pub fn set_config(
        &mut self,
        id: PlacementId,
        config: serde_json::Value,
    ) -> GridResult<&Placement> {
        let index = self.position(id).ok_or(GridError::NotFound { id })?;
        self.placements[index].config = config;
        Ok(&self.placements[index])
    }

    /// Overwrites the rectangle at `index`. Callers validate first.
    pub(super) fn set_rect(&mut self, index: usize, rect: GridRect) {
        self.placements[index].rect = rect;
    }

    /// Verifies the global invariants: every rectangle is in bounds, no two
    /// rectangles overlap, and ids are unique.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, scanning in storage order.
    pub fn check_invariants(&self, bounds: &GridBounds) -> GridResult<()> {
        for (i, placement) in self.placements.iter().enumerate() {
            if !bounds.contains(&placement.rect) {
                return Err(GridError::OutOfBounds {
                    rect: placement.rect,
                    id: Some(placement.id),
                });
            }

            for other in &self.placements[i + 1..] {
                if other.id == placement.id {
                    return Err(GridError::malformed(i, format!("duplicate id {}", placement.id)));
                }
                if placement.rect.overlaps(&other.rect) {
                    return Err(GridError::overlap_pair(placement.id, other.id));
                }
            }
        }
        Ok(())
    }

    /// Number of grid cells not covered by any placement.
    #[must_use]
    pub fn free_cells(&self, bounds: &GridBounds) -> i64 {
        let covered = (0..bounds.rows.max(0))
            .flat_map(|row| (0..bounds.columns.max(0)).map(move |col| (col, row)))
            .filter(|&(col, row)| self.placements.iter().any(|p| p.rect.contains_cell(col, row)))
            .count();
        bounds.cell_count() - i64::try_from(covered).unwrap_or(i64::MAX)
    }
}

impl<'a> IntoIterator for &'a PlacementSet {
    type IntoIter = std::slice::Iter<'a, Placement>;
    type Item = &'a Placement;

    fn into_iter(self) -> Self::IntoIter { self.placements.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridBounds { GridBounds::new(5, 5) }

    #[test]
    fn test_insert_keeps_storage_order() {
        let mut set = PlacementSet::new();
        let a = set.insert(Placement::new("a", GridRect::new(0, 0, 1, 1)), &grid()).unwrap().id;
        let b = set.insert(Placement::new("b", GridRect::new(1, 0, 1, 1)), &grid()).unwrap().id;

        let ids: Vec<_> = set.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(set.position(b), Some(1));
    }

    #[test]
    fn test_insert_rejects_overlap_without_mutating() {
        let mut set = PlacementSet::new();
        let a = set.insert(Placement::new("a", GridRect::new(0, 0, 2, 2)), &grid()).unwrap().id;

        let err = set.insert(Placement::new("b", GridRect::new(1, 1, 1, 1)), &grid()).unwrap_err();
        assert_eq!(err, GridError::overlap(a));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_out_of_bounds_names_placement() {
        let mut set = PlacementSet::new();
        let placement = Placement::new("a", GridRect::new(4, 4, 2, 1));
        let id = placement.id;

        let err = set.insert(placement, &grid()).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { id: Some(found), .. } if found == id));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_and_not_found() {
        let mut set = PlacementSet::new();
        let id = set.insert(Placement::new("a", GridRect::new(0, 0, 1, 1)), &grid()).unwrap().id;

        assert_eq!(set.remove(id).unwrap().widget_id, "a");
        assert_eq!(set.remove(id).unwrap_err(), GridError::NotFound { id });
    }

    #[test]
    fn test_set_config_leaves_geometry() {
        let mut set = PlacementSet::new();
        let id = set.insert(Placement::new("a", GridRect::new(2, 2, 1, 1)), &grid()).unwrap().id;

        let updated = set.set_config(id, serde_json::json!({ "city": "London" })).unwrap();
        assert_eq!(updated.rect, GridRect::new(2, 2, 1, 1));
        assert_eq!(updated.config["city"], "London");
    }

    #[test]
    fn test_check_invariants_reports_overlap() {
        let a = Placement::new("a", GridRect::new(0, 0, 2, 2));
        let b = Placement::new("b", GridRect::new(1, 1, 2, 2));
        let (a_id, b_id) = (a.id, b.id);
        let set = PlacementSet::from_placements(vec![a, b]);

        assert_eq!(set.check_invariants(&grid()).unwrap_err(), GridError::overlap_pair(a_id, b_id));
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let mut placement = Placement::new("system.time.simple", GridRect::new(1, 2, 1, 1));
        placement.id = "0190f0a8-0000-7000-8000-000000000001".parse().unwrap();
        let json = serde_json::to_value(&placement).unwrap();

        assert_eq!(json["widgetId"], "system.time.simple");
        assert_eq!(json["x"], 1);
        assert_eq!(json["y"], 2);
        assert_eq!(json["w"], 1);
        assert!(json.get("config").is_none());

        let back: Placement = serde_json::from_value(json).unwrap();
        assert_eq!(back, placement);
    }

    #[test]
    fn test_free_cells() {
        let mut set = PlacementSet::new();
        set.insert(Placement::new("a", GridRect::new(0, 0, 2, 2)), &grid()).unwrap();
        assert_eq!(set.free_cells(&grid()), 21);
    }

    #[test]
    fn test_free_cells_counts_only_grid_cells_once() {
        let set = PlacementSet::from_placements(vec![
            Placement::new("a", GridRect::new(0, 0, 2, 2)),
            Placement::new("b", GridRect::new(1, 1, 2, 2)),
            Placement::new("c", GridRect::new(4, 4, i32::MAX, i32::MAX)),
        ]);
        assert_eq!(set.free_cells(&grid()), 25 - 7 - 1);
    }
}
