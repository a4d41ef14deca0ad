//! Drag session tracking: pointer deltas to grid cells.
//!
//! The front end reports a drag as a pixel delta from the point where the
//! pointer went down. A [`DragSession`] remembers the widget's rectangle at
//! drag start and turns any delta into a candidate cell position, so a
//! preview can be validated on every pointer move and the final position
//! submitted as a regular [`MoveRequest`] on release.
//!
//! # Flow
//!
//! 1. Pointer down on a widget: [`DragSession::start`]
//! 2. Pointer moves: [`DragSession::preview`] for feedback (never mutates)
//! 3. Pointer up: [`DragSession::finish`] yields the move request
//! 4. The caller runs the request through the single-move resolver

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::GridResult;
use super::geometry::{GridBounds, GridRect};
use super::placement::{Placement, PlacementId, PlacementSet};
use super::resolver::MoveRequest;
use super::validator;

/// Pixel-to-cell conversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DragTuning {
    /// Size of one grid cell in pixels.
    pub cell_size: f64,
    /// Keep the dragged rectangle on the grid while dragging.
    pub snap_to_grid: bool,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            snap_to_grid: true,
        }
    }
}

impl DragTuning {
    /// Converts a pixel delta to a whole number of cells.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn cells(&self, delta: f64) -> i32 {
        if self.cell_size <= 0.0 || !delta.is_finite() {
            return 0;
        }
        (delta / self.cell_size).round() as i32
    }
}

/// Live preview of a drag in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPreview {
    /// Where the widget would land.
    pub rect: GridRect,
    /// Whether dropping here would be accepted.
    pub result: GridResult<()>,
}

impl DragPreview {
    /// Returns `true` if the drop position is legal.
    #[must_use]
    pub const fn is_valid(&self) -> bool { self.result.is_ok() }
}

/// A widget drag from pointer down to pointer up.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    id: PlacementId,
    origin: GridRect,
    tuning: DragTuning,
}

impl DragSession {
    /// Starts dragging `placement`.
    #[must_use]
    pub const fn start(placement: &Placement, tuning: DragTuning) -> Self {
        Self {
            id: placement.id,
            origin: placement.rect,
            tuning,
        }
    }

    /// The placement being dragged.
    #[must_use]
    pub const fn id(&self) -> PlacementId { self.id }

    /// The rectangle at drag start.
    #[must_use]
    pub const fn origin(&self) -> GridRect { self.origin }

    /// Computes the rectangle under the pointer for a pixel delta.
    ///
    /// The span never changes. With snapping enabled the result is clamped
    /// onto the grid.
    #[must_use]
    pub fn target(&self, dx: f64, dy: f64, bounds: &GridBounds) -> GridRect {
        let moved = GridRect {
            x: self.origin.x.saturating_add(self.tuning.cells(dx)),
            y: self.origin.y.saturating_add(self.tuning.cells(dy)),
            ..self.origin
        };

        if self.tuning.snap_to_grid {
            bounds.clamp(&moved)
        } else {
            moved
        }
    }

    /// Validates the current drop position without touching the set.
    #[must_use]
    pub fn preview(
        &self,
        dx: f64,
        dy: f64,
        set: &PlacementSet,
        bounds: &GridBounds,
    ) -> DragPreview {
        let rect = self.target(dx, dy, bounds);
        DragPreview {
            rect,
            result: validator::validate(&rect, set, Some(self.id), bounds),
        }
    }

    /// Ends the drag and returns the move request for the drop position.
    #[must_use]
    pub fn finish(self, dx: f64, dy: f64, bounds: &GridBounds) -> MoveRequest {
        let rect = self.target(dx, dy, bounds);
        MoveRequest::move_to(rect.x, rect.y)
    }
}
