//! Cell geometry for the placement grid.
//!
//! Rectangles are expressed in whole grid cells with half-open ranges:
//! a rectangle covers columns `[x, x + w)` and rows `[y, y + h)`. Two
//! rectangles that merely share an edge do not overlap.
//!
//! Coordinates are signed so that out-of-range caller input (for example a
//! negative column coming from a drag delta) can be represented and then
//! rejected by [`GridBounds::contains`] instead of being silently wrapped.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS};

// ============================================================================
// Span
// ============================================================================

/// A width/height pair measured in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Span {
    /// Width in cells.
    pub w: i32,
    /// Height in cells.
    pub h: i32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(w: i32, h: i32) -> Self { Self { w, h } }

    /// Returns whether both dimensions are at least one cell.
    #[must_use]
    pub const fn is_valid(&self) -> bool { self.w >= 1 && self.h >= 1 }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

// ============================================================================
// GridRect
// ============================================================================

/// A widget rectangle on the grid, in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    /// Column of the top-left cell.
    pub x: i32,
    /// Row of the top-left cell.
    pub y: i32,
    /// Width in cells.
    pub w: i32,
    /// Height in cells.
    pub h: i32,
}

impl GridRect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self { Self { x, y, w, h } }

    /// Creates a rectangle at `(x, y)` with the given span.
    #[must_use]
    pub const fn at(x: i32, y: i32, span: Span) -> Self { Self::new(x, y, span.w, span.h) }

    /// Returns the span of the rectangle.
    #[must_use]
    pub const fn span(&self) -> Span { Span::new(self.w, self.h) }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> i32 { self.x.saturating_add(self.w) }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 { self.y.saturating_add(self.h) }

    /// Returns whether the two rectangles share at least one cell.
    ///
    /// Touching edges (`a.x + a.w == b.x`) are not an overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns whether the cell `(col, row)` is covered by this rectangle.
    #[must_use]
    pub const fn contains_cell(&self, col: i32, row: i32) -> bool {
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }
}

impl std::fmt::Display for GridRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.w, self.h)
    }
}

// ============================================================================
// GridBounds
// ============================================================================

/// The fixed extent of the dashboard grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Number of columns.
    pub columns: i32,
    /// Number of rows.
    pub rows: i32,
}

impl GridBounds {
    /// Creates new grid bounds.
    #[must_use]
    pub const fn new(columns: i32, rows: i32) -> Self { Self { columns, rows } }

    /// Returns whether `rect` has a positive span and lies fully inside the grid.
    #[must_use]
    pub const fn contains(&self, rect: &GridRect) -> bool {
        rect.w >= 1
            && rect.h >= 1
            && rect.x >= 0
            && rect.y >= 0
            && rect.right() <= self.columns
            && rect.bottom() <= self.rows
    }

    /// Moves `rect` onto the grid without changing its span.
    ///
    /// `x` is pulled into `[0, columns - w]` and `y` into `[0, rows - h]`.
    /// A span wider or taller than the grid is pinned to the origin on that
    /// axis; the result is then still out of bounds and fails validation.
    #[must_use]
    pub fn clamp(&self, rect: &GridRect) -> GridRect {
        let max_x = self.columns.saturating_sub(rect.w).max(0);
        let max_y = self.rows.saturating_sub(rect.h).max(0);
        GridRect {
            x: rect.x.clamp(0, max_x),
            y: rect.y.clamp(0, max_y),
            ..*rect
        }
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> i64 { self.columns as i64 * self.rows as i64 }
}

impl Default for GridBounds {
    fn default() -> Self { Self::new(DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridBounds { GridBounds::new(5, 5) }

    #[test]
    fn test_contains_accepts_full_grid() {
        assert!(grid().contains(&GridRect::new(0, 0, 5, 5)));
        assert!(grid().contains(&GridRect::new(4, 4, 1, 1)));
    }

    #[test]
    fn test_contains_rejects_overhang_and_negatives() {
        assert!(!grid().contains(&GridRect::new(4, 0, 2, 1)));
        assert!(!grid().contains(&GridRect::new(0, 4, 1, 2)));
        assert!(!grid().contains(&GridRect::new(-1, 0, 1, 1)));
        assert!(!grid().contains(&GridRect::new(0, -1, 1, 1)));
    }

    #[test]
    fn test_contains_rejects_empty_span() {
        assert!(!grid().contains(&GridRect::new(0, 0, 0, 1)));
        assert!(!grid().contains(&GridRect::new(0, 0, 1, 0)));
    }

    #[test]
    fn test_overlaps_detects_shared_cells() {
        let a = GridRect::new(0, 0, 2, 2);
        assert!(a.overlaps(&GridRect::new(1, 1, 2, 2)));
        assert!(a.overlaps(&GridRect::new(0, 0, 1, 1)));
        assert!(GridRect::new(1, 1, 1, 1).overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = GridRect::new(0, 0, 2, 2);
        assert!(!a.overlaps(&GridRect::new(2, 0, 1, 1)));
        assert!(!a.overlaps(&GridRect::new(0, 2, 2, 1)));
        assert!(!a.overlaps(&GridRect::new(2, 2, 1, 1)));
    }

    #[test]
    fn test_clamp_keeps_span() {
        let clamped = grid().clamp(&GridRect::new(4, -3, 2, 2));
        assert_eq!(clamped, GridRect::new(3, 0, 2, 2));
        assert!(grid().contains(&clamped));
    }

    #[test]
    fn test_clamp_is_noop_when_in_range() {
        let rect = GridRect::new(1, 2, 2, 2);
        assert_eq!(grid().clamp(&rect), rect);
    }

    #[test]
    fn test_clamp_oversized_span_pins_to_origin() {
        let clamped = grid().clamp(&GridRect::new(3, 3, 7, 1));
        assert_eq!(clamped.x, 0);
        assert_eq!(clamped.y, 3);
        assert!(!grid().contains(&clamped));
    }

    #[test]
    fn test_clamp_survives_extreme_spans() {
        let wide = grid().clamp(&GridRect::new(7, 2, i32::MIN, 1));
        assert_eq!((wide.x, wide.y), (7, 2));
        assert!(!grid().contains(&wide));

        let far = grid().clamp(&GridRect::new(i32::MAX, i32::MIN, i32::MAX, 1));
        assert_eq!((far.x, far.y), (0, 0));
        assert!(!grid().contains(&far));
    }

    #[test]
    fn test_contains_cell_is_half_open() {
        let rect = GridRect::new(1, 2, 2, 2);
        assert!(rect.contains_cell(1, 2));
        assert!(rect.contains_cell(2, 3));
        assert!(!rect.contains_cell(3, 2));
        assert!(!rect.contains_cell(1, 4));
        assert!(!GridRect::new(i32::MAX - 1, 0, i32::MAX, 1).contains_cell(0, 0));
    }
}
