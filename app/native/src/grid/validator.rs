//! Placement validation.
//!
//! This is the only place where bounds and collision rules are applied to a
//! candidate rectangle. Both resolvers and the dashboard service go through
//! [`validate`] so the invariants are enforced in one spot.

use super::error::{GridError, GridResult};
use super::geometry::{GridBounds, GridRect, Span};
use super::placement::{PlacementId, PlacementSet};

/// Checks whether `candidate` may be placed into `set`.
///
/// The placement matching `exclude` is skipped, which lets a widget be
/// validated against everything except its own previous position.
///
/// # Errors
///
/// - `OutOfBounds` if the candidate leaves the grid or has an empty span.
/// - `Overlap` naming the first conflicting placement in storage order.
pub fn validate(
    candidate: &GridRect,
    set: &PlacementSet,
    exclude: Option<PlacementId>,
    bounds: &GridBounds,
) -> GridResult<()> {
    if !bounds.contains(candidate) {
        return Err(GridError::out_of_bounds(*candidate));
    }

    first_conflict(candidate, set, exclude).map_or(Ok(()), |id| Err(GridError::overlap(id)))
}

/// Returns the first placement (in storage order) whose rectangle overlaps
/// `candidate`, ignoring `exclude`.
#[must_use]
pub fn first_conflict(
    candidate: &GridRect,
    set: &PlacementSet,
    exclude: Option<PlacementId>,
) -> Option<PlacementId> {
    set.iter()
        .filter(|p| Some(p.id) != exclude)
        .find(|p| p.rect.overlaps(candidate))
        .map(|p| p.id)
}

/// Finds the first legal position for a span, scanning rows top to bottom
/// and columns left to right.
///
/// Returns `None` when the span does not fit anywhere.
#[must_use]
pub fn find_free_slot(span: Span, set: &PlacementSet, bounds: &GridBounds) -> Option<GridRect> {
    if !span.is_valid() {
        return None;
    }

    (0..=bounds.rows - span.h)
        .flat_map(|y| (0..=bounds.columns - span.w).map(move |x| GridRect::at(x, y, span)))
        .find(|rect| first_conflict(rect, set, None).is_none())
}
