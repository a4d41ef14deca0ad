//! Batch reflow resolver.
//!
//! A drag-and-drop session (or a bulk layout save) submits the final
//! rectangle of several widgets at once. The whole batch is checked before
//! anything is written:
//!
//! 1. Every entry names an existing placement and carries `x` and `y`.
//! 2. Every resolved rectangle is inside the grid.
//! 3. No two proposed rectangles overlap.
//! 4. No proposed rectangle overlaps a placement the batch leaves untouched.
//!
//! Untouched-vs-untouched needs no check: the set satisfied the no-overlap
//! invariant before the batch. Either every proposal commits or none does.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{GridError, GridResult};
use super::geometry::{GridBounds, GridRect};
use super::placement::{PlacementId, PlacementSet};

/// Inline capacity for batch bookkeeping. A 5x5 grid holds at most 25
/// widgets and typical drags touch far fewer.
pub const BATCH_INLINE_CAP: usize = 16;

/// One entry of a batch. Fields are optional because batches arrive as
/// untrusted JSON; missing required fields are reported as malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Placement to move.
    #[serde(default)]
    pub id: Option<PlacementId>,
    /// Final column.
    #[serde(default)]
    pub x: Option<i32>,
    /// Final row.
    #[serde(default)]
    pub y: Option<i32>,
    /// Final width. Keeps the current width when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<i32>,
    /// Final height. Keeps the current height when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<i32>,
}

impl Proposal {
    /// Creates a position-only proposal.
    #[must_use]
    pub const fn new(id: PlacementId, x: i32, y: i32) -> Self {
        Self {
            id: Some(id),
            x: Some(x),
            y: Some(y),
            w: None,
            h: None,
        }
    }

    /// Creates a proposal that also sets the span.
    #[must_use]
    pub const fn with_span(id: PlacementId, rect: GridRect) -> Self {
        Self {
            id: Some(id),
            x: Some(rect.x),
            y: Some(rect.y),
            w: Some(rect.w),
            h: Some(rect.h),
        }
    }
}

/// Result of a committed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// Ids whose rectangle actually changed, in proposal order.
    pub changed: SmallVec<[PlacementId; BATCH_INLINE_CAP]>,
    /// Number of proposals accepted (including no-op entries).
    pub accepted: usize,
}

/// A proposal that passed the structural checks.
#[derive(Debug, Clone, Copy)]
struct Resolved {
    index: usize,
    id: PlacementId,
    rect: GridRect,
}

impl PlacementSet {
    /// Validates and commits a batch of absolute rectangle assignments.
    ///
    /// # Errors
    ///
    /// - `MalformedProposal` if an entry lacks `id`, `x` or `y`, names an
    ///   unknown placement, or repeats an id already in the batch.
    /// - `OutOfBounds` carrying the offending id.
    /// - `Overlap` carrying both conflicting ids.
    ///
    /// No placement changes when an error is returned.
    pub fn apply_batch(
        &mut self,
        proposals: &[Proposal],
        bounds: &GridBounds,
    ) -> GridResult<BatchOutcome> {
        let resolved = self.resolve_proposals(proposals)?;

        for entry in &resolved {
            if !bounds.contains(&entry.rect) {
                tracing::debug!(
                    id = %entry.id,
                    rect = %entry.rect,
                    "grid: batch entry out of bounds"
                );
                return Err(GridError::OutOfBounds {
                    rect: entry.rect,
                    id: Some(entry.id),
                });
            }
        }

        for (i, first) in resolved.iter().enumerate() {
            for second in &resolved[i + 1..] {
                if first.rect.overlaps(&second.rect) {
                    return Err(GridError::overlap_pair(first.id, second.id));
                }
            }
        }

        for entry in &resolved {
            let untouched = self
                .iter()
                .filter(|p| !resolved.iter().any(|r| r.id == p.id))
                .find(|p| p.rect.overlaps(&entry.rect));

            if let Some(other) = untouched {
                return Err(GridError::overlap_pair(entry.id, other.id));
            }
        }

        let mut outcome = BatchOutcome {
            accepted: resolved.len(),
            ..BatchOutcome::default()
        };
        for entry in &resolved {
            if self.as_slice()[entry.index].rect != entry.rect {
                self.set_rect(entry.index, entry.rect);
                outcome.changed.push(entry.id);
            }
        }

        tracing::debug!(
            accepted = outcome.accepted,
            changed = outcome.changed.len(),
            "grid: batch committed"
        );

        Ok(outcome)
    }

    /// Checks required fields and ids, and fills in omitted spans.
    fn resolve_proposals(
        &self,
        proposals: &[Proposal],
    ) -> GridResult<SmallVec<[Resolved; BATCH_INLINE_CAP]>> {
        let mut resolved: SmallVec<[Resolved; BATCH_INLINE_CAP]> =
            SmallVec::with_capacity(proposals.len());

        for (i, proposal) in proposals.iter().enumerate() {
            let Some(id) = proposal.id else {
                return Err(GridError::malformed(i, "missing 'id'"));
            };
            let (Some(x), Some(y)) = (proposal.x, proposal.y) else {
                return Err(GridError::malformed(i, format!("missing 'x' or 'y' for {id}")));
            };
            let Some(index) = self.position(id) else {
                return Err(GridError::malformed(i, format!("unknown placement {id}")));
            };
            if resolved.iter().any(|r| r.id == id) {
                return Err(GridError::malformed(i, format!("placement {id} proposed twice")));
            }

            let current = self.as_slice()[index].rect;
            resolved.push(Resolved {
                index,
                id,
                rect: GridRect::new(
                    x,
                    y,
                    proposal.w.unwrap_or(current.w),
                    proposal.h.unwrap_or(current.h),
                ),
            });
        }

        Ok(resolved)
    }
}
