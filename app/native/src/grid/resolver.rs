//! Single-move resolver.
//!
//! Applies one move and/or resize request to one placement. The candidate
//! rectangle is computed and validated before anything is written, so a
//! rejected request never leaves a half-updated rectangle behind.

use serde::{Deserialize, Serialize};

use super::error::{GridError, GridResult};
use super::geometry::{GridBounds, GridRect, Span};
use super::placement::{Placement, PlacementId, PlacementSet};
use super::sizes::SizeCatalog;
use super::validator;

/// Requested span change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpanRequest {
    /// Explicit width and height in cells.
    Cells(Span),
    /// A size class resolved through the size catalog.
    Named(String),
}

/// A move and/or resize request. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// New top-left cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<(i32, i32)>,
    /// New span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<SpanRequest>,
}

impl MoveRequest {
    /// A request that only moves the widget.
    #[must_use]
    pub const fn move_to(x: i32, y: i32) -> Self {
        Self {
            position: Some((x, y)),
            span: None,
        }
    }

    /// A request that only changes the span.
    #[must_use]
    pub const fn resize(w: i32, h: i32) -> Self {
        Self {
            position: None,
            span: Some(SpanRequest::Cells(Span::new(w, h))),
        }
    }

    /// A request that switches to a named size class at the current position.
    #[must_use]
    pub fn resize_to(size: impl Into<String>) -> Self {
        Self {
            position: None,
            span: Some(SpanRequest::Named(size.into())),
        }
    }

    /// Adds a position to the request.
    #[must_use]
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Returns `true` if the request changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.position.is_none() && self.span.is_none() }

    /// Computes the candidate rectangle for `current`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSize` if a named span is not in the catalog.
    pub fn apply_to(&self, current: &GridRect, catalog: &SizeCatalog) -> GridResult<GridRect> {
        let span = match &self.span {
            None => current.span(),
            Some(SpanRequest::Cells(span)) => *span,
            Some(SpanRequest::Named(name)) => catalog.resolve(name)?,
        };
        let (x, y) = self.position.unwrap_or((current.x, current.y));
        Ok(GridRect::at(x, y, span))
    }
}

impl PlacementSet {
    /// Moves and/or resizes a single placement.
    ///
    /// The placement is validated against every other placement in the set.
    /// Resubmitting the current rectangle succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` is not in the set.
    /// - `UnknownSize` if the request names an unregistered size class.
    /// - `OutOfBounds` / `Overlap` if the candidate cannot be placed.
    ///
    /// The set is unchanged whenever an error is returned.
    pub fn move_or_resize(
        &mut self,
        id: PlacementId,
        request: &MoveRequest,
        bounds: &GridBounds,
        catalog: &SizeCatalog,
    ) -> GridResult<&Placement> {
        let index = self.position(id).ok_or(GridError::NotFound { id })?;
        let current = self.as_slice()[index].rect;
        let candidate = request.apply_to(&current, catalog)?;

        validator::validate(&candidate, self, Some(id), bounds).map_err(|err| match err {
            GridError::OutOfBounds { rect, .. } => GridError::OutOfBounds { rect, id: Some(id) },
            other => other,
        })?;

        if candidate != current {
            tracing::debug!(%id, from = %current, to = %candidate, "grid: placement updated");
            self.set_rect(index, candidate);
        }

        Ok(&self.as_slice()[index])
    }
}
