//! Owner-scoped dashboard service.
//!
//! [`Dashboard`] ties the placement engine to a [`PlacementStore`]. Every
//! mutating call runs `load -> validate -> mutate -> save` while holding a
//! lock for the owner, so two concurrent requests for the same owner can
//! never both pass validation against the same stale snapshot. Requests for
//! different owners run in parallel.
//!
//! The engine leaves a placement set untouched whenever it returns an error,
//! and the service only saves after a successful mutation. A failed request
//! therefore never reaches the store.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{
    BatchOutcome, DragPreview, DragSession, DragTuning, GridBounds, GridError, GridRect,
    MoveRequest, Placement, PlacementId, PlacementSet, Proposal, SizeCatalog, Span, SpanRequest,
    find_free_slot, validate,
};
use crate::store::{OwnerId, PlacementStore, StoreError};
use crate::widgets::WidgetRegistry;

/// Result type alias for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Errors returned by [`Dashboard`] operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The placement engine rejected the request.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The placement store failed.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The widget kind is not in the registry.
    #[error("Unknown widget '{0}'")]
    UnknownWidget(String),

    /// No free position is large enough for the requested span.
    #[error("No free space for a {span} widget")]
    GridFull {
        /// The span that did not fit.
        span: Span,
    },
}

impl DashboardError {
    /// Returns the engine error, if this is one.
    #[must_use]
    pub const fn as_grid(&self) -> Option<&GridError> {
        match self {
            Self::Grid(err) => Some(err),
            _ => None,
        }
    }
}

/// Request to place a new widget on an owner's grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWidget {
    /// Registry id of the widget kind.
    pub widget_id: String,
    /// Size override; defaults to the widget's size class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SpanRequest>,
    /// Top-left cell; defaults to the first free slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<(i32, i32)>,
    /// Initial widget configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl NewWidget {
    /// Creates a request for `widget_id` with every option defaulted.
    #[must_use]
    pub fn new(widget_id: impl Into<String>) -> Self {
        Self {
            widget_id: widget_id.into(),
            ..Self::default()
        }
    }

    /// Sets the top-left cell.
    #[must_use]
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Sets the size.
    #[must_use]
    pub fn sized(mut self, size: SpanRequest) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the initial configuration.
    #[must_use]
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// Placement service serializing mutations per owner.
pub struct Dashboard<S> {
    store: S,
    bounds: GridBounds,
    catalog: SizeCatalog,
    registry: WidgetRegistry,
    drag: DragTuning,
    locks: DashMap<OwnerId, Arc<Mutex<()>>>,
}

impl<S: PlacementStore> Dashboard<S> {
    /// Creates a dashboard over `store`.
    pub fn new(
        store: S,
        bounds: GridBounds,
        catalog: SizeCatalog,
        registry: WidgetRegistry,
    ) -> Self {
        Self {
            store,
            bounds,
            catalog,
            registry,
            drag: DragTuning::default(),
            locks: DashMap::new(),
        }
    }

    /// Replaces the pixel-to-cell settings used by drag sessions.
    #[must_use]
    pub fn with_drag_tuning(mut self, tuning: DragTuning) -> Self {
        self.drag = tuning;
        self
    }

    /// Grid dimensions.
    pub const fn bounds(&self) -> &GridBounds { &self.bounds }

    /// Size classes.
    pub const fn catalog(&self) -> &SizeCatalog { &self.catalog }

    /// Widget definitions.
    pub const fn registry(&self) -> &WidgetRegistry { &self.registry }

    /// Backing store.
    pub const fn store(&self) -> &S { &self.store }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns a snapshot of the owner's placements.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the set cannot be loaded.
    pub fn placements(&self, owner: &OwnerId) -> DashboardResult<PlacementSet> {
        self.with_owner_lock(owner, || self.load(owner))
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Places a new widget.
    ///
    /// The size defaults to the widget's registered size class and the
    /// position to the first free slot in row-major order.
    ///
    /// # Errors
    ///
    /// - `UnknownWidget` if `widget_id` is not registered.
    /// - `Grid(UnknownSize)` if the size class cannot be resolved.
    /// - `Grid(OutOfBounds | Overlap)` if the explicit position is illegal.
    /// - `GridFull` if no position is free for the span.
    pub fn create_widget(&self, owner: &OwnerId, request: NewWidget) -> DashboardResult<Placement> {
        let definition = self
            .registry
            .get(&request.widget_id)
            .ok_or_else(|| DashboardError::UnknownWidget(request.widget_id.clone()))?;

        let span = match &request.size {
            Some(SpanRequest::Cells(span)) => *span,
            Some(SpanRequest::Named(name)) => self.catalog.resolve(name)?,
            None => self.catalog.resolve(&definition.size)?,
        };
        if !span.is_valid() {
            return Err(GridError::out_of_bounds(GridRect::at(0, 0, span)).into());
        }

        self.mutate(owner, "create", |set, bounds| {
            let rect = match request.position {
                Some((x, y)) => GridRect::at(x, y, span),
                None => find_free_slot(span, set, bounds).ok_or(DashboardError::GridFull { span })?,
            };

            let placement = Placement::new(request.widget_id, rect)
                .with_config(request.config.unwrap_or_else(|| serde_json::json!({})));
            let placement = set.insert(placement, bounds)?.clone();

            tracing::info!(
                %owner,
                id = %placement.id,
                widget = %placement.widget_id,
                rect = %placement.rect,
                "dashboard: widget created"
            );
            Ok(placement)
        })
    }

    /// Moves and/or resizes one placement.
    ///
    /// # Errors
    ///
    /// Returns `Grid` if the engine rejects the request and `Storage` if the
    /// set cannot be loaded or saved.
    pub fn move_or_resize(
        &self,
        owner: &OwnerId,
        id: PlacementId,
        request: &MoveRequest,
    ) -> DashboardResult<Placement> {
        let catalog = &self.catalog;
        self.mutate(owner, "move", |set, bounds| {
            Ok(set.move_or_resize(id, request, bounds, catalog)?.clone())
        })
    }

    /// Applies a batch of proposed positions atomically.
    ///
    /// # Errors
    ///
    /// Returns `Grid` if any proposal is rejected; nothing is saved in that
    /// case.
    pub fn apply_batch(
        &self,
        owner: &OwnerId,
        proposals: &[Proposal],
    ) -> DashboardResult<BatchOutcome> {
        self.mutate(owner, "batch", |set, bounds| {
            let outcome = set.apply_batch(proposals, bounds)?;
            tracing::info!(
                %owner,
                accepted = outcome.accepted,
                changed = outcome.changed.len(),
                "dashboard: batch applied"
            );
            Ok(outcome)
        })
    }

    /// Removes a placement and returns it.
    ///
    /// # Errors
    ///
    /// Returns `Grid(NotFound)` if the placement does not exist.
    pub fn remove_widget(&self, owner: &OwnerId, id: PlacementId) -> DashboardResult<Placement> {
        self.mutate(owner, "remove", |set, _| {
            let removed = set.remove(id)?;
            tracing::info!(%owner, %id, "dashboard: widget removed");
            Ok(removed)
        })
    }

    /// Replaces a placement's configuration payload. Geometry is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Grid(NotFound)` if the placement does not exist.
    pub fn update_config(
        &self,
        owner: &OwnerId,
        id: PlacementId,
        config: serde_json::Value,
    ) -> DashboardResult<Placement> {
        self.mutate(owner, "config", |set, _| Ok(set.set_config(id, config)?.clone()))
    }

    // ========================================================================
    // Drag support
    // ========================================================================

    /// Starts a drag session for a placement.
    ///
    /// # Errors
    ///
    /// Returns `Grid(NotFound)` if the placement does not exist.
    pub fn start_drag(&self, owner: &OwnerId, id: PlacementId) -> DashboardResult<DragSession> {
        let set = self.placements(owner)?;
        let placement = set.get(id).ok_or(GridError::NotFound { id })?;
        Ok(DragSession::start(placement, self.drag))
    }

    /// Previews where a drag would land without changing anything.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the set cannot be loaded.
    pub fn preview_drag(
        &self,
        owner: &OwnerId,
        session: &DragSession,
        dx: f64,
        dy: f64,
    ) -> DashboardResult<DragPreview> {
        let set = self.placements(owner)?;
        Ok(session.preview(dx, dy, &set, &self.bounds))
    }

    /// Drops a dragged widget, committing the move if it is legal.
    ///
    /// # Errors
    ///
    /// Same as [`Self::move_or_resize`].
    pub fn finish_drag(
        &self,
        owner: &OwnerId,
        session: DragSession,
        dx: f64,
        dy: f64,
    ) -> DashboardResult<Placement> {
        let id = session.id();
        let request = session.finish(dx, dy, &self.bounds);
        self.move_or_resize(owner, id, &request)
    }

    /// Checks a candidate rectangle for a placement without mutating.
    ///
    /// # Errors
    ///
    /// Returns the engine error the rectangle would be rejected with.
    pub fn check(
        &self,
        owner: &OwnerId,
        rect: &GridRect,
        exclude: Option<PlacementId>,
    ) -> DashboardResult<()> {
        let set = self.placements(owner)?;
        validate(rect, &set, exclude, &self.bounds)?;
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Runs `f` while holding the owner's lock.
    ///
    /// Lock entries live only while some request holds them: the last
    /// holder removes the entry on the way out.
    fn with_owner_lock<T>(&self, owner: &OwnerId, f: impl FnOnce() -> T) -> T {
        let lock = self.locks.entry(owner.clone()).or_default().value().clone();
        let result = {
            let _guard = lock.lock();
            f()
        };

        drop(lock);
        self.locks.remove_if(owner, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    fn load(&self, owner: &OwnerId) -> DashboardResult<PlacementSet> {
        let set = self.store.load(owner)?;
        if let Err(err) = set.check_invariants(&self.bounds) {
            tracing::warn!(%owner, error = %err, "dashboard: stored placements violate grid rules");
        }
        Ok(set)
    }

    /// Runs `op` on the owner's set inside the owner's critical section and
    /// saves the set if `op` succeeds.
    fn mutate<T>(
        &self,
        owner: &OwnerId,
        action: &'static str,
        op: impl FnOnce(&mut PlacementSet, &GridBounds) -> DashboardResult<T>,
    ) -> DashboardResult<T> {
        self.with_owner_lock(owner, || {
            let mut set = self.load(owner)?;
            match op(&mut set, &self.bounds) {
                Ok(value) => {
                    self.store.save(owner, &set)?;
                    Ok(value)
                }
                Err(err) => {
                    tracing::debug!(%owner, action, error = %err, "dashboard: request rejected");
                    Err(err)
                }
            }
        })
    }
}

impl<S> std::fmt::Debug for Dashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("bounds", &self.bounds)
            .field("sizes", &self.catalog.len())
            .field("widgets", &self.registry.len())
            .finish_non_exhaustive()
    }
}
