//! Grid placement engine.
//!
//! This module owns every rule about where a widget may sit on the
//! dashboard grid. It is pure computation over an in-memory
//! [`PlacementSet`]: it never blocks, never performs I/O, and never retries.
//! Loading and saving sets, and serializing access per owner, is the job of
//! the [`crate::dashboard`] service.
//!
//! # Components
//!
//! - [`geometry`]: cell rectangles, bounds, overlap and clamping
//! - [`validator`]: the single legality check used by everything else
//! - [`sizes`]: named size classes resolved to spans
//! - [`resolver`]: one move/resize at a time
//! - [`batch`]: all-or-nothing reflow of many placements
//! - [`drag`]: pointer deltas to cell positions
//!
//! # Invariants
//!
//! After every successful mutation of a set, every rectangle is inside the
//! grid and no two rectangles overlap. A failed mutation leaves the set
//! exactly as it was.

pub mod batch;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod resolver;
pub mod sizes;
pub mod validator;

pub use batch::{BatchOutcome, Proposal};
pub use drag::{DragPreview, DragSession, DragTuning};
pub use error::{GridError, GridResult};
pub use geometry::{GridBounds, GridRect, Span};
pub use placement::{Placement, PlacementId, PlacementSet};
pub use resolver::{MoveRequest, SpanRequest};
pub use sizes::SizeCatalog;
pub use validator::{find_free_slot, validate};
