//! Widgetbox - a personal widget dashboard with a collision-free grid.
//!
//! The core is the placement engine in [`grid`]: it validates, computes and
//! mutates widget rectangles on a bounded grid so that no two widgets
//! overlap and none leaves the grid. Around it sit a widget registry, a
//! placement store, an owner-serialized [`dashboard::Dashboard`] service
//! and the command-line front end.

pub mod cli;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod grid;
pub mod paths;
pub mod schema;
pub mod store;
pub mod widgets;
