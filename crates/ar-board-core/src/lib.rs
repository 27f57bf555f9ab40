//! Core types for marker-delimited AR board surfaces.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any marker tracker or renderer: trackers produce
//! [`MarkerSample`]s / [`TrackedMarker`]s, estimators produce a
//! [`PlanePose`], and renderers consume a [`RenderTransform`] plus optional
//! [`DebugSegment`]s.

mod corner;
mod error;
mod layout;
mod logger;
mod marker;
mod overlay;
mod pose;

pub use corner::BoardCorner;
pub use error::QuadError;
pub use layout::{CornerLayout, TrackedMarker};
pub use marker::{MarkerQuad, MarkerSample};
pub use overlay::{DebugSegment, Rgb};
pub use pose::{PlanePose, RenderTransform};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
