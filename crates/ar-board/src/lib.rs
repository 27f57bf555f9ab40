//! High-level facade crate for the `ar-board-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the core types and the surface estimator
//! - file-driven helpers that replay recorded tracker frames through the
//!   estimator and produce a JSON report (used by the `ar-board` CLI)
//!
//! ## Quickstart
//!
//! ```
//! use ar_board::{CornerLayout, SurfaceEstimator, SurfaceParams, TrackedMarker};
//! use nalgebra::Point3;
//!
//! let layout = CornerLayout::default();
//! let corners = [(34, 0.0, 0.0), (36, 1.0, 0.0), (32, 1.0, 1.0), (38, 0.0, 1.0)];
//! let markers: Vec<TrackedMarker> = corners
//!     .into_iter()
//!     .map(|(id, x, z)| TrackedMarker {
//!         id,
//!         position: Point3::new(x, 0.0, z),
//!         visible: true,
//!     })
//!     .collect();
//!
//! let mut estimator = SurfaceEstimator::new(SurfaceParams::default());
//! let estimate = estimator.estimate_tracked(&layout, &markers)?;
//! assert!(estimate.is_valid());
//! # Ok::<(), ar_board::surface::SurfaceError>(())
//! ```
//!
//! ## API map
//! - `ar_board::core`: corners, samples, layouts, plane poses, debug segments.
//! - `ar_board::surface`: the per-frame estimator, params, replay.
//! - `ar_board::run`: file-driven replay used by the CLI.

pub use ar_board_core as core;
pub use ar_board_surface as surface;

pub use ar_board_core::{
    BoardCorner, CornerLayout, DebugSegment, MarkerQuad, MarkerSample, PlanePose,
    RenderTransform, TrackedMarker,
};
pub use ar_board_surface::{EstimateStatus, SurfaceEstimate, SurfaceEstimator, SurfaceParams};

pub mod run;
