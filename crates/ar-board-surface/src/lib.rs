//! Board plane estimation from four tracked corner markers.
//!
//! Every frame the tracker reports one world position and a visibility flag
//! per board corner. [`SurfaceEstimator`] turns those into a [`PlanePose`]
//! (center, right-handed orthonormal basis with an upward normal, width,
//! height) that a renderer can map onto a textured quad.
//!
//! ## Quickstart
//!
//! ```
//! use ar_board_core::MarkerQuad;
//! use ar_board_surface::{SurfaceEstimator, SurfaceParams};
//! use nalgebra::Point3;
//!
//! let mut estimator = SurfaceEstimator::new(SurfaceParams::default());
//! let quad = MarkerQuad::from_positions([
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 1.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ]);
//! let estimate = estimator.estimate(&quad);
//! assert!(estimate.is_valid());
//! ```
//!
//! Hidden markers yield an invalid pose on that very frame. Degenerate quads
//! (coincident or collinear corners) follow [`DegeneratePolicy`]. No field of
//! an emitted pose is ever NaN or infinite.
//!
//! [`PlanePose`]: ar_board_core::PlanePose

mod error;
mod estimator;
pub mod geometry;
mod io;
mod overlay;
mod params;
mod replay;
mod result;

pub use error::{SurfaceError, SurfaceIoError};
pub use estimator::{solve_plane, PlaneSolution, SurfaceEstimator};
pub use io::{
    read_json, FrameReport, ReplaySummary, SurfaceReplayConfig, SurfaceReplayReport, TrackingFrame,
    TrackingRecording,
};
pub use overlay::{overlay_segments, CORNER_NORMAL_COLORS};
pub use params::{CenterPolicy, DegeneratePolicy, ExtentPolicy, SurfaceParams};
pub use replay::replay_recording;
pub use result::{DegenerateReason, EstimateStatus, Rejection, SurfaceEstimate};
