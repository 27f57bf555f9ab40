use ar_board_core::{BoardCorner, PlanePose, RenderTransform};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a fully visible quad produced no new pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateReason {
    /// A visible marker reported a NaN or infinite position.
    NonFinitePosition,
    /// The measured width is zero (coincident markers).
    ZeroWidth,
    /// The measured height is zero (coincident markers).
    ZeroHeight,
    /// No corner normal could be formed, or they cancel out.
    CollinearCorners,
    /// The top edge is parallel to the estimated normal.
    EdgeAlongNormal,
    /// The assembled pose contained a non-finite value.
    NonFinitePose,
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DegenerateReason::NonFinitePosition => "non-finite marker position",
            DegenerateReason::ZeroWidth => "zero width",
            DegenerateReason::ZeroHeight => "zero height",
            DegenerateReason::CollinearCorners => "collinear corners",
            DegenerateReason::EdgeAlongNormal => "top edge along normal",
            DegenerateReason::NonFinitePose => "non-finite pose",
        };
        f.write_str(s)
    }
}

/// Outcome of the per-frame computation, before any policy is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    Hidden { corner: BoardCorner },
    Degenerate { reason: DegenerateReason },
}

/// How the emitted pose of a frame was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateStatus {
    /// All four markers visible, fresh pose.
    Tracked,
    /// A marker was not visible; the pose is invalid.
    Hidden { corner: BoardCorner },
    /// Degenerate quad; the previous valid pose was re-emitted.
    Held { reason: DegenerateReason },
    /// Degenerate quad; the pose is invalid.
    Degenerate { reason: DegenerateReason },
}

/// One frame of estimator output.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceEstimate {
    pub pose: PlanePose,
    pub status: EstimateStatus,
    /// Renderer transform, present iff `pose.valid`.
    pub render: Option<RenderTransform>,
}

impl SurfaceEstimate {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.pose.valid
    }
}
