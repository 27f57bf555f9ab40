use crate::geometry::{average_normal, edge_basis, QuadEdges};
use crate::overlay::overlay_segments;
use crate::{
    CenterPolicy, DegeneratePolicy, DegenerateReason, EstimateStatus, ExtentPolicy, Rejection,
    SurfaceError, SurfaceEstimate, SurfaceParams,
};
use ar_board_core::{
    BoardCorner, CornerLayout, DebugSegment, MarkerQuad, MarkerSample, PlanePose, TrackedMarker,
};
use log::debug;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "tracing")]
use tracing::instrument;

const TL: usize = BoardCorner::TopLeft as usize;
const BL: usize = BoardCorner::BottomLeft as usize;

/// Below this length the mean of the corner unit normals counts as cancelled.
const NORMAL_CANCEL_EPS: f64 = 1e-9;

/// Geometry of one successfully solved frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneSolution {
    pub pose: PlanePose,
    /// Per-corner normals in cyclic corner order, as measured (no sign
    /// convention applied). `None` where the corner is degenerate.
    pub corner_normals: [Option<Vector3<f64>>; 4],
}

/// Compute the board plane for one frame. Pure: no state, no policy.
///
/// 1. any hidden marker rejects the frame;
/// 2. edge vectors along TL -> TR -> BR -> BL -> TL;
/// 3. per-corner normals `incoming × outgoing`, averaged;
/// 4. Gram-Schmidt basis from the top and left edges;
/// 5. normal flipped (with `y_axis`) to face up;
/// 6. extents and center according to `params`.
#[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
pub fn solve_plane(quad: &MarkerQuad, params: &SurfaceParams) -> Result<PlaneSolution, Rejection> {
    if let Some(corner) = quad.first_hidden() {
        return Err(Rejection::Hidden { corner });
    }

    let degenerate = |reason| Rejection::Degenerate { reason };
    let eps = params.min_edge_length;
    let p = quad.positions();
    if p.iter().any(|q| q.coords.iter().any(|v| !v.is_finite())) {
        return Err(degenerate(DegenerateReason::NonFinitePosition));
    }

    let edges = QuadEdges::from_positions(&p);
    let across = edges.top();
    let down = p[BL] - p[TL];
    if across.norm() <= eps || edges.bottom().norm() <= eps {
        return Err(degenerate(DegenerateReason::ZeroWidth));
    }
    if down.norm() <= eps || edges.right().norm() <= eps {
        return Err(degenerate(DegenerateReason::ZeroHeight));
    }

    let corner_normals = edges.corner_normals(eps);
    let averaged = average_normal(&corner_normals, NORMAL_CANCEL_EPS)
        .ok_or(degenerate(DegenerateReason::CollinearCorners))?;
    let basis = edge_basis(&across, &down, &averaged, eps).map_err(degenerate)?;

    let (width, height) = match params.extent_policy {
        ExtentPolicy::SingleEdge => (across.norm(), down.norm()),
        ExtentPolicy::OppositeEdgeMean => (
            0.5 * (edges.top().norm() + edges.bottom().norm()),
            0.5 * (edges.left().norm() + edges.right().norm()),
        ),
    };

    let center = match params.center_policy {
        CenterPolicy::CornerAnchored => {
            p[TL] + basis.x * (0.5 * width) + basis.y_down * (0.5 * height)
        }
        CenterPolicy::Centroid => {
            Point3::from(p.iter().map(|q| q.coords).sum::<Vector3<f64>>() / 4.0)
        }
    };

    let (mut y_axis, mut normal) = (basis.y_down, basis.normal);
    if normal.y < 0.0 {
        normal = -normal;
        y_axis = -y_axis;
    }

    let pose = PlanePose {
        center: center - normal * params.seat_offset,
        x_axis: basis.x,
        y_axis,
        normal,
        width,
        height,
        valid: true,
    };
    if !pose.is_finite() {
        return Err(degenerate(DegenerateReason::NonFinitePose));
    }

    Ok(PlaneSolution {
        pose,
        corner_normals,
    })
}

/// Per-frame board surface estimator.
///
/// Stateless apart from the last valid pose, which backs
/// [`DegeneratePolicy::HoldLast`]. A hidden marker drops the held pose, so
/// holding only bridges degenerate frames inside one tracked run.
#[derive(Clone, Debug, Default)]
pub struct SurfaceEstimator {
    params: SurfaceParams,
    last_valid: Option<PlanePose>,
}

impl SurfaceEstimator {
    pub fn new(params: SurfaceParams) -> Self {
        Self {
            params: params.sanitized(),
            last_valid: None,
        }
    }

    #[inline]
    pub fn params(&self) -> &SurfaceParams {
        &self.params
    }

    /// Last pose emitted with `Tracked` status, if still held.
    pub fn last_valid(&self) -> Option<&PlanePose> {
        self.last_valid.as_ref()
    }

    /// Forget the held pose.
    pub fn reset(&mut self) {
        self.last_valid = None;
    }

    /// Estimate the plane for one frame.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn estimate(&mut self, quad: &MarkerQuad) -> SurfaceEstimate {
        self.step(quad).0
    }

    /// Estimate from an unordered slice of corner samples.
    ///
    /// Anything but one sample per corner is a caller error.
    pub fn estimate_samples(
        &mut self,
        samples: &[MarkerSample],
    ) -> Result<SurfaceEstimate, SurfaceError> {
        let quad = MarkerQuad::from_samples(samples)?;
        Ok(self.estimate(&quad))
    }

    /// Estimate from tracker output keyed by marker id.
    pub fn estimate_tracked(
        &mut self,
        layout: &CornerLayout,
        markers: &[TrackedMarker],
    ) -> Result<SurfaceEstimate, SurfaceError> {
        let quad = layout.quad_from_tracked(markers)?;
        Ok(self.estimate(&quad))
    }

    /// Like [`SurfaceEstimator::estimate`], also returning the debug overlay.
    ///
    /// The overlay is empty unless the frame was freshly tracked.
    pub fn estimate_with_overlay(
        &mut self,
        quad: &MarkerQuad,
    ) -> (SurfaceEstimate, Vec<DebugSegment>) {
        let (estimate, solution) = self.step(quad);
        let overlay = solution
            .map(|s| overlay_segments(quad, &s))
            .unwrap_or_default();
        (estimate, overlay)
    }

    fn step(&mut self, quad: &MarkerQuad) -> (SurfaceEstimate, Option<PlaneSolution>) {
        match solve_plane(quad, &self.params) {
            Ok(solution) => {
                self.last_valid = Some(solution.pose);
                (self.emit(solution.pose, EstimateStatus::Tracked), Some(solution))
            }
            Err(Rejection::Hidden { corner }) => {
                debug!("marker at {corner} not visible, hiding surface");
                self.last_valid = None;
                (
                    self.emit(PlanePose::invalid(), EstimateStatus::Hidden { corner }),
                    None,
                )
            }
            Err(Rejection::Degenerate { reason }) => {
                let estimate = match (self.params.degenerate_policy, self.last_valid) {
                    (DegeneratePolicy::HoldLast, Some(last)) => {
                        debug!("degenerate quad ({reason}), holding last pose");
                        self.emit(last, EstimateStatus::Held { reason })
                    }
                    _ => {
                        debug!("degenerate quad ({reason}), surface invalid");
                        self.emit(PlanePose::invalid(), EstimateStatus::Degenerate { reason })
                    }
                };
                (estimate, None)
            }
        }
    }

    fn emit(&self, pose: PlanePose, status: EstimateStatus) -> SurfaceEstimate {
        SurfaceEstimate {
            pose,
            status,
            render: pose.render_transform(self.params.render_scale),
        }
    }
}
