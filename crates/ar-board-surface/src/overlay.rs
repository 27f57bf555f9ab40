//! Debug overlay for a solved frame.

use crate::PlaneSolution;
use ar_board_core::{BoardCorner, DebugSegment, MarkerQuad, Rgb};

/// Colors of the per-corner normals, in cyclic corner order.
pub const CORNER_NORMAL_COLORS: [Rgb; 4] = [Rgb::CYAN, Rgb::MAGENTA, Rgb::YELLOW, Rgb::ORANGE];

/// Plane normal length, relative to the shorter extent.
const PLANE_NORMAL_REL: f64 = 0.5;
/// Corner normal length, relative to the shorter extent.
const CORNER_NORMAL_REL: f64 = 0.3;

/// Segments describing how the pose was derived from the quad.
///
/// - top edge TL->TR (red) and left edge TL->BL (green);
/// - the plane normal at TL (blue);
/// - each measured corner normal at its corner.
pub fn overlay_segments(quad: &MarkerQuad, solution: &PlaneSolution) -> Vec<DebugSegment> {
    let pose = &solution.pose;
    let tl = quad.position(BoardCorner::TopLeft);
    let short = pose.width.min(pose.height);

    let mut out = Vec::with_capacity(7);
    out.push(DebugSegment::new(tl, quad.position(BoardCorner::TopRight), Rgb::RED));
    out.push(DebugSegment::new(tl, quad.position(BoardCorner::BottomLeft), Rgb::GREEN));
    out.push(DebugSegment::new(
        tl,
        tl + pose.normal * (PLANE_NORMAL_REL * short),
        Rgb::BLUE,
    ));

    for corner in BoardCorner::ALL {
        let Some(n) = solution.corner_normals[corner.index()] else {
            continue;
        };
        let at = quad.position(corner);
        out.push(DebugSegment::new(
            at,
            at + n * (CORNER_NORMAL_REL * short),
            CORNER_NORMAL_COLORS[corner.index()],
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{solve_plane, SurfaceParams};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn square_overlay_has_edges_and_all_normals() {
        let quad = MarkerQuad::from_positions([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ]);
        let sol = solve_plane(&quad, &SurfaceParams::default()).expect("solve");
        let segs = overlay_segments(&quad, &sol);

        assert_eq!(segs.len(), 7);
        assert_eq!(segs[0].color, Rgb::RED);
        assert_eq!(segs[0].end, Point3::new(2.0, 0.0, 0.0));
        assert_eq!(segs[1].color, Rgb::GREEN);
        assert_relative_eq!(segs[2].length(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(segs[2].end, Point3::new(0.0, 0.5, 0.0), epsilon = 1e-12);
        for (seg, color) in segs[3..].iter().zip(CORNER_NORMAL_COLORS) {
            assert_eq!(seg.color, color);
            assert_relative_eq!(seg.length(), 0.3, epsilon = 1e-12);
        }
    }
}
