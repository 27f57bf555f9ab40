//! Vector algebra on the four-corner quad: edges, corner normals, basis.

use crate::DegenerateReason;
use ar_board_core::BoardCorner;
use nalgebra::{Point3, Vector3};

/// Boundary edges of the quad, walked TL -> TR -> BR -> BL -> TL.
///
/// `edges[k]` leaves corner `BoardCorner::ALL[k]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadEdges {
    edges: [Vector3<f64>; 4],
}

impl QuadEdges {
    pub fn from_positions(p: &[Point3<f64>; 4]) -> Self {
        Self {
            edges: [p[1] - p[0], p[2] - p[1], p[3] - p[2], p[0] - p[3]],
        }
    }

    /// Edge leaving `corner` along the cyclic walk.
    #[inline]
    pub fn outgoing(&self, corner: BoardCorner) -> Vector3<f64> {
        self.edges[corner.index()]
    }

    /// Edge arriving at `corner` along the cyclic walk.
    #[inline]
    pub fn incoming(&self, corner: BoardCorner) -> Vector3<f64> {
        self.edges[corner.prev().index()]
    }

    pub fn top(&self) -> Vector3<f64> {
        self.outgoing(BoardCorner::TopLeft)
    }

    pub fn right(&self) -> Vector3<f64> {
        self.outgoing(BoardCorner::TopRight)
    }

    pub fn bottom(&self) -> Vector3<f64> {
        self.outgoing(BoardCorner::BottomRight)
    }

    pub fn left(&self) -> Vector3<f64> {
        self.outgoing(BoardCorner::BottomLeft)
    }

    /// Unit normal at every corner: `incoming × outgoing`.
    ///
    /// `eps` is a length; the cross products are areas and are compared
    /// against `eps²`. `None` where the two edges are collinear or
    /// zero-length.
    pub fn corner_normals(&self, eps: f64) -> [Option<Vector3<f64>>; 4] {
        let area_eps = eps * eps;
        BoardCorner::ALL.map(|c| {
            self.incoming(c)
                .cross(&self.outgoing(c))
                .try_normalize(area_eps)
        })
    }
}

/// Mean of the available corner normals, renormalized.
///
/// `eps` is dimensionless: the mean of unit vectors shorter than it is
/// treated as cancelled out.
pub fn average_normal(normals: &[Option<Vector3<f64>>; 4], eps: f64) -> Option<Vector3<f64>> {
    let (sum, count) = normals
        .iter()
        .flatten()
        .fold((Vector3::<f64>::zeros(), 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        return None;
    }
    (sum / count as f64).try_normalize(eps)
}

/// Right-handed orthonormal frame spanned by the board edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeBasis {
    pub x: Vector3<f64>,
    /// In-plane axis pointing from the top edge towards the bottom edge.
    pub y_down: Vector3<f64>,
    /// `x × y_down`.
    pub normal: Vector3<f64>,
}

/// Gram-Schmidt the `across` edge (TL->TR) and the `down` edge (TL->BL)
/// against the estimated plane normal.
///
/// The normal fixes the plane's tilt; its sign is then aligned with the
/// edge winding so that `x × y_down = normal` always holds.
pub fn edge_basis(
    across: &Vector3<f64>,
    down: &Vector3<f64>,
    normal: &Vector3<f64>,
    eps: f64,
) -> Result<EdgeBasis, DegenerateReason> {
    let x = (across - normal * normal.dot(across))
        .try_normalize(eps)
        .ok_or(DegenerateReason::EdgeAlongNormal)?;

    let y_raw = down - normal * normal.dot(down) - x * x.dot(down);
    let mut y_down = y_raw
        .try_normalize(eps)
        .ok_or(DegenerateReason::CollinearCorners)?;
    if y_down.dot(down) < 0.0 {
        y_down = -y_down;
    }

    let mut n = *normal;
    if x.cross(&y_down).dot(&n) < 0.0 {
        n = -n;
    }

    Ok(EdgeBasis { x, y_down, normal: n })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> [Point3<f64>; 4] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn edges_close_the_loop() {
        let e = QuadEdges::from_positions(&unit_square());
        assert_relative_eq!(e.top() + e.right() + e.bottom() + e.left(), Vector3::zeros());
        assert_eq!(e.incoming(BoardCorner::TopLeft), e.left());
        assert_eq!(e.outgoing(BoardCorner::TopLeft), e.top());
    }

    #[test]
    fn corner_normals_agree_on_a_flat_square() {
        let e = QuadEdges::from_positions(&unit_square());
        for n in e.corner_normals(1e-9) {
            assert_relative_eq!(n.expect("normal"), -Vector3::y(), epsilon = 1e-12);
        }
    }

    #[test]
    fn coincident_corners_drop_their_normals() {
        let mut p = unit_square();
        p[1] = p[0];
        let e = QuadEdges::from_positions(&p);
        let normals = e.corner_normals(1e-9);
        assert!(normals[BoardCorner::TopLeft.index()].is_none());
        assert!(normals[BoardCorner::TopRight.index()].is_none());
        assert!(normals[BoardCorner::BottomRight.index()].is_some());
    }

    #[test]
    fn tiny_quads_keep_their_corner_normals() {
        let p = unit_square().map(|q| Point3::from(q.coords * 1e-6));
        let e = QuadEdges::from_positions(&p);
        for n in e.corner_normals(1e-9) {
            assert_relative_eq!(n.expect("normal"), -Vector3::y(), epsilon = 1e-9);
        }
    }

    #[test]
    fn average_ignores_missing_normals() {
        let n = average_normal(&[None, Some(Vector3::z()), None, Some(Vector3::z())], 1e-9);
        assert_eq!(n, Some(Vector3::z()));
        assert_eq!(average_normal(&[None; 4], 1e-9), None);
    }

    #[test]
    fn opposing_normals_cancel_to_none() {
        let n = average_normal(&[Some(Vector3::z()), Some(-Vector3::z()), None, None], 1e-9);
        assert!(n.is_none());
    }

    #[test]
    fn basis_removes_skew_and_stays_right_handed() {
        let across = Vector3::new(2.0, 0.0, 0.0);
        let down = Vector3::new(0.3, 0.0, 1.5);
        let b = edge_basis(&across, &down, &Vector3::y(), 1e-9).expect("basis");
        assert_relative_eq!(b.x, Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(b.y_down, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(b.normal, -Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(b.x.cross(&b.y_down), b.normal, epsilon = 1e-12);
    }

    #[test]
    fn parallel_edges_are_degenerate() {
        let err = edge_basis(
            &Vector3::x(),
            &Vector3::new(2.0, 0.0, 0.0),
            &Vector3::y(),
            1e-9,
        )
        .unwrap_err();
        assert_eq!(err, DegenerateReason::CollinearCorners);
    }
}
