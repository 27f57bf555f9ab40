use nalgebra::{Matrix3, Point3, Rotation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Oriented, scaled plane coincident with the physical board.
///
/// When `valid` is `false` the geometric fields carry no meaning and must
/// not be rendered; they are kept zeroed so that no consumer ever sees a
/// non-finite value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanePose {
    pub center: Point3<f64>,
    /// Unit vector along the board's top edge (left to right).
    pub x_axis: Vector3<f64>,
    /// Unit vector in the board plane, orthogonal to `x_axis`.
    pub y_axis: Vector3<f64>,
    /// Unit plane normal, `x_axis × y_axis`, with non-negative `y`.
    pub normal: Vector3<f64>,
    pub width: f64,
    pub height: f64,
    pub valid: bool,
}

impl PlanePose {
    /// Invalid pose with all-zero geometry.
    pub fn invalid() -> Self {
        Self {
            center: Point3::origin(),
            x_axis: Vector3::zeros(),
            y_axis: Vector3::zeros(),
            normal: Vector3::zeros(),
            width: 0.0,
            height: 0.0,
            valid: false,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// `true` if every numeric field is finite.
    pub fn is_finite(&self) -> bool {
        self.center.coords.iter().all(|v| v.is_finite())
            && self.x_axis.iter().all(|v| v.is_finite())
            && self.y_axis.iter().all(|v| v.is_finite())
            && self.normal.iter().all(|v| v.is_finite())
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Orientation matrix with columns `(x_axis, y_axis, normal)`.
    pub fn basis_matrix(&self) -> Option<Matrix3<f64>> {
        self.valid
            .then(|| Matrix3::from_columns(&[self.x_axis, self.y_axis, self.normal]))
    }

    /// Map into a renderer transform for a unit quad.
    ///
    /// `scale` oversizes the quad relative to the marker quadrilateral
    /// (1.0 = exact fit).
    pub fn render_transform(&self, scale: f64) -> Option<RenderTransform> {
        let basis = self.basis_matrix()?;
        let rotation = Rotation3::from_matrix_unchecked(basis);
        Some(RenderTransform {
            position: self.center,
            rotation: UnitQuaternion::from_rotation_matrix(&rotation),
            scale: Vector3::new(self.width * scale, self.height * scale, 1.0),
        })
    }

    /// Point on the plane at board-local coordinates `(u, v)`, where
    /// `(0, 0)` is the center and `(±0.5, ±0.5)` the nominal corners.
    pub fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        self.center + self.x_axis * (u * self.width) + self.y_axis * (v * self.height)
    }
}

impl Default for PlanePose {
    fn default() -> Self {
        Self::invalid()
    }
}

/// Position, orientation and non-uniform scale handed to a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderTransform {
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
    pub scale: Vector3<f64>,
}
