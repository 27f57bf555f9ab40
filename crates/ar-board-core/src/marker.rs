use crate::{BoardCorner, QuadError};
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// One tracked marker at one board corner, as seen in the current frame.
///
/// Positions are world-space and only meaningful while `visible` is set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSample {
    pub corner: BoardCorner,
    pub position: Point3<f64>,
    pub visible: bool,
}

impl MarkerSample {
    pub fn visible(corner: BoardCorner, position: Point3<f64>) -> Self {
        Self {
            corner,
            position,
            visible: true,
        }
    }

    pub fn hidden(corner: BoardCorner) -> Self {
        Self {
            corner,
            position: Point3::origin(),
            visible: false,
        }
    }

    /// Build a sample from a marker's world matrix (translation column).
    pub fn from_world_matrix(corner: BoardCorner, world: &Matrix4<f64>, visible: bool) -> Self {
        Self {
            corner,
            position: Point3::new(world[(0, 3)], world[(1, 3)], world[(2, 3)]),
            visible,
        }
    }
}

/// The four board corners of one frame, stored in cyclic corner order.
///
/// Construction validates that every corner identity occurs exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MarkerSample>", into = "Vec<MarkerSample>")]
pub struct MarkerQuad {
    samples: [MarkerSample; 4],
}

impl MarkerQuad {
    /// Assemble a quad from an unordered slice of samples.
    pub fn from_samples(samples: &[MarkerSample]) -> Result<Self, QuadError> {
        if samples.len() != 4 {
            log::warn!(
                "marker quad needs 4 samples, caller passed {}",
                samples.len()
            );
            return Err(QuadError::WrongSampleCount { got: samples.len() });
        }

        let mut slots: [Option<MarkerSample>; 4] = [None; 4];
        for s in samples {
            let slot = &mut slots[s.corner.index()];
            if slot.is_some() {
                log::warn!("marker quad received corner {} twice", s.corner);
                return Err(QuadError::DuplicateCorner(s.corner));
            }
            *slot = Some(*s);
        }

        let mut out = [MarkerSample::hidden(BoardCorner::TopLeft); 4];
        for corner in BoardCorner::ALL {
            out[corner.index()] = slots[corner.index()].ok_or(QuadError::MissingCorner(corner))?;
        }
        Ok(Self { samples: out })
    }

    /// Fully visible quad from positions in cyclic order (TL, TR, BR, BL).
    pub fn from_positions(positions: [Point3<f64>; 4]) -> Self {
        let samples = BoardCorner::ALL.map(|c| MarkerSample::visible(c, positions[c.index()]));
        Self { samples }
    }

    #[inline]
    pub fn sample(&self, corner: BoardCorner) -> &MarkerSample {
        &self.samples[corner.index()]
    }

    #[inline]
    pub fn position(&self, corner: BoardCorner) -> Point3<f64> {
        self.samples[corner.index()].position
    }

    /// Corner positions in cyclic order.
    pub fn positions(&self) -> [Point3<f64>; 4] {
        self.samples.map(|s| s.position)
    }

    pub fn samples(&self) -> &[MarkerSample; 4] {
        &self.samples
    }

    /// First corner (in cyclic order) whose marker is not visible.
    pub fn first_hidden(&self) -> Option<BoardCorner> {
        self.samples.iter().find(|s| !s.visible).map(|s| s.corner)
    }

    pub fn all_visible(&self) -> bool {
        self.first_hidden().is_none()
    }

    /// Copy of this quad with one corner's marker marked as not visible.
    pub fn with_hidden(mut self, corner: BoardCorner) -> Self {
        self.samples[corner.index()].visible = false;
        self
    }

    /// Copy of this quad with every position shifted by `offset`.
    pub fn translated(mut self, offset: Vector3<f64>) -> Self {
        for s in &mut self.samples {
            s.position += offset;
        }
        self
    }
}

impl TryFrom<Vec<MarkerSample>> for MarkerQuad {
    type Error = QuadError;

    fn try_from(samples: Vec<MarkerSample>) -> Result<Self, Self::Error> {
        Self::from_samples(&samples)
    }
}

impl From<MarkerQuad> for Vec<MarkerSample> {
    fn from(quad: MarkerQuad) -> Self {
        quad.samples.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(corner: BoardCorner, x: f64) -> MarkerSample {
        MarkerSample::visible(corner, Point3::new(x, 0.0, 0.0))
    }

    #[test]
    fn orders_samples_by_corner() {
        let quad = MarkerQuad::from_samples(&[
            sample(BoardCorner::BottomLeft, 3.0),
            sample(BoardCorner::TopRight, 1.0),
            sample(BoardCorner::TopLeft, 0.0),
            sample(BoardCorner::BottomRight, 2.0),
        ])
        .expect("valid quad");

        for c in BoardCorner::ALL {
            assert_eq!(quad.sample(c).corner, c);
            assert_eq!(quad.position(c).x, c.index() as f64);
        }
        assert!(quad.all_visible());
    }

    #[test]
    fn rejects_wrong_count() {
        let err = MarkerQuad::from_samples(&[sample(BoardCorner::TopLeft, 0.0)]).unwrap_err();
        assert_eq!(err, QuadError::WrongSampleCount { got: 1 });
    }

    #[test]
    fn rejects_duplicate_corner() {
        let err = MarkerQuad::from_samples(&[
            sample(BoardCorner::TopLeft, 0.0),
            sample(BoardCorner::TopLeft, 1.0),
            sample(BoardCorner::BottomRight, 2.0),
            sample(BoardCorner::BottomLeft, 3.0),
        ])
        .unwrap_err();
        assert_eq!(err, QuadError::DuplicateCorner(BoardCorner::TopLeft));
    }

    #[test]
    fn world_matrix_translation_becomes_position() {
        let mut world = Matrix4::<f64>::identity();
        world[(0, 3)] = 1.5;
        world[(1, 3)] = -2.0;
        world[(2, 3)] = 0.25;
        let s = MarkerSample::from_world_matrix(BoardCorner::TopRight, &world, true);
        assert_eq!(s.position, Point3::new(1.5, -2.0, 0.25));
        assert!(s.visible);
    }

    #[test]
    fn first_hidden_reports_cyclic_order() {
        let quad = MarkerQuad::from_positions([Point3::origin(); 4])
            .with_hidden(BoardCorner::BottomLeft)
            .with_hidden(BoardCorner::TopRight);
        assert_eq!(quad.first_hidden(), Some(BoardCorner::TopRight));
    }

    #[test]
    fn json_array_is_validated() {
        let json = r#"[
            {"corner":"top_left","position":[0.0,0.0,0.0],"visible":true},
            {"corner":"top_right","position":[1.0,0.0,0.0],"visible":true},
            {"corner":"top_right","position":[1.0,0.0,1.0],"visible":true},
            {"corner":"bottom_left","position":[0.0,0.0,1.0],"visible":true}
        ]"#;
        assert!(serde_json::from_str::<MarkerQuad>(json).is_err());
    }
}
