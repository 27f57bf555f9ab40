use crate::{BoardCorner, MarkerQuad, MarkerSample, QuadError};
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

/// A marker reported by the tracker, identified by its barcode/pattern id.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackedMarker {
    pub id: u32,
    pub position: Point3<f64>,
    pub visible: bool,
}

impl TrackedMarker {
    /// Build from the marker's world matrix (translation column).
    pub fn from_world_matrix(id: u32, world: &Matrix4<f64>, visible: bool) -> Self {
        Self {
            id,
            position: Point3::new(world[(0, 3)], world[(1, 3)], world[(2, 3)]),
            visible,
        }
    }
}

/// Assignment of tracker marker ids to the four board corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerLayout {
    pub top_left: u32,
    pub top_right: u32,
    pub bottom_right: u32,
    pub bottom_left: u32,
}

impl Default for CornerLayout {
    /// Barcode markers 34/36/32/38 at TL/TR/BR/BL.
    fn default() -> Self {
        Self {
            top_left: 34,
            top_right: 36,
            bottom_right: 32,
            bottom_left: 38,
        }
    }
}

impl CornerLayout {
    /// Build a layout from ids in cyclic corner order (TL, TR, BR, BL).
    pub fn new(ids: [u32; 4]) -> Result<Self, QuadError> {
        let layout = Self {
            top_left: ids[0],
            top_right: ids[1],
            bottom_right: ids[2],
            bottom_left: ids[3],
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Marker ids in cyclic corner order.
    pub fn ids(&self) -> [u32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn marker_id(&self, corner: BoardCorner) -> u32 {
        self.ids()[corner.index()]
    }

    pub fn corner_of(&self, id: u32) -> Option<BoardCorner> {
        BoardCorner::ALL
            .into_iter()
            .find(|c| self.marker_id(*c) == id)
    }

    /// Check that every corner has a distinct marker id.
    pub fn validate(&self) -> Result<(), QuadError> {
        let ids = self.ids();
        for (k, id) in ids.iter().enumerate() {
            if ids[..k].contains(id) {
                return Err(QuadError::DuplicateMarkerId { id: *id });
            }
        }
        Ok(())
    }

    /// Map one frame of tracked markers onto the board corners.
    ///
    /// Markers whose id is not part of the layout are ignored. A layout id
    /// that is absent from the frame yields a hidden corner.
    pub fn quad_from_tracked(&self, markers: &[TrackedMarker]) -> Result<MarkerQuad, QuadError> {
        self.validate()?;

        let mut samples = BoardCorner::ALL.map(MarkerSample::hidden);
        let mut seen = [false; 4];
        for m in markers {
            let Some(corner) = self.corner_of(m.id) else {
                continue;
            };
            if seen[corner.index()] {
                log::warn!("marker {} reported twice in one frame", m.id);
                return Err(QuadError::DuplicateTrackedMarker { id: m.id });
            }
            seen[corner.index()] = true;
            samples[corner.index()] = MarkerSample {
                corner,
                position: m.position,
                visible: m.visible,
            };
        }

        MarkerQuad::from_samples(&samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: u32, x: f64) -> TrackedMarker {
        TrackedMarker {
            id,
            position: Point3::new(x, 0.0, 0.0),
            visible: true,
        }
    }

    #[test]
    fn default_layout_assigns_barcodes() {
        let layout = CornerLayout::default();
        assert_eq!(layout.corner_of(34), Some(BoardCorner::TopLeft));
        assert_eq!(layout.corner_of(36), Some(BoardCorner::TopRight));
        assert_eq!(layout.corner_of(32), Some(BoardCorner::BottomRight));
        assert_eq!(layout.corner_of(38), Some(BoardCorner::BottomLeft));
        assert_eq!(layout.corner_of(30), None);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        assert_eq!(
            CornerLayout::new([1, 2, 1, 4]).unwrap_err(),
            QuadError::DuplicateMarkerId { id: 1 }
        );
    }

    #[test]
    fn unknown_markers_ignored_and_absent_ones_hidden() {
        let layout = CornerLayout::default();
        let markers = [marker(42, 9.0), marker(34, 0.0), marker(36, 1.0), marker(32, 2.0)];
        let quad = layout.quad_from_tracked(&markers).expect("quad");
        assert_eq!(quad.first_hidden(), Some(BoardCorner::BottomLeft));
        assert_eq!(quad.position(BoardCorner::TopRight).x, 1.0);
    }

    #[test]
    fn repeated_marker_in_frame_is_an_error() {
        let layout = CornerLayout::default();
        let err = layout
            .quad_from_tracked(&[marker(34, 0.0), marker(34, 1.0)])
            .unwrap_err();
        assert_eq!(err, QuadError::DuplicateTrackedMarker { id: 34 });
    }
}
