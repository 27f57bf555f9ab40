use serde::{Deserialize, Serialize};

/// How the plane's width and height are measured from the corner quad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtentPolicy {
    /// Width = |TL->TR|, height = |TL->BL|.
    ///
    /// Cheap and anchored to the measured top-left corner, but a single
    /// noisy marker on those two edges skews the extents.
    #[default]
    SingleEdge,
    /// Width = mean of top and bottom edge lengths, height = mean of the
    /// left and right edge lengths. Absorbs asymmetric tracking error.
    OppositeEdgeMean,
}

/// Where the plane center is placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterPolicy {
    /// Top-left corner offset by half the extents along the in-plane axes.
    #[default]
    CornerAnchored,
    /// Arithmetic mean of the four corners.
    Centroid,
}

/// What to emit when the quad is degenerate (coincident or collinear corners).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Re-emit the last valid pose, or an invalid pose if there is none.
    #[default]
    HoldLast,
    /// Emit an invalid pose.
    Invalidate,
}

/// Configuration for [`crate::SurfaceEstimator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    pub extent_policy: ExtentPolicy,
    pub center_policy: CenterPolicy,
    pub degenerate_policy: DegeneratePolicy,
    /// Edges with norm at or below this value are treated as zero-length.
    /// Corner cross products are compared against its square. World units,
    /// typically meters.
    pub min_edge_length: f64,
    /// Distance the center is pushed along `-normal`, to seat the rendered
    /// plane on a board of known thickness. World units.
    pub seat_offset: f64,
    /// Presentation overshoot of the rendered quad, applied to
    /// [`crate::SurfaceEstimate::render`]. 1.0 = exact fit.
    pub render_scale: f64,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            extent_policy: ExtentPolicy::SingleEdge,
            center_policy: CenterPolicy::CornerAnchored,
            degenerate_policy: DegeneratePolicy::HoldLast,
            min_edge_length: 1e-9,
            seat_offset: 0.0,
            render_scale: 1.2,
        }
    }
}

impl SurfaceParams {
    /// Replace non-finite or negative tolerances with their defaults.
    pub(crate) fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.min_edge_length.is_finite() || self.min_edge_length < 0.0 {
            log::warn!(
                "min_edge_length {} is not usable, falling back to {}",
                self.min_edge_length,
                defaults.min_edge_length
            );
            self.min_edge_length = defaults.min_edge_length;
        }
        if !self.seat_offset.is_finite() {
            self.seat_offset = defaults.seat_offset;
        }
        if !self.render_scale.is_finite() || self.render_scale <= 0.0 {
            self.render_scale = defaults.render_scale;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "extent_policy": "opposite_edge_mean", "seat_offset": 0.01 }"#;
        let params: SurfaceParams = serde_json::from_str(json).expect("parse");
        assert_eq!(params.extent_policy, ExtentPolicy::OppositeEdgeMean);
        assert_eq!(params.seat_offset, 0.01);
        assert_eq!(params.center_policy, CenterPolicy::CornerAnchored);
        assert_eq!(params.render_scale, 1.2);
    }

    #[test]
    fn sanitize_repairs_bad_values() {
        let params = SurfaceParams {
            min_edge_length: f64::NAN,
            render_scale: -1.0,
            seat_offset: f64::INFINITY,
            ..SurfaceParams::default()
        }
        .sanitized();
        assert_eq!(params, SurfaceParams::default());
    }
}
