//! WebAssembly bindings for the board surface estimator.
//!
//! The browser render loop owns one `SurfaceEstimatorJs` and feeds it the
//! tracker output every frame:
//!
//! ```js
//! const est = new SurfaceEstimatorJs();            // default params
//! const out = est.estimateTracked(markers);         // [{ id, position: [x,y,z], visible }]
//! if (out.pose.valid) {
//!   mesh.matrix.fromArray(est.lastRenderMatrix());  // column-major 4x4
//! }
//! ```
//!
//! Structured values cross the boundary as plain JS objects (serde), with
//! the same field names as the JSON reports of the `ar-board` CLI.

use ar_board_core::{
    BoardCorner, CornerLayout, MarkerQuad, MarkerSample, RenderTransform, TrackedMarker,
};
use ar_board_surface::{SurfaceEstimate, SurfaceEstimator, SurfaceParams};
use js_sys::Float64Array;
use nalgebra::{Matrix4, Point3};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("invalid {what}: {e}")))
}

fn optional<T: serde::de::DeserializeOwned + Default>(
    value: Option<JsValue>,
    what: &str,
) -> Result<T, JsError> {
    match value {
        Some(v) if !v.is_undefined() && !v.is_null() => from_js(v, what),
        _ => Ok(T::default()),
    }
}

/// Build a quad from 12 packed coordinates (TL, TR, BR, BL) and 4
/// visibility bytes.
pub fn quad_from_flat(positions: &[f64], visible: &[u8]) -> Result<MarkerQuad, String> {
    if positions.len() != 12 || visible.len() != 4 {
        return Err(format!(
            "expected 12 coordinates and 4 visibility flags, got {} and {}",
            positions.len(),
            visible.len()
        ));
    }
    let samples: Vec<MarkerSample> = BoardCorner::ALL
        .iter()
        .map(|&corner| {
            let i = corner.index();
            let p = &positions[3 * i..3 * i + 3];
            MarkerSample {
                corner,
                position: Point3::new(p[0], p[1], p[2]),
                visible: visible[i] != 0,
            }
        })
        .collect();
    MarkerQuad::from_samples(&samples).map_err(|e| e.to_string())
}

/// Column-major translation * rotation * scale, ready for `Matrix4.fromArray`.
pub fn render_matrix(render: &RenderTransform) -> [f64; 16] {
    let m = Matrix4::new_translation(&render.position.coords)
        * render.rotation.to_homogeneous()
        * Matrix4::new_nonuniform_scaling(&render.scale);
    let mut out = [0.0; 16];
    out.copy_from_slice(m.as_slice());
    out
}

#[wasm_bindgen]
pub struct SurfaceEstimatorJs {
    inner: SurfaceEstimator,
    layout: CornerLayout,
    last: Option<SurfaceEstimate>,
}

#[wasm_bindgen]
impl SurfaceEstimatorJs {
    /// `params` and `layout` are optional; defaults apply when omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(
        params: Option<JsValue>,
        layout: Option<JsValue>,
    ) -> Result<SurfaceEstimatorJs, JsError> {
        let params: SurfaceParams = optional(params, "params")?;
        let layout: CornerLayout = optional(layout, "layout")?;
        layout.validate()?;
        Ok(Self {
            inner: SurfaceEstimator::new(params),
            layout,
            last: None,
        })
    }

    #[wasm_bindgen(js_name = defaultParams)]
    pub fn default_params() -> Result<JsValue, JsError> {
        to_js(&SurfaceParams::default())
    }

    pub fn params(&self) -> Result<JsValue, JsError> {
        to_js(self.inner.params())
    }

    pub fn layout(&self) -> Result<JsValue, JsError> {
        to_js(&self.layout)
    }

    /// Estimate from an array of `{ corner, position, visible }` samples.
    pub fn estimate(&mut self, samples: JsValue) -> Result<JsValue, JsError> {
        let samples: Vec<MarkerSample> = from_js(samples, "samples")?;
        let estimate = self.inner.estimate_samples(&samples)?;
        self.finish(estimate)
    }

    /// Estimate from tracker markers keyed by id, using the configured layout.
    #[wasm_bindgen(js_name = estimateTracked)]
    pub fn estimate_tracked(&mut self, markers: JsValue) -> Result<JsValue, JsError> {
        let markers: Vec<TrackedMarker> = from_js(markers, "markers")?;
        let estimate = self.inner.estimate_tracked(&self.layout, &markers)?;
        self.finish(estimate)
    }

    /// Allocation-light path: 12 packed coordinates plus 4 visibility bytes.
    #[wasm_bindgen(js_name = estimatePositions)]
    pub fn estimate_positions(
        &mut self,
        positions: &[f64],
        visible: &[u8],
    ) -> Result<JsValue, JsError> {
        let quad = quad_from_flat(positions, visible).map_err(|e| JsError::new(&e))?;
        let estimate = self.inner.estimate(&quad);
        self.finish(estimate)
    }

    /// Returns `{ estimate, overlay }` for tracker markers keyed by id.
    #[wasm_bindgen(js_name = estimateWithOverlay)]
    pub fn estimate_with_overlay(&mut self, markers: JsValue) -> Result<JsValue, JsError> {
        #[derive(Serialize)]
        struct Out<'a> {
            estimate: &'a SurfaceEstimate,
            overlay: &'a [ar_board_core::DebugSegment],
        }

        let markers: Vec<TrackedMarker> = from_js(markers, "markers")?;
        let quad = self.layout.quad_from_tracked(&markers)?;
        let (estimate, overlay) = self.inner.estimate_with_overlay(&quad);
        self.last = Some(estimate);
        to_js(&Out {
            estimate: &estimate,
            overlay: &overlay,
        })
    }

    /// Render matrix of the last estimate, or `undefined` when it had no
    /// valid pose.
    #[wasm_bindgen(js_name = lastRenderMatrix)]
    pub fn last_render_matrix(&self) -> Option<Float64Array> {
        let render = self.last.as_ref()?.render?;
        Some(Float64Array::from(&render_matrix(&render)[..]))
    }

    /// Forget the held pose, e.g. when the AR session restarts.
    pub fn reset(&mut self) {
        self.inner.reset();
        self.last = None;
    }
}

impl SurfaceEstimatorJs {
    fn finish(&mut self, estimate: SurfaceEstimate) -> Result<JsValue, JsError> {
        self.last = Some(estimate);
        to_js(&estimate)
    }
}
