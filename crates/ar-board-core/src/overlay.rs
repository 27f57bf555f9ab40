use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// 24-bit `0xRRGGBB` color, the format renderers take for line materials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const RED: Rgb = Rgb(0xff0000);
    pub const GREEN: Rgb = Rgb(0x00ff00);
    pub const BLUE: Rgb = Rgb(0x0000ff);
    pub const CYAN: Rgb = Rgb(0x00ffff);
    pub const MAGENTA: Rgb = Rgb(0xff00ff);
    pub const YELLOW: Rgb = Rgb(0xffff00);
    pub const ORANGE: Rgb = Rgb(0xff8800);

    /// Components normalized to `[0, 1]`.
    pub fn to_unit_rgb(self) -> [f32; 3] {
        let r = (self.0 >> 16) & 0xff;
        let g = (self.0 >> 8) & 0xff;
        let b = self.0 & 0xff;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}

/// One colored line segment of a debug overlay, in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DebugSegment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub color: Rgb,
}

impl DebugSegment {
    pub fn new(start: Point3<f64>, end: Point3<f64>, color: Rgb) -> Self {
        Self { start, end, color }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// `[x0, y0, z0, x1, y1, z1]`, the layout of a two-vertex line buffer.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.start.x,
            self.start.y,
            self.start.z,
            self.end.x,
            self.end.y,
            self.end.z,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_rgb_splits_channels() {
        assert_eq!(Rgb::ORANGE.to_unit_rgb(), [1.0, 136.0 / 255.0, 0.0]);
    }

    #[test]
    fn segment_buffer_layout() {
        let s = DebugSegment::new(Point3::new(1.0, 2.0, 3.0), Point3::new(1.0, 2.0, 7.0), Rgb::RED);
        assert_eq!(s.to_array(), [1.0, 2.0, 3.0, 1.0, 2.0, 7.0]);
        assert_eq!(s.length(), 4.0);
    }
}
