//! JSON recordings, replay configuration and replay reports.

use crate::{EstimateStatus, SurfaceIoError, SurfaceParams};
use ar_board_core::{CornerLayout, DebugSegment, PlanePose, RenderTransform, TrackedMarker};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Read any JSON document (params, layouts, recordings) from disk.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, SurfaceIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), SurfaceIoError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Tracker output for one rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingFrame {
    #[serde(default)]
    pub timestamp_ms: Option<f64>,
    pub markers: Vec<TrackedMarker>,
}

/// A captured sequence of tracker frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecording {
    /// Layout the recording was captured with, if known.
    #[serde(default)]
    pub layout: Option<CornerLayout>,
    pub frames: Vec<TrackingFrame>,
}

impl TrackingRecording {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SurfaceIoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SurfaceIoError> {
        write_json(self, path)
    }
}

/// Configuration for replaying a recording through the estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceReplayConfig {
    pub recording_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: Option<SurfaceParams>,
    #[serde(default)]
    pub layout: Option<CornerLayout>,
    /// Include debug overlay segments in the report.
    #[serde(default)]
    pub overlay: bool,
}

impl SurfaceReplayConfig {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SurfaceIoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SurfaceIoError> {
        write_json(self, path)
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("surface_replay_report.json"))
    }

    /// Config layout, else the recording's, else the default barcode layout.
    pub fn resolve_layout(&self, recording: &TrackingRecording) -> CornerLayout {
        self.layout.or(recording.layout).unwrap_or_default()
    }

    pub fn build_params(&self) -> SurfaceParams {
        self.params.clone().unwrap_or_default()
    }
}

/// Estimator output for one replayed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub index: usize,
    #[serde(default)]
    pub timestamp_ms: Option<f64>,
    pub status: EstimateStatus,
    pub pose: PlanePose,
    #[serde(default)]
    pub render: Option<RenderTransform>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlay: Vec<DebugSegment>,
}

/// Frame counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub frames: usize,
    pub tracked: usize,
    pub hidden: usize,
    pub held: usize,
    pub degenerate: usize,
}

impl ReplaySummary {
    pub fn record(&mut self, status: &EstimateStatus) {
        self.frames += 1;
        match status {
            EstimateStatus::Tracked => self.tracked += 1,
            EstimateStatus::Hidden { .. } => self.hidden += 1,
            EstimateStatus::Held { .. } => self.held += 1,
            EstimateStatus::Degenerate { .. } => self.degenerate += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceReplayReport {
    #[serde(default)]
    pub recording_path: Option<String>,
    pub layout: CornerLayout,
    pub params: SurfaceParams,
    pub summary: ReplaySummary,
    pub frames: Vec<FrameReport>,
}

impl SurfaceReplayReport {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SurfaceIoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SurfaceIoError> {
        write_json(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("replay.json");
        let cfg = SurfaceReplayConfig {
            recording_path: "frames.json".to_string(),
            output_path: None,
            params: None,
            layout: Some(CornerLayout::new([1, 2, 3, 4]).expect("layout")),
            overlay: true,
        };
        cfg.write_json(&path).expect("write");
        let loaded = SurfaceReplayConfig::load_json(&path).expect("load");
        assert_eq!(loaded.layout, cfg.layout);
        assert!(loaded.overlay);
        assert_eq!(loaded.output_path(), PathBuf::from("surface_replay_report.json"));
    }

    #[test]
    fn layout_resolution_prefers_config_then_recording() {
        let recording = TrackingRecording {
            layout: Some(CornerLayout::new([5, 6, 7, 8]).expect("layout")),
            frames: Vec::new(),
        };
        let mut cfg: SurfaceReplayConfig =
            serde_json::from_str(r#"{ "recording_path": "x.json" }"#).expect("parse");
        assert_eq!(cfg.resolve_layout(&recording).top_left, 5);
        cfg.layout = Some(CornerLayout::default());
        assert_eq!(cfg.resolve_layout(&recording).top_left, 34);
        assert_eq!(
            cfg.resolve_layout(&TrackingRecording {
                layout: None,
                frames: Vec::new()
            }),
            CornerLayout::default()
        );
    }

    #[test]
    fn recording_parses_minimal_frames() {
        let json = r#"{
            "frames": [
                { "markers": [ { "id": 34, "position": [0.0, 0.0, 0.0], "visible": true } ] },
                { "timestamp_ms": 16.7, "markers": [] }
            ]
        }"#;
        let rec: TrackingRecording = serde_json::from_str(json).expect("parse");
        assert_eq!(rec.frames.len(), 2);
        assert_eq!(rec.frames[0].markers[0].position, Point3::origin());
        assert_eq!(rec.frames[1].timestamp_ms, Some(16.7));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = TrackingRecording::load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SurfaceIoError::Io(_)));
    }
}
