//! File-driven replay: recordings and configs on disk in, JSON reports out.

use crate::surface::{
    read_json, replay_recording, SurfaceError, SurfaceIoError, SurfaceReplayConfig,
    SurfaceReplayReport, TrackingRecording,
};
use crate::{CornerLayout, SurfaceParams};
use log::{info, LevelFilter};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

/// Errors from the file-driven helpers.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("{path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: SurfaceIoError,
    },
    #[error("writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: SurfaceIoError,
    },
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, RunError> {
    read_json(path).map_err(|source| RunError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Default params and layout, as one JSON document a user can edit.
#[derive(Debug, Serialize)]
pub struct Defaults {
    pub params: SurfaceParams,
    pub layout: CornerLayout,
}

pub fn defaults_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Defaults {
        params: SurfaceParams::default(),
        layout: CornerLayout::default(),
    })
}

/// Replay a recording, with optional params/layout files overriding the
/// defaults (and the layout stored in the recording).
pub fn replay_files(
    recording_path: &Path,
    params_path: Option<&Path>,
    layout_path: Option<&Path>,
    overlay: bool,
) -> Result<SurfaceReplayReport, RunError> {
    let recording: TrackingRecording = load(recording_path)?;
    let params = match params_path {
        Some(p) => load(p)?,
        None => SurfaceParams::default(),
    };
    let layout = match layout_path {
        Some(p) => load(p)?,
        None => recording.layout.unwrap_or_default(),
    };

    let mut report = replay_recording(&recording, &layout, params, overlay)?;
    report.recording_path = Some(recording_path.to_string_lossy().into_owned());
    Ok(report)
}

/// Run a replay described by a [`SurfaceReplayConfig`] file and write the
/// report. Relative paths inside the config resolve against its directory.
///
/// Returns the report and the path it was written to.
pub fn run_config(config_path: &Path) -> Result<(SurfaceReplayReport, PathBuf), RunError> {
    let cfg: SurfaceReplayConfig = load(config_path)?;
    let base = config_path.parent().unwrap_or_else(|| Path::new("."));

    let recording_path = base.join(&cfg.recording_path);
    let recording: TrackingRecording = load(&recording_path)?;
    let layout = cfg.resolve_layout(&recording);

    let mut report = replay_recording(&recording, &layout, cfg.build_params(), cfg.overlay)?;
    report.recording_path = Some(cfg.recording_path.clone());

    let output_path = base.join(cfg.output_path());
    report
        .write_json(&output_path)
        .map_err(|source| RunError::Write {
            path: output_path.clone(),
            source,
        })?;
    info!("report written to {}", output_path.display());
    Ok((report, output_path))
}

/// Install logging for the CLI.
///
/// With the `tracing` feature, `log` records are bridged into a `tracing`
/// subscriber filtered by `RUST_LOG`; otherwise the stderr logger is used.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::EnvFilter;
        let _ = tracing_log::LogTracer::init_with_filter(level);
        let default = if verbose { "debug" } else { "info" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = crate::core::init_with_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_document_contains_params_and_layout() {
        let json = defaults_json().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["layout"]["top_left"], 34);
        assert_eq!(value["params"]["extent_policy"], "single_edge");
        assert_eq!(value["params"]["render_scale"], 1.2);
    }

    #[test]
    fn missing_recording_names_the_path() {
        let path = Path::new("no/such/recording.json");
        let err = replay_files(path, None, None, false).unwrap_err();
        assert!(err.to_string().contains("no/such/recording.json"), "{err}");
        assert!(matches!(
            err,
            RunError::Load {
                source: SurfaceIoError::Io(_),
                ..
            }
        ));
    }

    #[test]
    fn malformed_params_file_is_a_load_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let recording = dir.path().join("recording.json");
        let params = dir.path().join("params.json");
        std::fs::write(&recording, r#"{ "frames": [] }"#).expect("write recording");
        std::fs::write(&params, r#"{ "render_scale": "big" }"#).expect("write params");

        let err = replay_files(&recording, Some(params.as_path()), None, false).unwrap_err();
        match err {
            RunError::Load { path, source } => {
                assert_eq!(path, params);
                assert!(matches!(source, SurfaceIoError::Json(_)));
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
