use crate::io::{FrameReport, ReplaySummary, SurfaceReplayReport, TrackingRecording};
use crate::{SurfaceError, SurfaceEstimator, SurfaceParams};
use ar_board_core::CornerLayout;
use log::info;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Run every frame of `recording` through a fresh estimator, in order.
///
/// A frame that cannot be mapped onto the layout (duplicate marker ids)
/// aborts the replay with the frame index attached.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(frames = recording.frames.len()))
)]
pub fn replay_recording(
    recording: &TrackingRecording,
    layout: &CornerLayout,
    params: SurfaceParams,
    with_overlay: bool,
) -> Result<SurfaceReplayReport, SurfaceError> {
    layout.validate()?;
    let mut estimator = SurfaceEstimator::new(params);
    let mut summary = ReplaySummary::default();
    let mut frames = Vec::with_capacity(recording.frames.len());

    for (index, frame) in recording.frames.iter().enumerate() {
        let quad = layout
            .quad_from_tracked(&frame.markers)
            .map_err(|source| SurfaceError::Frame { frame: index, source })?;
        let (estimate, overlay) = if with_overlay {
            estimator.estimate_with_overlay(&quad)
        } else {
            (estimator.estimate(&quad), Vec::new())
        };
        summary.record(&estimate.status);
        frames.push(FrameReport {
            index,
            timestamp_ms: frame.timestamp_ms,
            status: estimate.status,
            pose: estimate.pose,
            render: estimate.render,
            overlay,
        });
    }

    info!(
        "replayed {} frames: {} tracked, {} hidden, {} held, {} degenerate",
        summary.frames, summary.tracked, summary.hidden, summary.held, summary.degenerate
    );

    Ok(SurfaceReplayReport {
        recording_path: None,
        layout: *layout,
        params: estimator.params().clone(),
        summary,
        frames,
    })
}
