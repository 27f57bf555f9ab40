use ar_board_core::QuadError;

/// Errors returned by the surface estimator entry points.
#[derive(thiserror::Error, Debug)]
pub enum SurfaceError {
    #[error(transparent)]
    Quad(#[from] QuadError),
    #[error("frame {frame}: {source}")]
    Frame {
        frame: usize,
        #[source]
        source: QuadError,
    },
}

/// Errors from reading or writing replay configs, recordings and reports.
#[derive(thiserror::Error, Debug)]
pub enum SurfaceIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
