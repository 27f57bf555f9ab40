use crate::BoardCorner;

/// Caller contract violations when assembling the four board corners.
///
/// These indicate wiring bugs upstream of the estimator (wrong number of
/// samples, mislabeled markers), never a runtime tracking condition.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QuadError {
    #[error("expected exactly 4 marker samples, got {got}")]
    WrongSampleCount { got: usize },
    #[error("corner {0} supplied more than once")]
    DuplicateCorner(BoardCorner),
    #[error("corner {0} missing from the marker samples")]
    MissingCorner(BoardCorner),
    #[error("marker id {id} appears more than once in the layout")]
    DuplicateMarkerId { id: u32 },
    #[error("marker id {id} reported more than once in one frame")]
    DuplicateTrackedMarker { id: u32 },
}
