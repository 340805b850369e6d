use thiserror::Error;

/// Error raised when a batch cannot be post-processed.
///
/// Every variant is a caller-input contract violation. Processing stops at
/// the first one; no partial results are returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessInferenceResultError {
    #[error("batch item {index}: `boxes` is missing or null")]
    MissingBoxes { index: usize },

    #[error("batch must be an array of items: {0}")]
    InvalidBatch(String),

    #[error("batch item {index} is malformed: {reason}")]
    InvalidBatchItem { index: usize, reason: String },

    #[error("image dimensions must be a [width, height] pair: {0}")]
    MalformedImageDims(String),

    #[error("unknown color format `{0}`, expected `hex` or `rgb`")]
    UnknownColorFormat(String),

    #[error("IoU threshold must be within [0, 1], got {0}")]
    InvalidIouThreshold(f64),
}
