//! Structural checks run before any geometry is computed.

use crate::processor::detection::{Detection, DetectionBatchItem, ImageDimensions};
use crate::processor::error::ProcessInferenceResultError;

/// Check that the image dimensions form a `[width, height]` pair.
pub fn validate_image_dims(
    image_dims: &[f64],
) -> Result<ImageDimensions, ProcessInferenceResultError> {
    match image_dims {
        [width, height] => Ok(ImageDimensions::new(*width, *height)),
        other => {
            log::debug!("rejecting image dimensions with {} elements", other.len());
            Err(ProcessInferenceResultError::MalformedImageDims(format!(
                "expected 2 elements, got {}",
                other.len()
            )))
        }
    }
}

/// Check that a batch item carries a non-null `boxes` sequence.
///
/// `index` is the item's position in the batch and only feeds the error.
pub fn validate_item(
    item: &DetectionBatchItem,
    index: usize,
) -> Result<&[Detection], ProcessInferenceResultError> {
    match &item.boxes {
        Some(boxes) => Ok(boxes),
        None => {
            log::debug!("rejecting batch item {index}: boxes missing");
            Err(ProcessInferenceResultError::MissingBoxes { index })
        }
    }
}
