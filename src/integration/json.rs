//! Entry point for loosely-typed JSON payloads.
//!
//! Serving layers usually hand over the decoded request body as-is, so
//! `boxes` may be absent or null and `imageDims` may not be a pair at all.
//! These are reported as `ProcessInferenceResultError`, never as panics.

use serde::Deserialize;
use serde_json::Value;

use crate::processor::{
    AugmentedDetectionBatchItem, DetectionBatchItem, InferenceProcessor,
    ProcessInferenceResultError, ProcessorConfig,
};

/// Decode `imageDims`, which must be a two-element array of numbers.
pub fn image_dims_from_json(value: &Value) -> Result<Vec<f64>, ProcessInferenceResultError> {
    let Value::Array(elements) = value else {
        return Err(ProcessInferenceResultError::MalformedImageDims(format!(
            "expected an array, got {}",
            json_kind(value)
        )));
    };

    let mut dims = Vec::with_capacity(elements.len());
    for element in elements {
        let dim = element.as_f64().ok_or_else(|| {
            ProcessInferenceResultError::MalformedImageDims(format!(
                "expected numeric elements, got {}",
                json_kind(element)
            ))
        })?;
        dims.push(dim);
    }
    Ok(dims)
}

/// Decode the batch into typed items.
///
/// A missing or null `boxes` field decodes to `None` so that the validator
/// can report it; any other shape mismatch fails here.
pub fn batch_from_json(
    value: &Value,
) -> Result<Vec<DetectionBatchItem>, ProcessInferenceResultError> {
    let Value::Array(items) = value else {
        return Err(ProcessInferenceResultError::InvalidBatch(format!(
            "got {}",
            json_kind(value)
        )));
    };

    let mut batch = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let decoded = DetectionBatchItem::deserialize(item).map_err(|e| {
            ProcessInferenceResultError::InvalidBatchItem {
                index,
                reason: e.to_string(),
            }
        })?;
        batch.push(decoded);
    }
    Ok(batch)
}

/// Validate and post-process a raw JSON batch.
///
/// The result serializes back into the wire shape: every detection gains
/// `overlapping` and `color` next to `box`, `score` and `label`.
pub fn process_inference_json(
    data: &Value,
    image_dims: &Value,
    color_format: &str,
) -> Result<Vec<AugmentedDetectionBatchItem>, ProcessInferenceResultError> {
    let config = ProcessorConfig {
        color_format: color_format.parse()?,
        ..Default::default()
    };
    let dims = image_dims_from_json(image_dims)?;
    let batch = batch_from_json(data)?;

    InferenceProcessor::new(config).process_batch(&batch, &dims)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
