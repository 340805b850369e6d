//! Batch orchestration: validate, flag overlaps, assign colors.

use serde::{Deserialize, Serialize};

use crate::processor::detection::{
    AugmentedDetection, AugmentedDetectionBatchItem, Detection, DetectionBatchItem,
};
use crate::processor::error::ProcessInferenceResultError;
use crate::processor::palette::{ColorFormat, LabelColors};
use crate::processor::suppression::SuppressionRule;
use crate::processor::validator::{validate_image_dims, validate_item};

/// Configuration for the InferenceProcessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    pub color_format: ColorFormat,
    pub suppression: SuppressionRule,
}

#[derive(Debug, Clone, Default)]
pub struct InferenceProcessor {
    config: ProcessorConfig,
}

impl InferenceProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Process every item of a batch.
    ///
    /// Image dimensions and the suppression rule are checked once up front;
    /// the first invalid item aborts the whole batch.
    pub fn process_batch(
        &self,
        items: &[DetectionBatchItem],
        image_dims: &[f64],
    ) -> Result<Vec<AugmentedDetectionBatchItem>, ProcessInferenceResultError> {
        validate_image_dims(image_dims)?;
        self.config.suppression.validate()?;

        let mut results = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let detections = validate_item(item, index)?;
            results.push(AugmentedDetectionBatchItem {
                boxes: self.augment(detections),
                total_boxes: item.total_boxes.clone(),
            });
        }
        Ok(results)
    }

    /// Overlap flags and colors for one image's detections.
    pub fn augment(&self, detections: &[Detection]) -> Vec<AugmentedDetection> {
        let overlapping = self.config.suppression.mark_overlapping(detections);
        let mut colors = LabelColors::new();

        let augmented: Vec<AugmentedDetection> = detections
            .iter()
            .zip(overlapping)
            .map(|(det, overlapping)| {
                let color = colors.color_for(&det.label);
                AugmentedDetection {
                    detection: det.clone(),
                    overlapping,
                    color: self.config.color_format.format(&color),
                }
            })
            .collect();

        log::debug!(
            "processed {} boxes: {} overlapping, {} distinct labels",
            augmented.len(),
            augmented.iter().filter(|d| d.overlapping).count(),
            colors.len()
        );
        augmented
    }
}

/// Post-process a batch of inference results with the given color format.
///
/// Exposed as a future for async hosts. The work itself never suspends, so
/// awaiting it costs the same as calling `InferenceProcessor::process_batch`.
pub async fn process_inference_results(
    data: &[DetectionBatchItem],
    image_dims: &[f64],
    color_format: &str,
) -> Result<Vec<AugmentedDetectionBatchItem>, ProcessInferenceResultError> {
    let config = ProcessorConfig {
        color_format: color_format.parse()?,
        ..Default::default()
    };
    InferenceProcessor::new(config).process_batch(data, image_dims)
}
