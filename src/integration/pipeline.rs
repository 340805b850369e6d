//! InferencePipeline for combining detection with post-processing.

use thiserror::Error;

use crate::processor::{
    AugmentedDetectionBatchItem, DetectionBatchItem, InferenceProcessor,
    ProcessInferenceResultError, ProcessorConfig,
};

use super::DetectionSource;

/// Error returned by `InferencePipeline::process_frame`.
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    /// The detection backend failed.
    #[error("detection failed: {0}")]
    Detection(E),

    /// The detections were rejected by the processor.
    #[error(transparent)]
    Process(#[from] ProcessInferenceResultError),
}

/// Bundles a `DetectionSource` with an `InferenceProcessor`.
pub struct InferencePipeline<D: DetectionSource> {
    detector: D,
    processor: InferenceProcessor,
}

impl<D: DetectionSource> InferencePipeline<D> {
    /// Create a new pipeline with the given detector and processor config.
    pub fn new(detector: D, config: ProcessorConfig) -> Self {
        Self {
            detector,
            processor: InferenceProcessor::new(config),
        }
    }

    /// Create a new pipeline with default processor configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, ProcessorConfig::default())
    }

    /// Detect objects in one image and augment the result.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<AugmentedDetectionBatchItem, PipelineError<D::Error>> {
        let detections = self
            .detector
            .detect(input, width, height)
            .map_err(PipelineError::Detection)?;
        let item = DetectionBatchItem::new(detections);

        let mut processed = self
            .processor
            .process_batch(std::slice::from_ref(&item), &[width as f64, height as f64])?;
        // One item in, one item out.
        Ok(processed.remove(0))
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying processor.
    pub fn processor(&self) -> &InferenceProcessor {
        &self.processor
    }
}
