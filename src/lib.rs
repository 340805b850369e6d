//! Post-processing for object-detection inference results.
//!
//! Given one or more images' detections, flags lower-scored boxes that
//! intersect a higher-scored one and gives every distinct label a stable
//! color from the "Set1" palette.
//!
//! ```
//! use inference_postprocess::{Detection, DetectionBatchItem, process_inference_results};
//!
//! let batch = vec![DetectionBatchItem::new(vec![
//!     Detection::new(1.0, 1.0, 40.0, 40.0, 20.0, "box1"),
//!     Detection::new(20.0, 20.0, 60.0, 40.0, 10.0, "box2"),
//! ])];
//! let future = process_inference_results(&batch, &[100.0, 100.0], "hex");
//! let result = pollster::block_on(future).unwrap();
//!
//! assert!(!result[0].boxes[0].overlapping);
//! assert!(result[0].boxes[1].overlapping);
//! assert_eq!(result[0].boxes[0].color, "#e41a1c");
//! ```

pub mod integration;
pub mod processor;

pub use integration::{
    DetectionBuilder, DetectionSource, InferencePipeline, IntoDetections, PipelineError,
    process_inference_json,
};
pub use processor::{
    AugmentedDetection, AugmentedDetectionBatchItem, BoundingBox, ColorFormat, Detection,
    DetectionBatchItem, InferenceProcessor, ProcessInferenceResultError, ProcessorConfig,
    SuppressionRule, hex_format, process_inference_results, rgb_format,
};
