//! Integration module for connecting inference backends and serving layers
//! with the processor.
//!
//! Detection models plug in through `DetectionSource`; hosts that receive
//! raw JSON go through `process_inference_json`.

mod builder;
mod detector;
mod json;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use json::{batch_from_json, image_dims_from_json, process_inference_json};
pub use pipeline::{InferencePipeline, PipelineError};
