mod batch_processor;
mod detection;
mod error;
mod palette;
mod rect;
mod suppression;
mod validator;

pub use batch_processor::{InferenceProcessor, ProcessorConfig, process_inference_results};
pub use detection::{
    AugmentedDetection, AugmentedDetectionBatchItem, Detection, DetectionBatchItem,
    ImageDimensions,
};
pub use error::ProcessInferenceResultError;
pub use palette::{
    Color, ColorFormat, DEFAULT_COLOR_FORMAT, LabelColors, SET1, hex_format, rgb_format,
};
pub use rect::{BoundingBox, intersection_matrix, iou_matrix};
pub use suppression::SuppressionRule;
pub use validator::{validate_image_dims, validate_item};
