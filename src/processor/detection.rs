//! Data model for detections flowing into and out of the processor.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::processor::rect::BoundingBox;

/// One detected object instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding box in TLBR format
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    /// Detection confidence score
    pub score: f64,
    /// Class label
    pub label: String,
}

impl Detection {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, score: f64, label: impl Into<String>) -> Self {
        Self {
            bbox: BoundingBox::new(x1, y1, x2, y2),
            score,
            label: label.into(),
        }
    }

    pub fn from_box(bbox: BoundingBox, score: f64, label: impl Into<String>) -> Self {
        Self {
            bbox,
            score,
            label: label.into(),
        }
    }
}

/// All detections produced for one image.
///
/// `boxes` is optional because upstream producers may omit it or send null;
/// the validator rejects such items before any processing happens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionBatchItem {
    #[serde(default)]
    pub boxes: Option<Vec<Detection>>,
    /// Informational count reported by the producer, never cross-checked.
    ///
    /// Kept verbatim: `None` only when the field was absent.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_boxes: Option<Value>,
}

impl DetectionBatchItem {
    pub fn new(boxes: Vec<Detection>) -> Self {
        let total_boxes = Some(Value::from(boxes.len()));
        Self {
            boxes: Some(boxes),
            total_boxes,
        }
    }
}

/// A present field is `Some`, even when it holds `null`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A detection together with its derived overlap flag and display color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedDetection {
    #[serde(flatten)]
    pub detection: Detection,
    /// Set when this box intersects a higher-scored box.
    pub overlapping: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AugmentedDetectionBatchItem {
    pub boxes: Vec<AugmentedDetection>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_boxes: Option<Value>,
}

/// Image size as a `[width, height]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
}

impl ImageDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
