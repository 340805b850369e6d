//! Overlap suppression: among intersecting boxes the higher-scored one wins
//! and every lower-scored partner is flagged as overlapping.

use serde::{Deserialize, Serialize};

use crate::processor::detection::Detection;
use crate::processor::error::ProcessInferenceResultError;
use crate::processor::rect::{BoundingBox, intersection_matrix, iou_matrix};

/// Decides which pairs of boxes count as overlapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "threshold", rename_all = "snake_case")]
pub enum SuppressionRule {
    /// Any positive-area intersection.
    #[default]
    Intersection,
    /// IoU strictly above the threshold.
    IouAbove(f64),
}

impl SuppressionRule {
    pub fn validate(&self) -> Result<(), ProcessInferenceResultError> {
        match *self {
            SuppressionRule::Intersection => Ok(()),
            SuppressionRule::IouAbove(t) if (0.0..=1.0).contains(&t) => Ok(()),
            SuppressionRule::IouAbove(t) => {
                Err(ProcessInferenceResultError::InvalidIouThreshold(t))
            }
        }
    }

    /// Flag lower-scored members of every overlapping pair.
    ///
    /// Returns one flag per detection, in input order. Equal scores never
    /// suppress each other, and a flag once set is never cleared.
    pub fn mark_overlapping(&self, detections: &[Detection]) -> Vec<bool> {
        let n = detections.len();
        let mut overlapping = vec![false; n];
        if n < 2 {
            return overlapping;
        }

        let boxes: Vec<BoundingBox> = detections.iter().map(|d| d.bbox).collect();
        let pairs = match *self {
            SuppressionRule::Intersection => intersection_matrix(&boxes),
            SuppressionRule::IouAbove(threshold) => {
                iou_matrix(&boxes).mapv(|iou| iou > threshold)
            }
        };

        for i in 0..n {
            for j in (i + 1)..n {
                if !pairs[[i, j]] {
                    continue;
                }
                let (a, b) = (detections[i].score, detections[j].score);
                if a < b {
                    overlapping[i] = true;
                } else if b < a {
                    overlapping[j] = true;
                }
            }
        }
        overlapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x1: f64, y1: f64, x2: f64, y2: f64, score: f64) -> Detection {
        Detection::new(x1, y1, x2, y2, score, "obj")
    }

    #[test]
    fn test_lower_score_is_flagged() {
        let dets = [det(1.0, 1.0, 40.0, 40.0, 20.0), det(20.0, 20.0, 60.0, 40.0, 10.0)];
        assert_eq!(SuppressionRule::Intersection.mark_overlapping(&dets), vec![false, true]);
    }

    #[test]
    fn test_order_does_not_matter() {
        let dets = [det(20.0, 20.0, 60.0, 40.0, 10.0), det(1.0, 1.0, 40.0, 40.0, 20.0)];
        assert_eq!(SuppressionRule::Intersection.mark_overlapping(&dets), vec![true, false]);
    }

    #[test]
    fn test_equal_scores_are_not_flagged() {
        let dets = [det(1.0, 1.0, 40.0, 40.0, 10.0), det(20.0, 20.0, 60.0, 40.0, 10.0)];
        assert_eq!(SuppressionRule::Intersection.mark_overlapping(&dets), vec![false, false]);
    }

    #[test]
    fn test_disjoint_boxes_are_not_flagged() {
        let dets = [det(0.0, 0.0, 10.0, 10.0, 0.9), det(50.0, 50.0, 60.0, 60.0, 0.1)];
        assert_eq!(SuppressionRule::Intersection.mark_overlapping(&dets), vec![false, false]);
    }

    #[test]
    fn test_single_and_empty() {
        assert!(SuppressionRule::Intersection.mark_overlapping(&[]).is_empty());
        assert_eq!(
            SuppressionRule::Intersection.mark_overlapping(&[det(0.0, 0.0, 5.0, 5.0, 1.0)]),
            vec![false]
        );
    }

    #[test]
    fn test_flag_is_sticky_across_pairs() {
        // Middle box loses to the first, then beats the last.
        let dets = [
            det(0.0, 0.0, 20.0, 20.0, 0.9),
            det(10.0, 10.0, 30.0, 30.0, 0.5),
            det(25.0, 25.0, 40.0, 40.0, 0.1),
        ];
        assert_eq!(
            SuppressionRule::Intersection.mark_overlapping(&dets),
            vec![false, true, true]
        );
    }

    #[test]
    fn test_iou_rule_ignores_small_overlaps() {
        // IoU = 25 / 175
        let dets = [det(0.0, 0.0, 10.0, 10.0, 0.9), det(5.0, 5.0, 15.0, 15.0, 0.1)];
        assert_eq!(SuppressionRule::IouAbove(0.5).mark_overlapping(&dets), vec![false, false]);
        assert_eq!(SuppressionRule::IouAbove(0.1).mark_overlapping(&dets), vec![false, true]);
    }

    #[test]
    fn test_validate_threshold() {
        assert!(SuppressionRule::IouAbove(0.3).validate().is_ok());
        assert_eq!(
            SuppressionRule::IouAbove(1.5).validate(),
            Err(ProcessInferenceResultError::InvalidIouThreshold(1.5))
        );
    }
}
