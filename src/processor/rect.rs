use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in image pixel space.
///
/// Stored in TLBR form (top-left corner, bottom-right corner), which is the
/// layout inference servers emit. `top_x <= bottom_x` and `top_y <= bottom_y`
/// are expected but not checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub top_x: f64,
    /// Top-left y coordinate
    pub top_y: f64,
    /// Bottom-right x coordinate
    pub bottom_x: f64,
    /// Bottom-right y coordinate
    pub bottom_y: f64,
}

impl BoundingBox {
    /// Create a box from TLBR coordinates.
    #[inline]
    pub fn new(top_x: f64, top_y: f64, bottom_x: f64, bottom_y: f64) -> Self {
        Self {
            top_x,
            top_y,
            bottom_x,
            bottom_y,
        }
    }

    /// Create a box from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn from_tlwh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Create a box from center coordinates and dimensions (XYWH format).
    #[inline]
    pub fn from_xywh(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(
            cx - width / 2.0,
            cy - height / 2.0,
            cx + width / 2.0,
            cy + height / 2.0,
        )
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f64; 4] {
        [self.top_x, self.top_y, self.bottom_x, self.bottom_y]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f64; 4] {
        [self.top_x, self.top_y, self.width(), self.height()]
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.bottom_x - self.top_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom_y - self.top_y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Axis-aligned intersection test.
    ///
    /// Both the horizontal and the vertical intervals must overlap. Intervals
    /// are compared strictly, so boxes that only share an edge or a corner do
    /// not intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.bottom_x <= other.top_x
            || other.bottom_x <= self.top_x
            || self.bottom_y <= other.top_y
            || other.bottom_y <= self.top_y)
    }

    /// Area shared by both boxes, zero when they do not intersect.
    pub fn intersection_area(&self, other: &BoundingBox) -> f64 {
        let x1 = self.top_x.max(other.top_x);
        let y1 = self.top_y.max(other.top_y);
        let x2 = self.bottom_x.min(other.bottom_x);
        let y2 = self.bottom_y.min(other.bottom_y);

        (x2 - x1).max(0.0) * (y2 - y1).max(0.0)
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let inter_area = self.intersection_area(other);
        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            inter_area / union_area
        } else {
            0.0
        }
    }
}

/// Pairwise intersection matrix for one set of boxes.
///
/// Returns a symmetric (N, N) matrix; the diagonal is always `false`.
pub fn intersection_matrix(boxes: &[BoundingBox]) -> Array2<bool> {
    let n = boxes.len();
    let mut overlaps = Array2::from_elem((n, n), false);
    for i in 0..n {
        for j in (i + 1)..n {
            let hit = boxes[i].intersects(&boxes[j]);
            overlaps[[i, j]] = hit;
            overlaps[[j, i]] = hit;
        }
    }
    overlaps
}

/// Calculate IoU matrix for one set of boxes, shape (N, N).
pub fn iou_matrix(boxes: &[BoundingBox]) -> Array2<f64> {
    let n = boxes.len();
    let mut ious = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let iou = boxes[i].iou(&boxes[j]);
            ious[[i, j]] = iou;
            ious[[j, i]] = iou;
        }
    }
    ious
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_box_conversions() {
        let b = BoundingBox::from_tlwh(10.0, 20.0, 30.0, 40.0);

        assert_eq!(b.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
        assert_eq!(b.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(b.area(), 1200.0);
    }

    #[test]
    fn test_from_xywh() {
        let b = BoundingBox::from_xywh(25.0, 40.0, 30.0, 40.0);
        assert_eq!(b.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
    }

    #[rstest]
    #[case::partial(BoundingBox::new(20.0, 20.0, 60.0, 40.0), true)]
    #[case::contained(BoundingBox::new(5.0, 5.0, 10.0, 10.0), true)]
    #[case::identical(BoundingBox::new(1.0, 1.0, 40.0, 40.0), true)]
    #[case::right_of(BoundingBox::new(50.0, 1.0, 60.0, 40.0), false)]
    #[case::below(BoundingBox::new(1.0, 50.0, 40.0, 60.0), false)]
    #[case::shared_edge(BoundingBox::new(40.0, 1.0, 60.0, 40.0), false)]
    #[case::shared_corner(BoundingBox::new(40.0, 40.0, 60.0, 60.0), false)]
    fn test_intersects(#[case] other: BoundingBox, #[case] expected: bool) {
        let b = BoundingBox::new(1.0, 1.0, 40.0, 40.0);
        assert_eq!(b.intersects(&other), expected);
        assert_eq!(other.intersects(&b), expected);
    }

    #[test]
    fn test_iou() {
        let a = BoundingBox::from_tlwh(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::from_tlwh(5.0, 5.0, 10.0, 10.0);

        // Intersection 25, union 175
        assert_relative_eq!(a.iou(&b), 25.0 / 175.0);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = BoundingBox::from_tlwh(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::from_tlwh(20.0, 20.0, 10.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_degenerate_box() {
        let a = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
        assert_eq!(a.iou(&a), 0.0);
    }

    #[test]
    fn test_intersection_matrix_is_symmetric() {
        let boxes = [
            BoundingBox::new(1.0, 1.0, 40.0, 40.0),
            BoundingBox::new(20.0, 20.0, 60.0, 40.0),
            BoundingBox::new(80.0, 80.0, 90.0, 90.0),
        ];
        let m = intersection_matrix(&boxes);

        assert_eq!(m.dim(), (3, 3));
        assert!(m[[0, 1]] && m[[1, 0]]);
        assert!(!m[[0, 2]] && !m[[2, 1]]);
        assert!((0..3).all(|i| !m[[i, i]]));
    }

    #[test]
    fn test_iou_matrix_zero_diagonal() {
        let boxes = [
            BoundingBox::from_tlwh(0.0, 0.0, 10.0, 10.0),
            BoundingBox::from_tlwh(5.0, 5.0, 10.0, 10.0),
        ];
        let m = iou_matrix(&boxes);
        assert_eq!(m[[0, 0]], 0.0);
        assert_relative_eq!(m[[0, 1]], m[[1, 0]]);
    }
}
