//! Geometric primitives: bounding boxes, points, and orientation.
//!
//! Coordinates are normalized `[0, 1]` page fractions, exactly as the OCR
//! service emits them. No rescaling or normalization happens here — sorts
//! and comparisons operate directly on the floats as received, so that
//! output is reproducible across runs on the same input (spec invariant:
//! reading-order stability).

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in normalized page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn horizontal_center(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn vertical_center(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Zero when either dimension is non-positive.
    pub fn area(&self) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// Tightest box covering both inputs.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        BoundingBox {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Overlapping rectangle, or `None` when the overlap is empty in either
    /// axis. Two boxes that only touch along an edge (zero-length overlap)
    /// are treated as non-intersecting, matching the source service's
    /// behavior of requiring strictly positive overlap in both axes.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let v_top = self.top.max(other.top);
        let v_bottom = self.bottom().min(other.bottom());
        let v_isect = (v_bottom - v_top).max(0.0);

        let h_left = self.left.max(other.left);
        let h_right = self.right().min(other.right());
        let h_isect = (h_right - h_left).max(0.0);

        if h_isect > 0.0 && v_isect > 0.0 {
            Some(BoundingBox {
                left: h_left,
                top: v_top,
                width: h_isect,
                height: v_isect,
            })
        } else {
            None
        }
    }

    /// Vertical overlap length with `other`, zero if they do not overlap
    /// vertically. Used by the horizontal-row grouper.
    pub fn vertical_overlap(&self, other: &BoundingBox) -> f64 {
        let top = self.top.max(other.top);
        let bottom = self.bottom().min(other.bottom());
        (bottom - top).max(0.0)
    }
}

/// Tightest box covering every non-`None` box in `boxes`. `None` when the
/// sequence is empty or every element is `None`.
pub fn enclosing<'a>(boxes: impl IntoIterator<Item = Option<&'a BoundingBox>>) -> Option<BoundingBox> {
    let mut acc: Option<BoundingBox> = None;
    for b in boxes.into_iter().flatten() {
        acc = Some(match acc {
            Some(existing) => existing.union(b),
            None => *b,
        });
    }
    acc
}

/// A single point of a block's polygon, in normalized page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// The orientation of a block, derived from the first two polygon points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    point0: Point,
    point1: Point,
}

impl Orientation {
    pub fn new(point0: Point, point1: Point) -> Self {
        Self { point0, point1 }
    }

    /// Angle of the line from `point0` to `point1`, in `(-pi, pi]` radians.
    pub fn radians(&self) -> f64 {
        (self.point1.y - self.point0.y).atan2(self.point1.x - self.point0.x)
    }

    pub fn degrees(&self) -> f64 {
        self.radians().to_degrees()
    }
}

/// Full geometry of a block: bounding box plus polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub bounding_box: BoundingBox,
    pub polygon: Vec<Point>,
}

impl Geometry {
    /// `None` when fewer than two polygon points are present.
    pub fn orientation(&self) -> Option<Orientation> {
        if self.polygon.len() < 2 {
            None
        } else {
            Some(Orientation::new(self.polygon[0], self.polygon[1]))
        }
    }
}
