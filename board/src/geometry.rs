//! Board geometry: points, clip half-sizes, and the circular boundary.
//!
//! A clip's position is stored and reported as its *center*. The host draws
//! it from a top-left anchor, which sits one half-size up and to the left of
//! the center. Drag and drop gestures report the raw pointer position and the
//! engine offsets it by the same half-size to get the new center.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{BOUNDARY_PADDING, BOUNDARY_RADIUS, SQUARE_HALF_SIZE};

/// A point in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are neither NaN nor infinite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Half-extent of a clip's box. Constant for every clip on a board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSize {
    pub half_w: f64,
    pub half_h: f64,
}

impl HalfSize {
    #[must_use]
    pub fn new(half_w: f64, half_h: f64) -> Self {
        Self { half_w, half_h }
    }

    /// A square box with the same half-extent on both axes.
    #[must_use]
    pub fn square(half: f64) -> Self {
        Self { half_w: half, half_h: half }
    }

    /// Full box width.
    #[must_use]
    pub fn width(self) -> f64 {
        self.half_w * 2.0
    }

    /// Full box height.
    #[must_use]
    pub fn height(self) -> f64 {
        self.half_h * 2.0
    }
}

impl Default for HalfSize {
    fn default() -> Self {
        Self::square(SQUARE_HALF_SIZE)
    }
}

/// Top-left anchor the host draws a clip from.
#[must_use]
pub fn center_to_anchor(center: Point, half: HalfSize) -> Point {
    Point::new(center.x - half.half_w, center.y - half.half_h)
}

/// Inverse of [`center_to_anchor`].
#[must_use]
pub fn anchor_to_center(anchor: Point, half: HalfSize) -> Point {
    Point::new(anchor.x + half.half_w, anchor.y + half.half_h)
}

/// Center a clip takes when a drag or drop reports `pointer`: the pointer
/// position minus the half-size offset.
#[must_use]
pub fn pointer_to_center(pointer: Point, half: HalfSize) -> Point {
    Point::new(pointer.x - half.half_w, pointer.y - half.half_h)
}

/// Circular region every clip must lie within for a final save.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Boundary {
    #[must_use]
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self { center_x, center_y, radius }
    }

    /// Circle centered on a square surface of side `2 * (radius + padding)`.
    #[must_use]
    pub fn with_padding(radius: f64, padding: f64) -> Self {
        let half_side = radius + padding;
        Self::new(half_side, half_side, radius)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Side length of the square surface the circle is drawn on, given `padding`.
    #[must_use]
    pub fn surface_side(&self, padding: f64) -> f64 {
        2.0 * (self.radius + padding)
    }

    /// Distance from `point` to the circle's center.
    #[must_use]
    pub fn distance_from_center(&self, point: Point) -> f64 {
        point.distance_to(self.center())
    }

    /// Inclusive containment: a point exactly on the circle is inside.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.distance_from_center(point) <= self.radius
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::with_padding(BOUNDARY_RADIUS, BOUNDARY_PADDING)
    }
}
