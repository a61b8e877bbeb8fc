//! Geometry primitives shared by the editor engines
//!
//! All values are `f64` pixels. Image space has its origin at the top-left
//! corner of the source image, +X right, +Y down, matching screen space.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the per-axis offset from `origin` to `self`.
    pub fn delta_from(&self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }

    /// True when both axes are within `tolerance_x`/`tolerance_y` of `other`.
    pub fn near(&self, other: Point, tolerance_x: f64, tolerance_y: f64) -> bool {
        (self.x - other.x).abs() <= tolerance_x && (self.y - other.y).abs() <= tolerance_y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Width and height of an image or surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a new size. Non-finite or non-positive dimensions become 1px so
    /// that every downstream division stays defined.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_dimension(width),
            height: sanitize_dimension(height),
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn sanitize_dimension(value: f64) -> f64 {
    if value.is_finite() && value >= 1.0 {
        value
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_delta() {
        let p = Point::new(15.0, 30.0);
        assert_eq!(p.delta_from(Point::new(5.0, 40.0)), (10.0, -10.0));
    }

    #[test]
    fn test_point_near() {
        let p = Point::new(100.0, 100.0);
        assert!(p.near(Point::new(110.0, 95.0), 16.0, 16.0));
        assert!(!p.near(Point::new(120.0, 100.0), 16.0, 16.0));
    }

    #[test]
    fn test_size_sanitizes_degenerate_dimensions() {
        let size = Size::new(0.0, f64::NAN);
        assert_eq!(size.width, 1.0);
        assert_eq!(size.height, 1.0);
    }

    #[test]
    fn test_size_aspect_ratio() {
        assert!((Size::new(800.0, 600.0).aspect_ratio() - 4.0 / 3.0).abs() < 1e-9);
    }
}
