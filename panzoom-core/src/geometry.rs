//! Points, viewport extents and two-finger geometry.

use serde::{Deserialize, Serialize};

/// A point in page coordinates, or canvas-local coordinates where noted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen size and page position of the interactive viewport.
///
/// Supplied by the host layout pass and treated as read-only input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportExtent {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Page X coordinate of the viewport's top-left corner.
    #[serde(default)]
    pub page_x: f64,
    /// Page Y coordinate of the viewport's top-left corner.
    #[serde(default)]
    pub page_y: f64,
}

impl ViewportExtent {
    /// Create an extent positioned at the page origin.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            page_x: 0.0,
            page_y: 0.0,
        }
    }

    /// Set the page position of the viewport.
    #[must_use]
    pub const fn at(mut self, page_x: f64, page_y: f64) -> Self {
        self.page_x = page_x;
        self.page_y = page_y;
        self
    }

    /// Center of the viewport relative to its own top-left corner.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Page position of the viewport's top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.page_x, self.page_y)
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Midpoint between two points.
#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
