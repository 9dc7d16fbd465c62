//! Input samples delivered by the host gesture dispatcher.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Phase of a gesture sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// First sample of a gesture (finger down).
    Start,
    /// Touches moved.
    #[default]
    Move,
    /// All touches released.
    End,
    /// Gesture taken away by the host (e.g., another responder).
    Cancel,
}

impl TouchPhase {
    /// Whether this phase ends the current gesture.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::End | Self::Cancel)
    }
}

/// A single active touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    #[serde(default)]
    pub id: u32,
    /// X position in page coordinates.
    pub page_x: f64,
    /// Y position in page coordinates.
    pub page_y: f64,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub const fn new(id: u32, page_x: f64, page_y: f64) -> Self {
        Self { id, page_x, page_y }
    }

    /// Page position as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.page_x, self.page_y)
    }
}

/// One update from the host gesture dispatcher.
///
/// `dx`/`dy` are cumulative since the current continuous gesture began;
/// `vx`/`vy` are the host's velocity estimate in pixels per millisecond.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    /// Phase of this sample.
    #[serde(default)]
    pub phase: TouchPhase,
    /// All currently active touches.
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
    /// Cumulative horizontal displacement.
    #[serde(default)]
    pub dx: f64,
    /// Cumulative vertical displacement.
    #[serde(default)]
    pub dy: f64,
    /// Horizontal velocity.
    #[serde(default)]
    pub vx: f64,
    /// Vertical velocity.
    #[serde(default)]
    pub vy: f64,
}

impl GestureSample {
    /// A move sample with the given touches and no displacement.
    #[must_use]
    pub fn new(touches: Vec<TouchPoint>) -> Self {
        Self {
            touches,
            ..Self::default()
        }
    }

    /// A single-touch move sample at `(x, y)` with cumulative displacement `(dx, dy)`.
    #[must_use]
    pub fn drag(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self {
            touches: vec![TouchPoint::new(0, x, y)],
            dx,
            dy,
            ..Self::default()
        }
    }

    /// A two-touch move sample.
    #[must_use]
    pub fn pinch(first: Point, second: Point) -> Self {
        Self::new(vec![
            TouchPoint::new(0, first.x, first.y),
            TouchPoint::new(1, second.x, second.y),
        ])
    }

    /// A release sample that ends the current gesture.
    #[must_use]
    pub fn release() -> Self {
        Self {
            phase: TouchPhase::End,
            ..Self::default()
        }
    }

    /// Attach a velocity estimate.
    #[must_use]
    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// Number of active touches.
    #[must_use]
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Check if more than one touch is active.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        self.touches.len() > 1
    }

    /// Positions of the first two touches, if at least two are active.
    #[must_use]
    pub fn pinch_points(&self) -> Option<(Point, Point)> {
        match self.touches.as_slice() {
            [first, second, ..] => Some((first.position(), second.position())),
            _ => None,
        }
    }

    /// Combined speed used by the glitch filter.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.vx.abs() + self.vy.abs()
    }
}
