//! Absolute navigation targets for programmatic moves.
//!
//! These transforms bypass the bounds policy: a caller-directed jump such as
//! a reset may land outside the range gestures are held to.

use crate::geometry::{Point, ViewportExtent};
use crate::transform::AffineTransform;

/// The transform that shows canvas point `target` at the viewport center at
/// `scale`.
///
/// The `-(canvas - canvas * scale) / 2` term matches the centring convention
/// of [`AffineTransform::initial_view`].
#[must_use]
pub fn compute_zoom_to_point_transform(
    target: Point,
    scale: f64,
    viewport: &ViewportExtent,
    canvas_width: f64,
    canvas_height: f64,
) -> AffineTransform {
    let center = viewport.center();
    let zoom_point = Point::new(-target.x * scale + center.x, -target.y * scale + center.y);
    let zoom_displacement = Point::new(
        -(canvas_width - canvas_width * scale) / 2.0,
        -(canvas_height - canvas_height * scale) / 2.0,
    );

    AffineTransform::scaling(scale).with_translation(
        zoom_point.x + zoom_displacement.x,
        zoom_point.y + zoom_displacement.y,
    )
}

/// The transform that restores the initial view.
///
/// Zooms to the canvas point the initial view shows at the viewport center,
/// at `initial_zoom`, which reproduces [`AffineTransform::initial_view`].
#[must_use]
pub fn compute_reset_transform(
    initial_zoom: f64,
    viewport: &ViewportExtent,
    canvas_width: f64,
    canvas_height: f64,
) -> AffineTransform {
    let center = viewport.center();
    // Targeting the raw viewport center only lands on the initial view at 1x.
    let target = Point::new(center.x / initial_zoom, center.y / initial_zoom);
    compute_zoom_to_point_transform(target, initial_zoom, viewport, canvas_width, canvas_height)
}
