//! Two-finger pinch processing.
//!
//! The first two-touch sample of a gesture only records a snapshot. Every
//! later sample computes a scale relative to the *live* transform, anchors it
//! at the pinch midpoint and runs the result through both clamps of the
//! bounds policy.

use serde::{Deserialize, Serialize};

use crate::bounds::{clamp_scale, clamp_translation};
use crate::geometry::{distance, midpoint, Point};
use crate::gesture::GestureContext;
use crate::transform::AffineTransform;

/// State captured when a pinch begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchSnapshot {
    /// Transform in effect when the pinch began.
    pub initial_transform: AffineTransform,
    /// Distance between the two touches when the pinch began.
    pub initial_distance: f64,
}

/// Pinch processor state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PinchState {
    /// No pinch in progress.
    #[default]
    Idle,
    /// A pinch is in progress.
    Scaling(PinchSnapshot),
}

impl PinchState {
    /// Advance the processor with a two-touch sample.
    ///
    /// Returns the next state and, once a snapshot exists, the bounded
    /// transform to commit.
    #[must_use]
    pub fn step(
        self,
        current: &AffineTransform,
        first: Point,
        second: Point,
        ctx: &GestureContext,
    ) -> (Self, Option<AffineTransform>) {
        let touch_distance = distance(first, second);

        match self {
            Self::Idle => {
                tracing::debug!(distance = touch_distance, "pinch started");
                let snapshot = PinchSnapshot {
                    initial_transform: *current,
                    initial_distance: touch_distance,
                };
                (Self::Scaling(snapshot), None)
            }
            Self::Scaling(snapshot)
                if !(snapshot.initial_distance.is_finite() && snapshot.initial_distance > 0.0) =>
            {
                // Both touches started on the same spot; measure from here instead.
                tracing::debug!(distance = touch_distance, "pinch re-armed");
                let snapshot = PinchSnapshot {
                    initial_distance: touch_distance,
                    ..snapshot
                };
                (Self::Scaling(snapshot), None)
            }
            Self::Scaling(snapshot) => {
                let next = pinch_transform(&snapshot, current, first, second, ctx);
                (self, Some(next))
            }
        }
    }

    /// Whether a pinch is in progress.
    #[must_use]
    pub const fn is_scaling(&self) -> bool {
        matches!(self, Self::Scaling(_))
    }
}

/// Compute the bounded transform for a pinch sample.
///
/// `snapshot.initial_distance` must be positive.
#[must_use]
pub fn pinch_transform(
    snapshot: &PinchSnapshot,
    current: &AffineTransform,
    first: Point,
    second: Point,
    ctx: &GestureContext,
) -> AffineTransform {
    let initial = &snapshot.initial_transform;
    let viewport = &ctx.viewport;

    let touch_zoom = distance(first, second) / snapshot.initial_distance;
    let zoom_scale = (touch_zoom * initial.scale_x) / current.scale_x;

    let center = midpoint(first, second);
    let pinch_center = Point::new(
        center.x - (initial.translate_x + viewport.page_x),
        center.y - (initial.translate_y + viewport.page_y),
    );
    let canvas_center = Point::new(ctx.canvas_width / 2.0, ctx.canvas_height / 2.0);

    // Screen center and canvas center drift apart when the pinch starts at a
    // scale other than 1. Empirical correction, keep as is.
    let offset = Point::new(
        pinch_center.x - canvas_center.x,
        pinch_center.y - canvas_center.y,
    );
    let initial_zoom_displacement = Point::new(
        offset.x - offset.x / initial.scale_x,
        offset.y - offset.y / initial.scale_y,
    );

    let zoom_point = Point::new(
        canvas_center.x - pinch_center.x + initial_zoom_displacement.x,
        canvas_center.y - pinch_center.y + initial_zoom_displacement.y,
    );
    let zoom_displacement = Point::new(
        -(zoom_point.x - zoom_point.x * zoom_scale),
        -(zoom_point.y - zoom_point.y * zoom_scale),
    );

    let delta = AffineTransform::translation(zoom_displacement.x, zoom_displacement.y)
        * AffineTransform::scaling(zoom_scale);
    let proposed = *current * delta;

    tracing::trace!(touch_zoom, zoom_scale, ?zoom_point, "pinch sample");

    let scaled = clamp_scale(current, &proposed, ctx.min_scale, ctx.max_scale);
    clamp_translation(
        initial,
        current,
        &scaled,
        viewport,
        ctx.canvas_width,
        ctx.canvas_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ViewportExtent;

    const EPS: f64 = 1e-9;

    fn ctx(min_scale: f64, max_scale: f64) -> GestureContext {
        GestureContext {
            viewport: ViewportExtent::new(360.0, 640.0),
            canvas_width: 720.0,
            canvas_height: 1080.0,
            min_scale,
            max_scale,
        }
    }

    #[test]
    fn test_first_sample_only_snapshots() {
        let current = AffineTransform::identity();
        let (state, update) = PinchState::Idle.step(
            &current,
            Point::new(100.0, 100.0),
            Point::new(200.0, 100.0),
            &ctx(0.5, 3.0),
        );
        assert!(update.is_none());
        match state {
            PinchState::Scaling(snapshot) => {
                assert!((snapshot.initial_distance - 100.0).abs() < EPS);
                assert_eq!(snapshot.initial_transform, current);
            }
            PinchState::Idle => panic!("expected scaling state"),
        }
    }

    #[test]
    fn test_spreading_fingers_doubles_scale() {
        let ctx = ctx(0.5, 3.0);
        let current = AffineTransform::identity();
        let (state, _) = PinchState::Idle.step(
            &current,
            Point::new(100.0, 100.0),
            Point::new(200.0, 100.0),
            &ctx,
        );
        let (state, update) = state.step(
            &current,
            Point::new(50.0, 100.0),
            Point::new(250.0, 100.0),
            &ctx,
        );
        assert!(state.is_scaling());

        let next = update.expect("should emit a transform");
        assert!((next.scale_x - 2.0).abs() < EPS);
        assert!((next.scale_y - 2.0).abs() < EPS);
        // The midpoint (150, 100) stays put under the centre-origin scale.
        assert!((next.translate_x - 210.0).abs() < EPS);
        assert!((next.translate_y - 440.0).abs() < EPS);
    }

    #[test]
    fn test_scale_limited_pinch_keeps_translation() {
        let ctx = ctx(0.5, 1.5);
        let current = AffineTransform::identity();
        let snapshot = PinchSnapshot {
            initial_transform: current,
            initial_distance: 100.0,
        };
        let next = pinch_transform(
            &snapshot,
            &current,
            Point::new(50.0, 100.0),
            Point::new(250.0, 100.0),
            &ctx,
        );
        assert!((next.scale_x - 1.5).abs() < EPS);
        assert!(next.translate_x.abs() < EPS);
        assert!(next.translate_y.abs() < EPS);
    }

    #[test]
    fn test_scale_is_relative_to_live_transform() {
        // Pinch began at 1x and the live transform is already at 2x: the same
        // finger spread must land on 2x again, not 4x.
        let ctx = ctx(0.5, 3.0);
        let initial = AffineTransform::identity();
        let snapshot = PinchSnapshot {
            initial_transform: initial,
            initial_distance: 100.0,
        };
        let first = pinch_transform(
            &snapshot,
            &initial,
            Point::new(50.0, 100.0),
            Point::new(250.0, 100.0),
            &ctx,
        );
        let second = pinch_transform(
            &snapshot,
            &first,
            Point::new(50.0, 100.0),
            Point::new(250.0, 100.0),
            &ctx,
        );
        assert!((second.scale_x - 2.0).abs() < EPS);
        assert!(second.approx_eq(&first, 1e-6));
    }

    #[test]
    fn test_zero_initial_distance_rearms() {
        let ctx = ctx(0.5, 3.0);
        let current = AffineTransform::identity();
        let (state, _) = PinchState::Idle.step(
            &current,
            Point::new(100.0, 100.0),
            Point::new(100.0, 100.0),
            &ctx,
        );
        let (state, update) = state.step(
            &current,
            Point::new(90.0, 100.0),
            Point::new(110.0, 100.0),
            &ctx,
        );
        assert!(update.is_none());
        let PinchState::Scaling(snapshot) = state else {
            panic!("expected scaling state");
        };
        assert!((snapshot.initial_distance - 20.0).abs() < EPS);

        // Measured from the re-armed distance from now on.
        let (_, update) = state.step(
            &current,
            Point::new(80.0, 100.0),
            Point::new(120.0, 100.0),
            &ctx,
        );
        let next = update.expect("should emit a transform");
        assert!((next.scale_x - 2.0).abs() < EPS);
    }

    #[test]
    fn test_viewport_page_origin_shifts_anchor() {
        let mut ctx = ctx(0.5, 3.0);
        let current = AffineTransform::identity();
        let snapshot = PinchSnapshot {
            initial_transform: current,
            initial_distance: 100.0,
        };
        let at_origin = pinch_transform(
            &snapshot,
            &current,
            Point::new(50.0, 100.0),
            Point::new(250.0, 100.0),
            &ctx,
        );

        ctx.viewport = ctx.viewport.at(0.0, 50.0);
        let shifted = pinch_transform(
            &snapshot,
            &current,
            Point::new(50.0, 150.0),
            Point::new(250.0, 150.0),
            &ctx,
        );
        assert!(shifted.approx_eq(&at_origin, EPS));
    }
}
