//! Bounds policy: keeps proposed transforms within legal scale and
//! translation ranges.
//!
//! Two independent clamps are applied after every proposed transform. The
//! scale clamp runs first during a pinch; the translation clamp runs for
//! both pinch and pan.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, ViewportExtent};
use crate::transform::AffineTransform;

/// Share of the viewport dimension allowed as rubber-band overscroll.
pub const OVERSCROLL_FRACTION: f64 = 0.2;

/// Legal translation range for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranslationBounds {
    /// Lower bound per axis.
    pub min: Point,
    /// Upper bound per axis.
    pub max: Point,
}

impl TranslationBounds {
    /// Clamp a translation into these bounds.
    ///
    /// Raises to `min` first, then lowers to `max`, so inverted bounds
    /// resolve to `max` rather than panicking like [`f64::clamp`].
    #[must_use]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.max(self.min.x).min(self.max.x),
            p.y.max(self.min.y).min(self.max.y),
        )
    }
}

/// Clamp both scale axes into `[min_scale, max_scale]`.
///
/// When either axis had to be clamped the proposed translation is discarded
/// and `old`'s is reused, so a scale-limited pinch does not make the pan
/// position jump.
#[must_use]
pub fn clamp_scale(
    old: &AffineTransform,
    proposed: &AffineTransform,
    min_scale: f64,
    max_scale: f64,
) -> AffineTransform {
    let mut bounded = *proposed;
    bounded.scale_x = proposed.scale_x.max(min_scale).min(max_scale);
    bounded.scale_y = proposed.scale_y.max(min_scale).min(max_scale);

    #[allow(clippy::float_cmp)]
    let clamped = bounded.scale_x != proposed.scale_x || bounded.scale_y != proposed.scale_y;
    if clamped {
        tracing::trace!(
            scale_x = proposed.scale_x,
            scale_y = proposed.scale_y,
            "scale clamped, keeping previous translation"
        );
        bounded.translate_x = old.translate_x;
        bounded.translate_y = old.translate_y;
    }
    bounded
}

/// Compute the legal translation range for `proposed`.
///
/// See [`clamp_translation`] for the two regimes. `gesture_start` widens the
/// range on axes where the content fits inside the viewport.
#[must_use]
pub fn translation_bounds(
    gesture_start: &AffineTransform,
    proposed: &AffineTransform,
    viewport: &ViewportExtent,
    canvas_width: f64,
    canvas_height: f64,
) -> TranslationBounds {
    // Overscroll shrinks toward zero as the zoom approaches 1x and inverts below it.
    let zoom_factor = proposed.scale_x.max(proposed.scale_y) - 1.0;

    let (min_x, max_x) = axis_bounds(
        proposed.scale_x * canvas_width,
        canvas_width,
        viewport.width,
        zoom_factor,
        gesture_start.translate_x,
    );
    let (min_y, max_y) = axis_bounds(
        proposed.scale_y * canvas_height,
        canvas_height,
        viewport.height,
        zoom_factor,
        gesture_start.translate_y,
    );

    TranslationBounds {
        min: Point::new(min_x, min_y),
        max: Point::new(max_x, max_y),
    }
}

fn axis_bounds(
    scaled: f64,
    canvas: f64,
    view: f64,
    zoom_factor: f64,
    start_translate: f64,
) -> (f64, f64) {
    let displacement = (canvas - scaled) / 2.0;
    let extend = view * OVERSCROLL_FRACTION;

    if scaled < view {
        // Content fits: allow edge-to-edge travel plus overscroll.
        let mut max = ((view - scaled) + extend - displacement) * zoom_factor;
        let mut min = (-displacement - extend) * zoom_factor;
        // A gesture that starts out of range must not snap back.
        if start_translate > max {
            max = start_translate;
        }
        if start_translate < min {
            min = start_translate;
        }
        (min, max)
    } else {
        // Content overflows: keep the viewport covered, plus overscroll.
        let max = (view - displacement - extend) * zoom_factor;
        let min = (-displacement - scaled + extend) * zoom_factor;
        (min, max)
    }
}

/// Clamp the translation of `proposed` into the legal range.
///
/// Per axis, with `scaled = scale * canvas`, `displacement = (canvas - scaled) / 2`,
/// `extend = 20% of the viewport` and `zoom_factor = max(scale_x, scale_y) - 1`:
///
/// - content smaller than the viewport: from flush against one edge to flush
///   against the other, plus `extend`, all times `zoom_factor`, widened to
///   include `gesture_start`'s translation;
/// - otherwise: the range that keeps the viewport covered, plus `extend`,
///   times `zoom_factor`.
///
/// Everything but the translation is copied from `proposed`. `_old` is the
/// transform in effect before this sample and does not affect the bounds.
/// A non-finite translation is returned unclamped so callers can reject it.
#[must_use]
pub fn clamp_translation(
    gesture_start: &AffineTransform,
    _old: &AffineTransform,
    proposed: &AffineTransform,
    viewport: &ViewportExtent,
    canvas_width: f64,
    canvas_height: f64,
) -> AffineTransform {
    if !proposed.translate_x.is_finite() || !proposed.translate_y.is_finite() {
        return *proposed;
    }
    let bounds = translation_bounds(gesture_start, proposed, viewport, canvas_width, canvas_height);
    let clamped = bounds.clamp(proposed.translation_part());
    proposed.with_translation(clamped.x, clamped.y)
}
