//! Single-finger pan processing.

use serde::{Deserialize, Serialize};

use crate::bounds::clamp_translation;
use crate::gesture::GestureContext;
use crate::transform::AffineTransform;

/// State captured when a pan begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanSnapshot {
    /// Transform in effect when the pan began.
    pub initial_transform: AffineTransform,
    /// Cumulative horizontal displacement at the previous sample.
    pub last_dx: f64,
    /// Cumulative vertical displacement at the previous sample.
    pub last_dy: f64,
}

/// Pan processor state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PanState {
    /// No pan in progress.
    #[default]
    Idle,
    /// A pan is in progress.
    Moving(PanSnapshot),
}

impl PanState {
    /// Advance the processor with a single-touch sample carrying the host's
    /// cumulative displacement `(dx, dy)`.
    #[must_use]
    pub fn step(
        self,
        current: &AffineTransform,
        dx: f64,
        dy: f64,
        ctx: &GestureContext,
    ) -> (Self, Option<AffineTransform>) {
        if !dx.is_finite() || !dy.is_finite() {
            tracing::warn!(dx, dy, "ignoring non-finite pan displacement");
            return (self, None);
        }
        match self {
            Self::Idle => {
                tracing::debug!(dx, dy, "pan started");
                // Increments are measured from this sample, not from zero.
                let snapshot = PanSnapshot {
                    initial_transform: *current,
                    last_dx: dx,
                    last_dy: dy,
                };
                (Self::Moving(snapshot), None)
            }
            Self::Moving(snapshot) => {
                let next = pan_transform(&snapshot, current, dx, dy, ctx);
                let snapshot = PanSnapshot {
                    last_dx: dx,
                    last_dy: dy,
                    ..snapshot
                };
                (Self::Moving(snapshot), Some(next))
            }
        }
    }

    /// Whether a pan is in progress.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        matches!(self, Self::Moving(_))
    }
}

/// Compute the bounded transform for a pan sample.
///
/// The host reports displacement cumulatively; only the part since the
/// previous sample is applied, converted from screen to content units.
#[must_use]
pub fn pan_transform(
    snapshot: &PanSnapshot,
    current: &AffineTransform,
    dx: f64,
    dy: f64,
    ctx: &GestureContext,
) -> AffineTransform {
    let step_x = (dx - snapshot.last_dx) / current.scale_x;
    let step_y = (dy - snapshot.last_dy) / current.scale_y;
    let proposed = *current * AffineTransform::translation(step_x, step_y);

    tracing::trace!(step_x, step_y, "pan sample");

    clamp_translation(
        &snapshot.initial_transform,
        current,
        &proposed,
        &ctx.viewport,
        ctx.canvas_width,
        ctx.canvas_height,
    )
}
