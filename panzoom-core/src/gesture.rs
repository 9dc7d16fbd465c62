//! Gesture dispatch.
//!
//! A single [`ActiveGesture`] decides which processor owns the touch stream,
//! so a pinch and a pan can never be in progress at the same time.

use serde::{Deserialize, Serialize};

use crate::event::GestureSample;
use crate::geometry::ViewportExtent;
use crate::pan::{PanSnapshot, PanState};
use crate::pinch::{PinchSnapshot, PinchState};
use crate::transform::AffineTransform;

/// Inputs the processors need besides the sample and the live transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureContext {
    /// Current viewport extent.
    pub viewport: ViewportExtent,
    /// Canvas design width.
    pub canvas_width: f64,
    /// Canvas design height.
    pub canvas_height: f64,
    /// Smallest legal scale.
    pub min_scale: f64,
    /// Largest legal scale.
    pub max_scale: f64,
}

/// The gesture currently in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ActiveGesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Two-finger pinch.
    Pinching(PinchSnapshot),
    /// Single-finger pan.
    Panning(PanSnapshot),
}

/// Routes samples to the pinch or pan processor.
#[derive(Debug, Clone, Default)]
pub struct GestureDispatcher {
    active: ActiveGesture,
}

impl GestureDispatcher {
    /// Create an idle dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gesture currently in progress.
    #[must_use]
    pub const fn active(&self) -> &ActiveGesture {
        &self.active
    }

    /// Whether a pinch is in progress.
    #[must_use]
    pub const fn is_scaling(&self) -> bool {
        matches!(self.active, ActiveGesture::Pinching(_))
    }

    /// Whether a pan is in progress.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        matches!(self.active, ActiveGesture::Panning(_))
    }

    /// End the current gesture. No snapshot is retained.
    pub fn end(&mut self) {
        if self.active != ActiveGesture::Idle {
            tracing::debug!("gesture ended");
        }
        self.active = ActiveGesture::Idle;
    }

    /// Process one sample against the live transform.
    ///
    /// - two or more touches go to the pinch processor, abandoning any pan;
    /// - a single touch goes to the pan processor unless a pinch is active,
    ///   in which case it is ignored until the gesture ends;
    /// - terminal phases end the gesture.
    ///
    /// Returns the bounded transform to commit, if any. A non-finite result
    /// is dropped and the processor state is left where it was.
    pub fn dispatch(
        &mut self,
        sample: &GestureSample,
        current: &AffineTransform,
        ctx: &GestureContext,
    ) -> Option<AffineTransform> {
        if sample.phase.is_terminal() {
            self.end();
            return None;
        }

        let (next, update) = if let Some((first, second)) = sample.pinch_points() {
            let state = match self.active {
                ActiveGesture::Pinching(snapshot) => PinchState::Scaling(snapshot),
                ActiveGesture::Panning(_) => {
                    tracing::debug!("second touch added, abandoning pan");
                    PinchState::Idle
                }
                ActiveGesture::Idle => PinchState::Idle,
            };
            let (state, update) = state.step(current, first, second, ctx);
            let next = match state {
                PinchState::Scaling(snapshot) => ActiveGesture::Pinching(snapshot),
                PinchState::Idle => ActiveGesture::Idle,
            };
            (next, update)
        } else if sample.touch_count() == 1 {
            let state = match self.active {
                ActiveGesture::Pinching(_) => return None,
                ActiveGesture::Panning(snapshot) => PanState::Moving(snapshot),
                ActiveGesture::Idle => PanState::Idle,
            };
            let (state, update) = state.step(current, sample.dx, sample.dy, ctx);
            let next = match state {
                PanState::Moving(snapshot) => ActiveGesture::Panning(snapshot),
                PanState::Idle => ActiveGesture::Idle,
            };
            (next, update)
        } else {
            return None;
        };

        if let Some(transform) = update {
            if !transform.is_finite() {
                tracing::warn!(?transform, "dropping non-finite gesture result");
                return None;
            }
        }

        self.active = next;
        update
    }
}
