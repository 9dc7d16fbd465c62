//! Gesture scripts and the replay loop.

use panzoom_core::{
    AffineTransform, AnimationDriver, AnimationTarget, GestureSample, PanZoomConfig,
    PanZoomController, PanZoomResult, Point, ViewportExtent, DEFAULT_ZOOM_DURATION_MS,
};
use serde::{Deserialize, Serialize};

use crate::ReplayError;

/// One step of a recorded gesture script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ReplayStep {
    /// Host layout pass reported a new viewport.
    Layout(ViewportExtent),
    /// Host gesture dispatcher delivered a sample.
    Sample(GestureSample),
    /// All touches released.
    End,
    /// Programmatic zoom to a canvas point.
    ZoomTo {
        /// Canvas X coordinate to center.
        x: f64,
        /// Canvas Y coordinate to center.
        y: f64,
        /// Target scale.
        scale: f64,
        /// Animation duration; defaults to 700 ms.
        #[serde(default)]
        duration_ms: Option<u64>,
    },
    /// Programmatic reset to the initial view.
    Reset {
        /// Animation duration; defaults to 700 ms.
        #[serde(default)]
        duration_ms: Option<u64>,
    },
    /// Stop handling gestures.
    Disable,
    /// Resume handling gestures.
    Enable,
}

impl ReplayStep {
    /// Short name used in output records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Layout(_) => "layout",
            Self::Sample(_) => "sample",
            Self::End => "end",
            Self::ZoomTo { .. } => "zoom_to",
            Self::Reset { .. } => "reset",
            Self::Disable => "disable",
            Self::Enable => "enable",
        }
    }
}

/// Parse a script from JSON.
///
/// # Errors
///
/// Returns an error if the JSON is not an array of steps.
pub fn parse_script(json: &str) -> Result<Vec<ReplayStep>, ReplayError> {
    serde_json::from_str(json).map_err(ReplayError::Script)
}

/// State of the controller after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayRecord {
    /// Zero-based step index.
    pub index: usize,
    /// Step kind.
    pub step: &'static str,
    /// Whether this step committed a new transform.
    pub committed: bool,
    /// Transform after the step.
    pub transform: AffineTransform,
    /// Animation target handed to the driver during this step, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationTarget>,
}

/// Animation driver that logs targets and keeps the latest one for the
/// current step.
#[derive(Debug, Default)]
pub struct TracingDriver {
    pending: Option<AnimationTarget>,
}

impl TracingDriver {
    /// Take the target received since the last call.
    pub fn take(&mut self) -> Option<AnimationTarget> {
        self.pending.take()
    }
}

impl AnimationDriver for TracingDriver {
    fn animate_to(&mut self, target: &AnimationTarget) {
        tracing::debug!(
            scale = target.transform.scale_x,
            translate_x = target.transform.translate_x,
            translate_y = target.transform.translate_y,
            duration_ms = target.duration_ms,
            "animate"
        );
        self.pending = Some(*target);
    }

    fn zoom_changed(&mut self, scale: f64) {
        tracing::info!(scale, "zoom changed");
    }
}

/// Run every step through a fresh controller and record the result of each.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn replay(config: PanZoomConfig, steps: &[ReplayStep]) -> PanZoomResult<Vec<ReplayRecord>> {
    let mut controller = PanZoomController::new(config)?.with_driver(TracingDriver::default());

    let records = steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let committed = match step {
                ReplayStep::Layout(viewport) => {
                    controller.set_viewport(*viewport);
                    false
                }
                ReplayStep::Sample(sample) => controller.handle_sample(sample).is_some(),
                ReplayStep::End => {
                    controller.end_gesture();
                    false
                }
                ReplayStep::ZoomTo {
                    x,
                    y,
                    scale,
                    duration_ms,
                } => controller
                    .zoom_to_point(
                        Point::new(*x, *y),
                        *scale,
                        duration_ms.unwrap_or(DEFAULT_ZOOM_DURATION_MS),
                    )
                    .is_some(),
                ReplayStep::Reset { duration_ms } => controller
                    .reset_zoom(duration_ms.unwrap_or(DEFAULT_ZOOM_DURATION_MS))
                    .is_some(),
                ReplayStep::Disable => {
                    controller.set_disabled(true);
                    false
                }
                ReplayStep::Enable => {
                    controller.set_disabled(false);
                    false
                }
            };
            tracing::trace!(index, step = step.name(), committed, "step replayed");

            ReplayRecord {
                index,
                step: step.name(),
                committed,
                transform: controller.transform(),
                animation: controller.driver_mut().take(),
            }
        })
        .collect();

    Ok(records)
}
