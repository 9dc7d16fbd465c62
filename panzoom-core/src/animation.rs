//! Animation port.
//!
//! The core never owns a clock. Every committed transform is handed to an
//! [`AnimationDriver`] together with a duration: zero for gesture updates,
//! non-zero for controller-initiated navigation. The driver interpolates
//! toward the newest target; a new target supersedes any in flight.

use serde::{Deserialize, Serialize};

use crate::transform::AffineTransform;

/// Default duration of controller-initiated moves, in milliseconds.
pub const DEFAULT_ZOOM_DURATION_MS: u64 = 700;

/// A transform to animate toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationTarget {
    /// Target transform.
    pub transform: AffineTransform,
    /// Time to reach the target. Zero means jump immediately.
    pub duration_ms: u64,
}

impl AnimationTarget {
    /// A target reached immediately.
    #[must_use]
    pub const fn immediate(transform: AffineTransform) -> Self {
        Self {
            transform,
            duration_ms: 0,
        }
    }

    /// Whether this target should be applied without interpolation.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        self.duration_ms == 0
    }
}

/// Consumer of committed transforms, implemented by the host's animation layer.
pub trait AnimationDriver {
    /// Start moving toward `target`, replacing any animation in flight.
    fn animate_to(&mut self, target: &AnimationTarget);

    /// Called when the committed scale changes.
    fn zoom_changed(&mut self, _scale: f64) {}
}

/// Driver that discards every target.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDriver;

impl AnimationDriver for NullDriver {
    fn animate_to(&mut self, _target: &AnimationTarget) {}
}

/// Driver that records targets and zoom changes for hosts that poll.
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    targets: Vec<AnimationTarget>,
    zooms: Vec<f64>,
}

impl RecordingDriver {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets received since the last [`take_targets`](Self::take_targets).
    #[must_use]
    pub fn targets(&self) -> &[AnimationTarget] {
        &self.targets
    }

    /// The most recent target, which supersedes all earlier ones.
    #[must_use]
    pub fn latest(&self) -> Option<&AnimationTarget> {
        self.targets.last()
    }

    /// Drain recorded targets.
    pub fn take_targets(&mut self) -> Vec<AnimationTarget> {
        std::mem::take(&mut self.targets)
    }

    /// Scales reported through [`AnimationDriver::zoom_changed`].
    #[must_use]
    pub fn zooms(&self) -> &[f64] {
        &self.zooms
    }

    /// Drain recorded zoom changes.
    pub fn take_zooms(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.zooms)
    }
}

impl AnimationDriver for RecordingDriver {
    fn animate_to(&mut self, target: &AnimationTarget) {
        self.targets.push(*target);
    }

    fn zoom_changed(&mut self, scale: f64) {
        self.zooms.push(scale);
    }
}
