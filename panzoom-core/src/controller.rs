//! The pan/zoom controller.
//!
//! Owns the live transform and is its only writer. Gesture samples, layout
//! updates and navigation requests all go through `&mut self` methods, and
//! every committed transform is forwarded to the animation driver.

use crate::animation::{AnimationDriver, AnimationTarget, NullDriver, DEFAULT_ZOOM_DURATION_MS};
use crate::config::PanZoomConfig;
use crate::event::GestureSample;
use crate::geometry::{Point, ViewportExtent};
use crate::gesture::{ActiveGesture, GestureContext, GestureDispatcher};
use crate::navigation::{compute_reset_transform, compute_zoom_to_point_transform};
use crate::transform::AffineTransform;
use crate::PanZoomResult;

/// Pan/zoom state for one canvas inside one viewport.
#[derive(Debug)]
pub struct PanZoomController<D = NullDriver> {
    config: PanZoomConfig,
    viewport: ViewportExtent,
    layout_known: bool,
    transform: AffineTransform,
    dispatcher: GestureDispatcher,
    disabled: bool,
    /// Samples still to be discarded after a glitch.
    drop_pending: u32,
    driver: D,
}

impl PanZoomController<NullDriver> {
    /// Create a controller showing the initial view.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: PanZoomConfig) -> PanZoomResult<Self> {
        config.validate()?;
        let transform = AffineTransform::initial_view(
            config.canvas_width,
            config.canvas_height,
            config.initial_zoom,
        );
        tracing::info!(
            min_scale = config.min_scale,
            max_scale = config.max_scale,
            initial_zoom = config.initial_zoom,
            canvas_width = config.canvas_width,
            canvas_height = config.canvas_height,
            "pan/zoom controller created"
        );
        Ok(Self {
            config,
            viewport: ViewportExtent::default(),
            layout_known: false,
            transform,
            dispatcher: GestureDispatcher::new(),
            disabled: false,
            drop_pending: 0,
            driver: NullDriver,
        })
    }
}

impl<D: AnimationDriver> PanZoomController<D> {
    /// Replace the animation driver.
    #[must_use]
    pub fn with_driver<E: AnimationDriver>(self, driver: E) -> PanZoomController<E> {
        PanZoomController {
            config: self.config,
            viewport: self.viewport,
            layout_known: self.layout_known,
            transform: self.transform,
            dispatcher: self.dispatcher,
            disabled: self.disabled,
            drop_pending: self.drop_pending,
            driver,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PanZoomConfig {
        &self.config
    }

    /// The live transform.
    #[must_use]
    pub const fn transform(&self) -> AffineTransform {
        self.transform
    }

    /// The last viewport extent reported by the host.
    #[must_use]
    pub const fn viewport(&self) -> &ViewportExtent {
        &self.viewport
    }

    /// Whether the host has reported a layout yet.
    #[must_use]
    pub const fn layout_known(&self) -> bool {
        self.layout_known
    }

    /// The gesture currently in progress.
    #[must_use]
    pub const fn active_gesture(&self) -> &ActiveGesture {
        self.dispatcher.active()
    }

    /// The animation driver.
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the animation driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Whether gesture samples are currently ignored.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable gesture handling. Disabling ends the current gesture.
    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled {
            self.dispatcher.end();
        }
        self.disabled = disabled;
    }

    /// Record a new viewport extent from the host layout pass.
    pub fn set_viewport(&mut self, viewport: ViewportExtent) {
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            page_x = viewport.page_x,
            page_y = viewport.page_y,
            "viewport updated"
        );
        self.viewport = viewport;
        self.layout_known = true;
    }

    /// The transform the controller was created with.
    #[must_use]
    pub fn initial_view_transform(&self) -> AffineTransform {
        AffineTransform::initial_view(
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.initial_zoom,
        )
    }

    /// Whether the host should route this sample's gesture to the controller.
    ///
    /// True for multi-touch, or once the drag has moved past the activation
    /// threshold on either axis.
    #[must_use]
    pub fn should_claim(&self, sample: &GestureSample) -> bool {
        let threshold = self.config.pan_activation_threshold;
        sample.is_multi_touch() || sample.dx.abs() > threshold || sample.dy.abs() > threshold
    }

    /// Process one sample from the host gesture dispatcher.
    ///
    /// Returns the newly committed transform, or `None` when the sample only
    /// changed gesture state, was filtered out, or produced no usable result.
    pub fn handle_sample(&mut self, sample: &GestureSample) -> Option<AffineTransform> {
        if sample.phase.is_terminal() {
            self.end_gesture();
            return None;
        }
        if self.disabled {
            return None;
        }
        if self.drop_pending > 0 {
            self.drop_pending -= 1;
            tracing::trace!("dropping sample after glitch");
            return None;
        }
        // The host occasionally reports far-off coordinates with an absurd velocity.
        if sample.speed() > self.config.glitch_velocity_threshold {
            tracing::warn!(
                vx = sample.vx,
                vy = sample.vy,
                "dropping glitched gesture sample"
            );
            self.drop_pending += 1;
            return None;
        }

        let ctx = self.gesture_context();
        let next = self.dispatcher.dispatch(sample, &self.transform, &ctx)?;
        self.commit(AnimationTarget::immediate(next));
        Some(next)
    }

    /// End the current gesture (all touches released or responder lost).
    pub fn end_gesture(&mut self) {
        self.dispatcher.end();
    }

    /// Move to show canvas point `target` at the viewport center at `scale`.
    ///
    /// The target is not bounded. Returns `None` and leaves the transform
    /// untouched if the inputs produce a non-finite transform.
    pub fn zoom_to_point(
        &mut self,
        target: Point,
        scale: f64,
        duration_ms: u64,
    ) -> Option<AnimationTarget> {
        let transform = compute_zoom_to_point_transform(
            target,
            scale,
            &self.viewport,
            self.config.canvas_width,
            self.config.canvas_height,
        );
        self.navigate(transform, duration_ms)
    }

    /// [`zoom_to_point`](Self::zoom_to_point) with the default duration.
    pub fn zoom_to_point_default(&mut self, target: Point, scale: f64) -> Option<AnimationTarget> {
        self.zoom_to_point(target, scale, DEFAULT_ZOOM_DURATION_MS)
    }

    /// Animate back to the initial view.
    pub fn reset_zoom(&mut self, duration_ms: u64) -> Option<AnimationTarget> {
        let transform = compute_reset_transform(
            self.config.initial_zoom,
            &self.viewport,
            self.config.canvas_width,
            self.config.canvas_height,
        );
        self.navigate(transform, duration_ms)
    }

    fn navigate(&mut self, transform: AffineTransform, duration_ms: u64) -> Option<AnimationTarget> {
        if !transform.is_finite() {
            tracing::warn!(?transform, "ignoring non-finite navigation target");
            return None;
        }
        tracing::info!(
            scale = transform.scale_x,
            translate_x = transform.translate_x,
            translate_y = transform.translate_y,
            duration_ms,
            "navigating"
        );
        let target = AnimationTarget {
            transform,
            duration_ms,
        };
        self.commit(target);
        Some(target)
    }

    fn gesture_context(&self) -> GestureContext {
        GestureContext {
            viewport: self.viewport,
            canvas_width: self.config.canvas_width,
            canvas_height: self.config.canvas_height,
            min_scale: self.config.min_scale,
            max_scale: self.config.max_scale,
        }
    }

    fn commit(&mut self, target: AnimationTarget) {
        let previous_scale = self.transform.scale_x;
        self.transform = target.transform;
        tracing::debug!(transform = ?self.transform, duration_ms = target.duration_ms, "transform committed");

        self.driver.animate_to(&target);
        #[allow(clippy::float_cmp)]
        let scale_changed = self.transform.scale_x != previous_scale;
        if scale_changed {
            self.driver.zoom_changed(self.transform.scale_x);
        }
    }
}
