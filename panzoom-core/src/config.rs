//! Controller configuration.

use serde::{Deserialize, Serialize};

use crate::{PanZoomError, PanZoomResult};

/// Default minimum scale.
pub const DEFAULT_MIN_SCALE: f64 = 0.5;
/// Default maximum scale.
pub const DEFAULT_MAX_SCALE: f64 = 1.0;
/// Default initial zoom factor.
pub const DEFAULT_INITIAL_ZOOM: f64 = 0.7;
/// Default canvas design width.
pub const DEFAULT_CANVAS_WIDTH: f64 = 720.0;
/// Default canvas design height.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1080.0;
/// Cumulative drag distance, in pixels, before a single touch claims the pan.
///
/// Tuned on physical phones rather than derived.
pub const DEFAULT_PAN_ACTIVATION_THRESHOLD: f64 = 5.0;
/// Combined gesture velocity above which a sample is treated as a glitch.
pub const DEFAULT_GLITCH_VELOCITY_THRESHOLD: f64 = 6.0;

/// Configuration for a [`PanZoomController`](crate::PanZoomController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanZoomConfig {
    /// Smallest scale a gesture may reach.
    pub min_scale: f64,
    /// Largest scale a gesture may reach.
    pub max_scale: f64,
    /// Scale of the initial view and of a reset.
    pub initial_zoom: f64,
    /// Unscaled design width of the canvas content.
    pub canvas_width: f64,
    /// Unscaled design height of the canvas content.
    pub canvas_height: f64,
    /// Drag distance required before a single touch claims the gesture.
    pub pan_activation_threshold: f64,
    /// Samples whose `|vx| + |vy|` exceed this are dropped with their successor.
    pub glitch_velocity_threshold: f64,
}

impl Default for PanZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            initial_zoom: DEFAULT_INITIAL_ZOOM,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            pan_activation_threshold: DEFAULT_PAN_ACTIVATION_THRESHOLD,
            glitch_velocity_threshold: DEFAULT_GLITCH_VELOCITY_THRESHOLD,
        }
    }
}

impl PanZoomConfig {
    /// Create a configuration with the given scale range and default everything else.
    #[must_use]
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self {
            min_scale,
            max_scale,
            ..Self::default()
        }
    }

    /// Set the canvas design size.
    #[must_use]
    pub fn with_canvas_size(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Set the initial zoom factor.
    #[must_use]
    pub fn with_initial_zoom(mut self, zoom: f64) -> Self {
        self.initial_zoom = zoom;
        self
    }

    /// Set the glitch velocity threshold.
    #[must_use]
    pub fn with_glitch_velocity_threshold(mut self, threshold: f64) -> Self {
        self.glitch_velocity_threshold = threshold;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails validation.
    pub fn from_json(json: &str) -> PanZoomResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the controller cannot work with.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> PanZoomResult<()> {
        for (name, value) in [("min_scale", self.min_scale), ("max_scale", self.max_scale)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PanZoomError::NonPositiveScale { name, value });
            }
        }
        if self.min_scale > self.max_scale {
            return Err(PanZoomError::InvalidScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if !(self.canvas_width.is_finite()
            && self.canvas_height.is_finite()
            && self.canvas_width > 0.0
            && self.canvas_height > 0.0)
        {
            return Err(PanZoomError::InvalidCanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if !(self.initial_zoom.is_finite() && self.initial_zoom > 0.0) {
            return Err(PanZoomError::InvalidInitialZoom(self.initial_zoom));
        }
        for (name, value) in [
            ("pan_activation_threshold", self.pan_activation_threshold),
            ("glitch_velocity_threshold", self.glitch_velocity_threshold),
        ] {
            // Infinity is allowed and disables the filter.
            if value.is_nan() || value < 0.0 {
                return Err(PanZoomError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PanZoomConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.initial_zoom - 0.7).abs() < f64::EPSILON);
        assert!((config.canvas_width - 720.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_inverted_scale_range() {
        let err = PanZoomConfig::new(2.0, 1.0).validate().unwrap_err();
        assert!(matches!(err, PanZoomError::InvalidScaleRange { .. }));
    }

    #[test]
    fn test_accepts_equal_scale_bounds() {
        assert!(PanZoomConfig::new(1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let err = PanZoomConfig::new(0.0, 1.0).validate().unwrap_err();
        assert!(matches!(
            err,
            PanZoomError::NonPositiveScale {
                name: "min_scale",
                ..
            }
        ));

        let err = PanZoomConfig::new(0.5, f64::NAN).validate().unwrap_err();
        assert!(matches!(
            err,
            PanZoomError::NonPositiveScale {
                name: "max_scale",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_canvas_size() {
        let err = PanZoomConfig::default()
            .with_canvas_size(0.0, 100.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PanZoomError::InvalidCanvasSize { .. }));

        let err = PanZoomConfig::default()
            .with_canvas_size(100.0, -5.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PanZoomError::InvalidCanvasSize { .. }));
    }

    #[test]
    fn test_rejects_bad_initial_zoom() {
        let err = PanZoomConfig::default()
            .with_initial_zoom(-1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PanZoomError::InvalidInitialZoom(_)));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let err = PanZoomConfig::default()
            .with_glitch_velocity_threshold(-1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PanZoomError::InvalidThreshold { .. }));

        let disabled = PanZoomConfig::default().with_glitch_velocity_threshold(f64::INFINITY);
        assert!(disabled.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = PanZoomConfig::from_json(r#"{"min_scale": 0.25, "max_scale": 4.0}"#)
            .expect("should parse");
        assert!((config.min_scale - 0.25).abs() < f64::EPSILON);
        assert!((config.max_scale - 4.0).abs() < f64::EPSILON);
        assert!((config.canvas_height - DEFAULT_CANVAS_HEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_validates() {
        let err = PanZoomConfig::from_json(r#"{"min_scale": 3.0, "max_scale": 1.0}"#).unwrap_err();
        assert!(matches!(err, PanZoomError::InvalidScaleRange { .. }));

        let err = PanZoomConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, PanZoomError::Serialization(_)));
    }
}
