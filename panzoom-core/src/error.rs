//! Error types for pan/zoom operations.

use thiserror::Error;

/// Result type for pan/zoom operations.
pub type PanZoomResult<T> = Result<T, PanZoomError>;

/// Errors that can occur when configuring the pan/zoom core.
///
/// Gesture processing itself never fails: anomalous samples are dropped and
/// the previous transform is kept. Only configuration is validated.
#[derive(Debug, Error)]
pub enum PanZoomError {
    /// `min_scale` is greater than `max_scale`.
    #[error("Invalid scale range: min_scale {min} is greater than max_scale {max}")]
    InvalidScaleRange {
        /// Configured minimum scale.
        min: f64,
        /// Configured maximum scale.
        max: f64,
    },

    /// A scale bound is zero, negative or not finite.
    #[error("Scale bound {name} must be positive and finite, got {value}")]
    NonPositiveScale {
        /// Name of the offending setting.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Canvas design size is zero, negative or not finite.
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize {
        /// Configured canvas width.
        width: f64,
        /// Configured canvas height.
        height: f64,
    },

    /// Initial zoom is zero, negative or not finite.
    #[error("Invalid initial zoom: {0}")]
    InvalidInitialZoom(f64),

    /// An input filter threshold is negative or not a number.
    #[error("Invalid threshold {name}: {value}")]
    InvalidThreshold {
        /// Name of the offending setting.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Configuration or sample serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
