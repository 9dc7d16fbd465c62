//! # Saorsa Pan/Zoom Core
//!
//! Pinch-zoom and pan for a single vector canvas inside a bounded viewport.
//! Compiles to WASM so web and hybrid hosts can drive it directly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             PanZoomController               │
//! │  - owns the live transform                  │
//! │  - glitch filter, enable/disable            │
//! ├──────────────────────┬──────────────────────┤
//! │  GestureDispatcher   │  Navigation          │
//! │  - Pinch processor   │  - zoom to point     │
//! │  - Pan processor     │  - reset             │
//! ├──────────────────────┴──────────────────────┤
//! │  Bounds policy       │  Affine algebra      │
//! │  - scale clamp       │  - compose           │
//! │  - translation clamp │  - initial view      │
//! ├─────────────────────────────────────────────┤
//! │  AnimationDriver (host-provided port)       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use panzoom_core::{GestureSample, PanZoomConfig, PanZoomController, Point, ViewportExtent};
//!
//! let config = PanZoomConfig::new(0.5, 3.0).with_initial_zoom(1.0);
//! let mut controller = PanZoomController::new(config)?;
//! controller.set_viewport(ViewportExtent::new(360.0, 640.0));
//!
//! // The first two-finger sample only records where the pinch started.
//! controller.handle_sample(&GestureSample::pinch(
//!     Point::new(100.0, 100.0),
//!     Point::new(200.0, 100.0),
//! ));
//! let zoomed = controller
//!     .handle_sample(&GestureSample::pinch(
//!         Point::new(50.0, 100.0),
//!         Point::new(250.0, 100.0),
//!     ))
//!     .expect("pinch should commit");
//! assert!((zoomed.scale_x - 2.0).abs() < 1e-9);
//! # Ok::<(), panzoom_core::PanZoomError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod bounds;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod navigation;
pub mod pan;
pub mod pinch;
pub mod transform;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use animation::{
    AnimationDriver, AnimationTarget, NullDriver, RecordingDriver, DEFAULT_ZOOM_DURATION_MS,
};
pub use bounds::{clamp_scale, clamp_translation, translation_bounds, TranslationBounds};
pub use config::PanZoomConfig;
pub use controller::PanZoomController;
pub use error::{PanZoomError, PanZoomResult};
pub use event::{GestureSample, TouchPhase, TouchPoint};
pub use geometry::{distance, midpoint, Point, ViewportExtent};
pub use gesture::{ActiveGesture, GestureContext, GestureDispatcher};
pub use navigation::{compute_reset_transform, compute_zoom_to_point_transform};
pub use pan::{PanSnapshot, PanState};
pub use pinch::{PinchSnapshot, PinchState};
pub use transform::AffineTransform;

/// Pan/zoom core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
