//! WebAssembly bindings for panzoom-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! Transforms and animation targets cross the boundary as JSON; the host
//! polls [`WasmPanZoom::take_animation_targets`] after each call and feeds
//! them to its own animation layer.

use wasm_bindgen::prelude::*;

use crate::{
    GestureSample, PanZoomConfig, PanZoomController, Point, RecordingDriver, ViewportExtent,
    DEFAULT_ZOOM_DURATION_MS,
};

/// Initialize the pan/zoom WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Pan/zoom controller instance for WASM.
#[wasm_bindgen]
pub struct WasmPanZoom {
    controller: PanZoomController<RecordingDriver>,
}

#[wasm_bindgen]
impl WasmPanZoom {
    /// Create a controller from a JSON configuration. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is malformed or fails validation.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmPanZoom, String> {
        let config = if config_json.trim().is_empty() {
            PanZoomConfig::default()
        } else {
            PanZoomConfig::from_json(config_json).map_err(|e| e.to_string())?
        };
        let controller = PanZoomController::new(config)
            .map_err(|e| e.to_string())?
            .with_driver(RecordingDriver::new());
        Ok(Self { controller })
    }

    /// Report the viewport's measured size and page position.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width: f64, height: f64, page_x: f64, page_y: f64) {
        self.controller
            .set_viewport(ViewportExtent::new(width, height).at(page_x, page_y));
    }

    /// Process a gesture sample serialized as JSON.
    ///
    /// Returns the committed transform as JSON, or `None` if nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error string if the sample cannot be parsed.
    #[wasm_bindgen(js_name = handleSample)]
    pub fn handle_sample(&mut self, sample_json: &str) -> Result<Option<String>, String> {
        let sample: GestureSample = serde_json::from_str(sample_json).map_err(|e| e.to_string())?;
        self.controller
            .handle_sample(&sample)
            .map(|t| serde_json::to_string(&t).map_err(|e| e.to_string()))
            .transpose()
    }

    /// Whether the host should hand this sample's gesture to the controller.
    ///
    /// # Errors
    ///
    /// Returns an error string if the sample cannot be parsed.
    #[wasm_bindgen(js_name = shouldClaim)]
    pub fn should_claim(&self, sample_json: &str) -> Result<bool, String> {
        let sample: GestureSample = serde_json::from_str(sample_json).map_err(|e| e.to_string())?;
        Ok(self.controller.should_claim(&sample))
    }

    /// End the current gesture.
    #[wasm_bindgen(js_name = endGesture)]
    pub fn end_gesture(&mut self) {
        self.controller.end_gesture();
    }

    /// Enable or disable gesture handling.
    #[wasm_bindgen(js_name = setDisabled)]
    pub fn set_disabled(&mut self, disabled: bool) {
        self.controller.set_disabled(disabled);
    }

    /// Animate so canvas point `(x, y)` sits at the viewport center at `scale`.
    ///
    /// A missing duration uses the default of 700 ms. Returns `false` if the
    /// target was not finite.
    #[wasm_bindgen(js_name = zoomToPoint)]
    pub fn zoom_to_point(&mut self, x: f64, y: f64, scale: f64, duration_ms: Option<u32>) -> bool {
        let duration = duration_ms.map_or(DEFAULT_ZOOM_DURATION_MS, u64::from);
        self.controller
            .zoom_to_point(Point::new(x, y), scale, duration)
            .is_some()
    }

    /// Animate back to the initial view.
    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&mut self, duration_ms: Option<u32>) -> bool {
        let duration = duration_ms.map_or(DEFAULT_ZOOM_DURATION_MS, u64::from);
        self.controller.reset_zoom(duration).is_some()
    }

    /// Current transform as JSON.
    #[wasm_bindgen(js_name = getTransformJson)]
    #[must_use]
    pub fn get_transform_json(&self) -> String {
        serde_json::to_string(&self.controller.transform()).unwrap_or_default()
    }

    /// Current transform as `[a, b, c, d, e, f]` for an SVG `matrix()` attribute.
    #[wasm_bindgen(js_name = getMatrix)]
    #[must_use]
    pub fn get_matrix(&self) -> js_sys::Float64Array {
        let t = self.controller.transform();
        js_sys::Float64Array::from(
            &[
                t.scale_x,
                t.skew_x,
                t.skew_y,
                t.scale_y,
                t.translate_x,
                t.translate_y,
            ][..],
        )
    }

    /// Drain pending animation targets as a JSON array.
    #[wasm_bindgen(js_name = takeAnimationTargets)]
    pub fn take_animation_targets(&mut self) -> String {
        let targets = self.controller.driver_mut().take_targets();
        serde_json::to_string(&targets).unwrap_or_default()
    }

    /// Drain zoom changes reported since the last call, as a JSON array of scales.
    #[wasm_bindgen(js_name = takeZoomChanges)]
    pub fn take_zoom_changes(&mut self) -> String {
        let zooms = self.controller.driver_mut().take_zooms();
        serde_json::to_string(&zooms).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AffineTransform;

    fn pinch_json(x1: f64, x2: f64) -> String {
        format!(
            r#"{{"touches":[{{"page_x":{x1},"page_y":100.0}},{{"id":1,"page_x":{x2},"page_y":100.0}}]}}"#
        )
    }

    #[test]
    fn new_accepts_empty_config() {
        let panzoom = WasmPanZoom::new("").expect("defaults are valid");
        let transform: AffineTransform =
            serde_json::from_str(&panzoom.get_transform_json()).expect("valid json");
        assert!(transform.approx_eq(&AffineTransform::initial_view(720.0, 1080.0, 0.7), 1e-9));
    }

    #[test]
    fn new_rejects_invalid_config() {
        assert!(WasmPanZoom::new(r#"{"min_scale": 2.0, "max_scale": 1.0}"#).is_err());
        assert!(WasmPanZoom::new("{ not valid json }").is_err());
    }

    #[test]
    fn handle_sample_rejects_invalid_json() {
        let mut panzoom = WasmPanZoom::new("").expect("defaults are valid");
        assert!(panzoom.handle_sample("not json").is_err());
    }

    #[test]
    fn pinch_round_trip_through_json() {
        let mut panzoom =
            WasmPanZoom::new(r#"{"min_scale":0.5,"max_scale":3.0,"initial_zoom":1.0}"#)
                .expect("valid config");
        panzoom.set_viewport(360.0, 640.0, 0.0, 0.0);

        let first = panzoom
            .handle_sample(&pinch_json(100.0, 200.0))
            .expect("valid sample");
        assert!(first.is_none());

        let second = panzoom
            .handle_sample(&pinch_json(50.0, 250.0))
            .expect("valid sample")
            .expect("should commit");
        assert!(second.contains("\"scaleX\":2.0"));

        let targets = panzoom.take_animation_targets();
        assert!(targets.contains("\"duration_ms\":0"));
        assert_eq!(panzoom.take_animation_targets(), "[]");
    }

    #[test]
    fn reset_zoom_queues_default_duration() {
        let mut panzoom = WasmPanZoom::new("").expect("defaults are valid");
        panzoom.set_viewport(360.0, 640.0, 0.0, 0.0);
        assert!(panzoom.zoom_to_point(100.0, 100.0, 1.0, Some(0)));
        assert!(panzoom.reset_zoom(None));
        let targets = panzoom.take_animation_targets();
        assert!(targets.contains("\"duration_ms\":700"));
    }

    #[test]
    fn should_claim_parses_sample() {
        let panzoom = WasmPanZoom::new("").expect("defaults are valid");
        assert_eq!(panzoom.should_claim(&pinch_json(0.0, 10.0)), Ok(true));
        assert_eq!(
            panzoom.should_claim(r#"{"touches":[{"page_x":0.0,"page_y":0.0}],"dx":1.0}"#),
            Ok(false)
        );
    }

    #[test]
    fn take_zoom_changes_drains() {
        let mut panzoom =
            WasmPanZoom::new(r#"{"min_scale":0.5,"max_scale":3.0,"initial_zoom":1.0}"#)
                .expect("valid config");
        panzoom.set_viewport(360.0, 640.0, 0.0, 0.0);
        panzoom
            .handle_sample(&pinch_json(100.0, 200.0))
            .expect("valid sample");
        panzoom
            .handle_sample(&pinch_json(50.0, 250.0))
            .expect("valid sample");

        assert_eq!(panzoom.take_zoom_changes(), "[2.0]");
        assert_eq!(panzoom.take_zoom_changes(), "[]");
    }
}
