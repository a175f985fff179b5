//! Editor configuration.
//!
//! Every field has a default, so hosts may pass a partial JSON object
//! (camelCase keys). Out-of-range values are normalized by
//! [`EditorConfig::validated`] rather than rejected.

use crate::model::Point;
use crate::transform::{Camera, MAX_ZOOM, MIN_ZOOM};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Lower zoom clamp, within `[0.5, 1.0]`. Default: **0.5**.
    pub min_zoom: f32,
    /// Upper zoom clamp, within `[1.0, 2.0]`. Default: **2.0**.
    pub max_zoom: f32,
    /// Wheel factor when scrolling up. Default: **1.1**.
    pub wheel_zoom_in: f32,
    /// Wheel factor when scrolling down. Default: **0.9**.
    pub wheel_zoom_out: f32,
    /// Additive step for the zoom buttons. Default: **0.1**.
    pub button_zoom_step: f32,
    /// Max gap between two presses counted as a double tap. Default: **300 ms**.
    pub double_tap_ms: f64,
    /// Text of nodes created by the add-node action.
    pub default_node_text: String,
    /// Base world position for new nodes.
    pub spawn_origin: Point,
    /// New nodes land at `spawn_origin + [0, jitter)` on each axis.
    pub spawn_jitter: f32,
    /// Node box size in world units, used for hit testing and painting.
    pub node_width: f32,
    pub node_height: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            button_zoom_step: 0.1,
            double_tap_ms: 300.0,
            default_node_text: "New node".to_string(),
            spawn_origin: Point::new(100.0, 100.0),
            spawn_jitter: 200.0,
            node_width: 140.0,
            node_height: 44.0,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config, falling back to defaults on malformed input.
    pub fn from_json(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<EditorConfig>(json) {
            Ok(config) => config.validated(),
            Err(e) => {
                log::warn!("invalid editor config, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Normalize values that would break the editor's invariants.
    ///
    /// Zoom bounds that are non-finite, non-positive, or swapped fall back
    /// to `[0.5, 2.0]`. Otherwise they are clamped to `[0.5, 1.0]` and
    /// `[1.0, 2.0]`, so zoom never leaves `[0.5, 2.0]` and resetting the
    /// view always lands on exactly 1.0.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        let bounds_ok = self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom;
        if bounds_ok {
            let (min, max) = (
                self.min_zoom.clamp(MIN_ZOOM, 1.0),
                self.max_zoom.clamp(1.0, MAX_ZOOM),
            );
            if (min, max) != (self.min_zoom, self.max_zoom) {
                log::warn!(
                    "zoom bounds [{}, {}] clamped to [{min}, {max}]",
                    self.min_zoom,
                    self.max_zoom
                );
            }
            self.min_zoom = min;
            self.max_zoom = max;
        } else {
            log::warn!(
                "zoom bounds [{}, {}] rejected, using defaults",
                self.min_zoom,
                self.max_zoom
            );
            self.min_zoom = defaults.min_zoom;
            self.max_zoom = defaults.max_zoom;
        }
        if !(self.wheel_zoom_in.is_finite() && self.wheel_zoom_in > 1.0) {
            self.wheel_zoom_in = defaults.wheel_zoom_in;
        }
        if !(self.wheel_zoom_out.is_finite()
            && self.wheel_zoom_out > 0.0
            && self.wheel_zoom_out < 1.0)
        {
            self.wheel_zoom_out = defaults.wheel_zoom_out;
        }
        if !(self.button_zoom_step.is_finite() && self.button_zoom_step > 0.0) {
            self.button_zoom_step = defaults.button_zoom_step;
        }
        if !self.double_tap_ms.is_finite() || self.double_tap_ms < 0.0 {
            self.double_tap_ms = 0.0;
        }
        if !self.spawn_jitter.is_finite() || self.spawn_jitter < 0.0 {
            self.spawn_jitter = 0.0;
        }
        if !(self.node_width.is_finite() && self.node_width > 0.0) {
            self.node_width = defaults.node_width;
        }
        if !(self.node_height.is_finite() && self.node_height > 0.0) {
            self.node_height = defaults.node_height;
        }
        self
    }

    /// A fresh camera using this config's zoom bounds.
    pub fn camera(&self) -> Camera {
        Camera::with_bounds(self.min_zoom, self.max_zoom)
    }

    pub fn node_size(&self) -> (f32, f32) {
        (self.node_width, self.node_height)
    }
}
