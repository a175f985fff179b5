//! Screen ↔ world coordinate transforms and the viewport camera.
//!
//! `screen = world * zoom + pan`. Zoom is uniform on both axes and is kept
//! positive by `Camera`, so the inverse is always defined.

use crate::model::Point;

/// Hard zoom limits. Configured bounds may narrow them, never widen them.
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.0;

/// Convert a screen-space point to world space.
pub fn to_world(screen: Point, pan: Point, zoom: f32) -> Point {
    (screen - pan) / zoom
}

/// Convert a world-space point to screen space.
pub fn to_screen(world: Point, pan: Point, zoom: f32) -> Point {
    world * zoom + pan
}

/// Pan offset and zoom factor of the viewport.
///
/// Zoom is anchored at the world origin, not at the pointer: scaling with
/// a fixed pan makes content drift relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan: Point,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::with_bounds(MIN_ZOOM, MAX_ZOOM)
    }
}

impl Camera {
    /// A camera at the origin with zoom 1.0.
    ///
    /// `min_zoom` is kept within `[MIN_ZOOM, 1.0]` and `max_zoom` within
    /// `[1.0, MAX_ZOOM]`; non-finite bounds become the hard limits.
    pub fn with_bounds(min_zoom: f32, max_zoom: f32) -> Self {
        let min_zoom = if min_zoom.is_finite() {
            min_zoom.clamp(MIN_ZOOM, 1.0)
        } else {
            MIN_ZOOM
        };
        let max_zoom = if max_zoom.is_finite() {
            max_zoom.clamp(1.0, MAX_ZOOM)
        } else {
            MAX_ZOOM
        };
        Self {
            pan: Point::ZERO,
            zoom: 1.0,
            min_zoom,
            max_zoom,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_bounds(&self) -> (f32, f32) {
        (self.min_zoom, self.max_zoom)
    }

    /// Set zoom, clamping into bounds. Non-finite requests are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Multiply zoom by `factor` (wheel steps), then clamp.
    pub fn zoom_by(&mut self, factor: f32) {
        self.set_zoom(self.zoom * factor);
    }

    /// Add `delta` to zoom (toolbar buttons), then clamp.
    pub fn step_zoom(&mut self, delta: f32) {
        self.set_zoom(self.zoom + delta);
    }

    /// Back to pan (0, 0) and zoom 1.0.
    pub fn reset(&mut self) {
        self.pan = Point::ZERO;
        self.set_zoom(1.0);
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        to_world(screen, self.pan, self.zoom)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        to_screen(world, self.pan, self.zoom)
    }
}
