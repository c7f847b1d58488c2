//! # Camera Implementation
//!
//! The side-view camera: a zoom factor (pixels per world unit), a viewport
//! size in pixels, and the world position it is centered on.
//!
//! ## Coordinate Spaces
//! - World space: x grows rightwards, y grows upwards, one unit per block
//! - Screen space: pixels, origin at the top-left, y grows downwards
//!
//! The camera centers on the middle of the anchor's unit cell, which is why
//! half a block is added to the anchor position in the transforms below.

use cgmath::Point2;
use serde::Serialize;

/// Zoom used when nothing else is configured.
pub const DEFAULT_ZOOM: f64 = 25.0;
/// Zoom never goes below this.
pub const MIN_ZOOM: f64 = 1.0;
/// Scroll pixels per unit of zoom change. Scrolling down zooms out.
pub const ZOOM_SCROLL_DIVISOR: f64 = -50.0;
/// Default viewport width in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;
/// Default viewport height in pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;
/// Largest viewport side in pixels.
///
/// Every visible chunk is generated in the tick it comes into view, so the
/// viewport width at minimum zoom bounds the work of a single tick.
pub const MAX_VIEWPORT_PX: f64 = 8192.0;

/// A 2D camera following an anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    /// World position the view is centered on (before the half-block offset).
    pub anchor: [f64; 2],
    /// Pixels per world unit.
    pub zoom: f64,
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
}

impl Camera {
    /// Creates a camera anchored at the origin.
    pub fn new(zoom: f64, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            anchor: [0.0, 0.0],
            zoom: zoom.max(MIN_ZOOM),
            viewport_width,
            viewport_height,
        }
    }

    /// Moves the camera to follow `anchor`.
    pub fn follow(&mut self, anchor: Point2<f64>) {
        self.anchor = [anchor.x, anchor.y];
    }

    /// The anchor as a point.
    pub fn anchor_point(&self) -> Point2<f64> {
        Point2::new(self.anchor[0], self.anchor[1])
    }

    /// Converts a world position to screen pixels.
    pub fn world_to_screen(&self, world: Point2<f64>) -> Point2<f64> {
        let center_x = self.anchor[0] + 0.5;
        let center_y = self.anchor[1] + 0.5;
        Point2::new(
            (world.x - center_x) * self.zoom + self.viewport_width / 2.0,
            (center_y - world.y) * self.zoom + self.viewport_height / 2.0,
        )
    }

    /// Converts a world-space length to pixels, padded by half a pixel so
    /// neighbouring cells overlap instead of leaving seams.
    pub fn world_length_to_screen(&self, length: f64) -> f64 {
        length * self.zoom + 0.5
    }

    /// Converts screen pixels (e.g. the cursor) to the world position of the
    /// block under them.
    pub fn screen_to_world(&self, screen: Point2<f64>) -> Point2<f64> {
        Point2::new(
            screen.x / self.zoom + self.anchor[0] - self.viewport_width / 2.0 / self.zoom,
            -screen.y / self.zoom + self.anchor[1] + self.viewport_height / 2.0 / self.zoom + 1.0,
        )
    }

    /// Applies a scroll of `delta_y_px` pixels (positive scrolls down and zooms out).
    pub fn apply_scroll(&mut self, delta_y_px: f64) {
        if !delta_y_px.is_finite() {
            return;
        }
        self.zoom = (self.zoom + delta_y_px / ZOOM_SCROLL_DIVISOR).max(MIN_ZOOM);
    }

    /// Resizes the viewport, capping each side at [`MAX_VIEWPORT_PX`].
    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) {
        self.viewport_width = viewport_width.min(MAX_VIEWPORT_PX);
        self.viewport_height = viewport_height.min(MAX_VIEWPORT_PX);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM, DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}
