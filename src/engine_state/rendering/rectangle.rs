//! Rectangle primitives.
//!
//! Everything the world draws is an axis-aligned colored rectangle: entities
//! are a few of them, and every solid terrain cell is one. Shapes are built in
//! world space and projected into screen space with the camera.

use cgmath::Point2;
use serde::Serialize;

use crate::engine_state::camera_state::Camera;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Generic entity body.
    pub const DEEP_PINK: Color = Color::rgb(255, 20, 147);
    /// Generic entity markings.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Player head.
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// Player body.
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Solid terrain.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

/// A rectangle in world space. `position` is the top-left corner, so the
/// rectangle covers `[x, x + width]` horizontally and `[y - height, y]` vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    /// Top-left corner in world units.
    pub position: Point2<f64>,
    /// Width in world units.
    pub width: f64,
    /// Height in world units.
    pub height: f64,
    /// Fill color.
    pub color: Color,
}

impl WorldRect {
    /// Creates a new world rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64, color: Color) -> Self {
        Self {
            position: Point2::new(x, y),
            width,
            height,
            color,
        }
    }

    /// A one-block square.
    pub fn unit(x: f64, y: f64, color: Color) -> Self {
        Self::new(x, y, 1.0, 1.0, color)
    }

    /// Projects this rectangle onto the screen.
    pub fn project(&self, camera: &Camera) -> ScreenRect {
        let corner = camera.world_to_screen(self.position);
        ScreenRect {
            x: corner.x,
            y: corner.y,
            width: camera.world_length_to_screen(self.width),
            height: camera.world_length_to_screen(self.height),
            color: self.color,
        }
    }
}

/// A rectangle in screen pixels, ready for a fill-rect primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenRect {
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Fill color.
    pub color: Color,
}

impl ScreenRect {
    /// Whether any part of this rectangle lies inside a `width` x `height` viewport.
    pub fn intersects_viewport(&self, width: f64, height: f64) -> bool {
        self.x < width && self.y < height && self.x + self.width > 0.0 && self.y + self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_with_zoom_and_padding() {
        let camera = Camera::default();
        let rect = WorldRect::unit(0.0, 0.0, Color::WHITE).project(&camera);
        assert_eq!(rect.x, -12.5 + 400.0);
        assert_eq!(rect.y, 12.5 + 300.0);
        assert_eq!(rect.width, 25.5);
        assert_eq!(rect.height, 25.5);
        assert_eq!(rect.color, Color::WHITE);
    }

    #[test]
    fn viewport_intersection() {
        let rect = ScreenRect {
            x: -10.0,
            y: 5.0,
            width: 20.0,
            height: 20.0,
            color: Color::BLACK,
        };
        assert!(rect.intersects_viewport(100.0, 100.0));
        let off_screen = ScreenRect { x: 120.0, ..rect };
        assert!(!off_screen.intersects_viewport(100.0, 100.0));
    }
}
