//! # Camera State Management
//!
//! This module ties the camera to the entity it follows.
//!
//! ## Core Components
//! - `Camera`: zoom, viewport size and the world/screen transforms
//! - `CameraState`: the camera plus the id of its anchor entity
//!
//! The anchor entity is also the viewport driver: the chunks generated each
//! tick are the ones visible around its position.

use cgmath::Point2;

use super::entities::{Entity, EntityId};

pub mod camera;

pub use camera::Camera;

/// The camera and the entity it is anchored to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// The camera itself.
    pub camera: Camera,
    /// The entity the camera follows.
    pub anchor: EntityId,
}

impl CameraState {
    /// Creates a camera state following `anchor`.
    pub fn new(camera: Camera, anchor: EntityId) -> Self {
        Self { camera, anchor }
    }

    /// Finds the anchor among `entities`.
    pub fn anchor_entity<'a>(&self, entities: &'a [Entity]) -> Option<&'a Entity> {
        entities.iter().find(|entity| entity.id == self.anchor)
    }

    /// Re-centers the camera on the anchor, if it still exists.
    ///
    /// # Returns
    /// The anchor position the camera now follows.
    pub fn update(&mut self, entities: &[Entity]) -> Option<Point2<f64>> {
        let position = self.anchor_entity(entities)?.position();
        self.camera.follow(position);
        Some(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_the_anchor_entity() {
        let entities = vec![
            Entity::generic(0, Point2::new(1.0, 1.0)),
            Entity::player(1, "steve", Point2::new(-7.0, 2.0)),
        ];
        let mut state = CameraState::new(Camera::default(), 1);
        assert_eq!(state.update(&entities), Some(Point2::new(-7.0, 2.0)));
        assert_eq!(state.camera.anchor, [-7.0, 2.0]);
    }

    #[test]
    fn missing_anchor_leaves_the_camera_alone() {
        let mut state = CameraState::new(Camera::default(), 9);
        assert_eq!(state.update(&[]), None);
        assert_eq!(state.camera.anchor, [0.0, 0.0]);
    }
}
