//! # Physics
//!
//! The gravity and velocity integrator shared by every entity.
//!
//! Each step applies gravity (clamped at terminal velocity), moves vertically
//! and clamps at the world floor `y = 0`, then moves horizontally. The floor is
//! a flat plane: terrain blocks are not consulted.

use cgmath::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Downward acceleration in blocks per second squared.
pub const GRAVITY: f64 = 9.8;
/// The most negative vertical velocity gravity may produce.
pub const TERMINAL_VELOCITY: f64 = -300.0;
/// Horizontal speed of a player holding left or right.
pub const MOVE_SPEED: f64 = 4.0;
/// Vertical velocity added by a jump.
pub const JUMP_IMPULSE: f64 = 7.0;
/// Height of the implicit world floor.
pub const WORLD_FLOOR_Y: f64 = 0.0;

/// The constants every physics step uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConstants {
    /// Downward acceleration.
    pub gravity: f64,
    /// Lower bound on vertical velocity.
    pub terminal_velocity: f64,
    /// Player horizontal speed.
    pub move_speed: f64,
    /// Jump velocity delta.
    pub jump_impulse: f64,
}

impl PhysicsConstants {
    /// Rejects non-finite constants and a positive terminal velocity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("gravity", self.gravity, self.gravity >= 0.0),
            (
                "terminal_velocity",
                self.terminal_velocity,
                self.terminal_velocity <= 0.0,
            ),
            ("move_speed", self.move_speed, self.move_speed >= 0.0),
            ("jump_impulse", self.jump_impulse, self.jump_impulse >= 0.0),
        ];

        for (name, value, in_range) in checks {
            if !value.is_finite() || !in_range {
                return Err(ConfigError::InvalidPhysics { name, value });
            }
        }
        Ok(())
    }
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            move_speed: MOVE_SPEED,
            jump_impulse: JUMP_IMPULSE,
        }
    }
}

/// Horizontal movement intent for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    /// Left is held.
    pub left: bool,
    /// Right is held.
    pub right: bool,
}

impl MovementIntent {
    /// The horizontal velocity this intent asks for. Holding both directions cancels out.
    pub fn horizontal_velocity(&self, move_speed: f64) -> f64 {
        let mut xvel = 0.0;
        if self.left {
            xvel -= move_speed;
        }
        if self.right {
            xvel += move_speed;
        }
        xvel
    }
}

/// Position and velocity of a movable object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    /// World position; x grows rightwards, y grows upwards.
    pub position: Point2<f64>,
    /// Velocity in blocks per second.
    pub velocity: Vector2<f64>,
}

impl PhysicsBody {
    /// Creates a body at rest at `position`.
    pub fn new(position: Point2<f64>) -> Self {
        Self {
            position,
            velocity: Vector2::new(0.0, 0.0),
        }
    }

    /// Advances the body by `dt` seconds.
    pub fn step(&mut self, dt: f64, constants: &PhysicsConstants) {
        self.apply_gravity(dt, constants);
        self.position.x += self.velocity.x * dt;
    }

    fn apply_gravity(&mut self, dt: f64, constants: &PhysicsConstants) {
        self.velocity.y = (self.velocity.y - constants.gravity * dt).max(constants.terminal_velocity);
        self.position.y = (self.position.y + self.velocity.y * dt).max(WORLD_FLOOR_Y);
        // TODO: clamp against the highest solid block under the body instead of the world floor
        if self.position.y == WORLD_FLOOR_Y {
            self.velocity.y = 0.0;
        }
    }

    /// Whether the body is resting on the world floor.
    pub fn on_ground(&self) -> bool {
        self.velocity.y == 0.0 && self.position.y == WORLD_FLOOR_Y
    }

    /// Adds `impulse` to the vertical velocity if the body is on the ground.
    ///
    /// # Returns
    /// `true` if the jump happened.
    pub fn jump(&mut self, impulse: f64) -> bool {
        if !self.on_ground() {
            return false;
        }
        self.velocity.y += impulse;
        true
    }
}
