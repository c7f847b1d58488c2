//! # Entities
//!
//! Movable objects in the world. Every entity owns a [`PhysicsBody`]; what it
//! is (a generic object or a named player) is a closed [`EntityKind`] enum.
//!
//! Players differ from generic entities in one way: when they receive a
//! [`MovementIntent`] for a tick, it overwrites their horizontal velocity
//! before the physics step. There is no horizontal inertia.

use cgmath::Point2;

pub mod physics;

pub use physics::{MovementIntent, PhysicsBody, PhysicsConstants};

/// Stable identifier of an entity within a world, in spawn order.
pub type EntityId = usize;

/// What an entity is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// A plain physics object.
    Generic,
    /// A player-controlled character.
    Player {
        /// Display name.
        username: String,
    },
}

/// A movable object in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Identifier, unique within a world.
    pub id: EntityId,
    /// Generic object or player.
    pub kind: EntityKind,
    /// Position and velocity.
    pub body: PhysicsBody,
}

impl Entity {
    /// Creates a generic entity at rest.
    pub fn generic(id: EntityId, position: Point2<f64>) -> Self {
        Self {
            id,
            kind: EntityKind::Generic,
            body: PhysicsBody::new(position),
        }
    }

    /// Creates a player at rest.
    pub fn player(id: EntityId, username: impl Into<String>, position: Point2<f64>) -> Self {
        Self {
            id,
            kind: EntityKind::Player {
                username: username.into(),
            },
            body: PhysicsBody::new(position),
        }
    }

    /// Whether this entity is a player.
    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player { .. })
    }

    /// The player's display name, or `None` for generic entities.
    pub fn username(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::Player { username } => Some(username),
            EntityKind::Generic => None,
        }
    }

    /// Current world position.
    pub fn position(&self) -> Point2<f64> {
        self.body.position
    }

    /// Advances this entity by `dt` seconds.
    ///
    /// `intent` only affects players; generic entities ignore it.
    pub fn step(&mut self, dt: f64, intent: Option<MovementIntent>, constants: &PhysicsConstants) {
        if let (EntityKind::Player { .. }, Some(intent)) = (&self.kind, intent) {
            self.body.velocity.x = intent.horizontal_velocity(constants.move_speed);
        }
        self.body.step(dt, constants);
    }

    /// Jumps if on the ground. Returns whether the jump happened.
    pub fn jump(&mut self, constants: &PhysicsConstants) -> bool {
        self.body.jump(constants.jump_impulse)
    }
}
