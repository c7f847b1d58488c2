//! # Engine State Module
//!
//! The core engine module that owns the world and advances it one tick at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container: chunks, entities, camera and physics
//! * `terrain` - Chunk data, generation and the chunk store
//! * `entities` - Entities and the physics integrator
//! * `camera_state` - The camera and the entity it follows
//! * `rendering` - Draw lists handed to a `Renderer`
//! * `debug` - The debug inspector snapshot
//!
//! ## Tick Order
//!
//! Every tick runs the same steps:
//!
//! 1. Apply the frame's zoom and jump input
//! 2. Work out which chunks the viewport covers around the anchor
//! 3. Generate the missing ones
//! 4. Step every entity in spawn order
//! 5. Re-center the camera on the anchor
//!
//! The chunks drawn afterwards are the ones computed in step 2.

use std::ops::RangeInclusive;

use cgmath::Point2;
use log::{info, trace, warn};
use winit::keyboard::KeyCode;

use camera_state::CameraState;
use debug::DebugSnapshot;
use entities::{Entity, EntityId, EntityKind, MovementIntent, PhysicsConstants};
use rendering::{build_frame, RenderFrame};
use terrain::{
    chunk_store::{ChunkStore, GenerationReport},
    noise_source::WorldSeed,
};

use crate::{
    application_state::input_state::ProcessedInputState,
    core::{config::SandboxConfig, error::ConfigError},
};

pub mod camera_state;
pub mod debug;
pub mod entities;
pub mod rendering;
pub mod terrain;

/// Represents player actions derived from input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerAction {
    /// Left is held
    pub move_left: bool,
    /// Right is held
    pub move_right: bool,
    /// A jump was requested since the last tick
    pub jump: bool,
    /// Vertical scroll in pixels, positive scrolls down and zooms out
    pub zoom_delta_px: f64,
    /// New cursor position in viewport pixels, if it moved
    pub cursor_px: Option<Point2<f64>>,
}

impl PlayerAction {
    /// The horizontal movement this action asks for.
    pub fn movement(&self) -> MovementIntent {
        MovementIntent {
            left: self.move_left,
            right: self.move_right,
        }
    }
}

/// Translates the processed input state into player actions.
///
/// A and D move while held; W jumps once per press.
///
/// # Arguments
/// * `input` - The processed input state to translate
///
/// # Returns
/// A PlayerAction struct with the appropriate actions set
pub fn translate_processed_input(input: &ProcessedInputState) -> PlayerAction {
    PlayerAction {
        move_left: input.get_key_state(KeyCode::KeyA).is_active(),
        move_right: input.get_key_state(KeyCode::KeyD).is_active(),
        jump: input.was_pressed(KeyCode::KeyW),
        zoom_delta_px: input.scroll_delta_px,
        cursor_px: input.cursor_position,
    }
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// The tick length in seconds.
    pub delta_seconds: f64,
    /// Chunk indices the viewport covered this tick.
    pub visible: RangeInclusive<i32>,
    /// Chunks generated or deferred this tick.
    pub generation: GenerationReport,
    /// Whether the anchor jumped.
    pub jumped: bool,
}

/// The main state container for the sandbox.
///
/// Owns the chunk store, every entity, the camera and the physics constants.
/// Nothing here is shared: the frame driver holds the only `EngineState`.
pub struct EngineState {
    /// Every generated chunk and the generator
    pub chunk_store: ChunkStore,
    /// Entities in spawn order
    pub entities: Vec<Entity>,
    /// Camera and the entity it follows
    pub camera_state: CameraState,
    /// Constants for every physics step
    pub physics: PhysicsConstants,
    /// Upper bound on chunks generated per tick
    max_chunks_per_tick: Option<usize>,
    /// Chunk indices covered by the viewport during the last tick
    visible_chunks: RangeInclusive<i32>,
    /// Last known cursor position in viewport pixels
    cursor_px: Point2<f64>,
    /// Length of the last tick in milliseconds
    last_delta_ms: f64,
}

impl EngineState {
    /// Builds a world from a configuration.
    ///
    /// Spawns the anchor player and the configured generic entities at the
    /// origin and generates the spawn chunks.
    ///
    /// # Arguments
    /// * `config` - The configuration to build from; validated first
    ///
    /// # Returns
    /// The new world, or the first configuration problem found
    pub fn new(config: &SandboxConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.world.seed.unwrap_or_else(WorldSeed::random);
        let mut chunk_store =
            ChunkStore::new(seed, config.dimensions(), config.generator_settings()?)?;
        info!(
            "Starting world with seed {} ({} generation, {}x{} chunks)",
            seed,
            config.generation.method,
            config.world.chunk_width,
            config.world.chunk_height
        );

        for index in &config.world.spawn_chunks {
            chunk_store.ensure_generated(*index);
        }

        let origin = Point2::new(0.0, 0.0);
        let mut entities = vec![Entity::player(0, config.player.username.as_str(), origin)];
        for _ in 0..config.player.generic_entities {
            let id = entities.len();
            entities.push(Entity::generic(id, origin));
        }

        let camera_state = CameraState::new(config.camera.camera(), 0);
        let visible_chunks = chunk_store.visible_indices(
            origin.x,
            camera_state.camera.zoom,
            camera_state.camera.viewport_width,
        );

        Ok(Self {
            chunk_store,
            entities,
            camera_state,
            physics: config.physics,
            max_chunks_per_tick: config.world.max_chunks_per_tick,
            visible_chunks,
            cursor_px: origin,
            last_delta_ms: 0.0,
        })
    }

    /// Advances the world by `delta_ms` milliseconds.
    ///
    /// A non-finite or negative delta is treated as zero so one bad timestamp
    /// cannot poison entity positions.
    pub fn tick(&mut self, delta_ms: f64, action: &PlayerAction) -> TickReport {
        let delta_ms = if delta_ms.is_finite() && delta_ms >= 0.0 {
            delta_ms
        } else {
            warn!("Ignoring frame delta of {delta_ms}ms");
            0.0
        };
        let delta_seconds = delta_ms / 1000.0;
        self.last_delta_ms = delta_ms;

        if action.zoom_delta_px != 0.0 {
            self.camera_state.camera.apply_scroll(action.zoom_delta_px);
        }
        if let Some(cursor) = action.cursor_px {
            self.cursor_px = cursor;
        }
        let jumped = action.jump && self.jump_anchor();

        let anchor_x = self.anchor_position().x;
        let camera = &self.camera_state.camera;
        let visible =
            self.chunk_store
                .visible_indices(anchor_x, camera.zoom, camera.viewport_width);
        let focus = self.chunk_store.chunk_index_of(anchor_x);
        let generation =
            self.chunk_store
                .generate_missing(visible.clone(), self.max_chunks_per_tick, focus);

        let anchor = self.camera_state.anchor;
        let intent = action.movement();
        for entity in self.entities.iter_mut() {
            let entity_intent = (entity.id == anchor).then_some(intent);
            entity.step(delta_seconds, entity_intent, &self.physics);
        }
        self.camera_state.update(&self.entities);
        self.visible_chunks = visible.clone();

        trace!(
            "Tick of {delta_ms}ms: visible {visible:?}, generated {:?}",
            generation.generated
        );

        TickReport {
            delta_seconds,
            visible,
            generation,
            jumped,
        }
    }

    /// Makes the anchor jump if it is on the ground.
    ///
    /// # Returns
    /// `true` if the jump happened
    pub fn jump_anchor(&mut self) -> bool {
        let anchor = self.camera_state.anchor;
        let physics = self.physics;
        self.entities
            .iter_mut()
            .find(|entity| entity.id == anchor)
            .is_some_and(|entity| entity.jump(&physics))
    }

    /// The entity the camera follows.
    pub fn anchor(&self) -> Option<&Entity> {
        self.camera_state.anchor_entity(&self.entities)
    }

    /// The anchor's position, or the camera's if the anchor is gone.
    fn anchor_position(&self) -> Point2<f64> {
        self.anchor()
            .map(Entity::position)
            .unwrap_or_else(|| self.camera_state.camera.anchor_point())
    }

    /// Adds an entity at `position`.
    ///
    /// # Returns
    /// The new entity's id
    pub fn spawn_entity(&mut self, kind: EntityKind, position: Point2<f64>) -> EntityId {
        let id = self.entities.last().map_or(0, |entity| entity.id + 1);
        let entity = match kind {
            EntityKind::Generic => Entity::generic(id, position),
            EntityKind::Player { username } => Entity::player(id, username, position),
        };
        self.entities.push(entity);
        id
    }

    /// Chunk indices the viewport covered during the last tick.
    pub fn visible_chunks(&self) -> RangeInclusive<i32> {
        self.visible_chunks.clone()
    }

    /// Resizes the viewport when the window size changes.
    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.camera_state.camera.resize(width, height);
    }

    /// Builds the draw list for the current state.
    ///
    /// Only chunks that exist are drawn; deferred chunks show up once generated.
    pub fn render_frame(&self) -> RenderFrame {
        let chunks = self
            .visible_chunks()
            .filter_map(|index| self.chunk_store.get(index));
        build_frame(&self.camera_state.camera, &self.entities, chunks)
    }

    /// Captures the debug inspector values, if there is an anchor to inspect.
    pub fn debug_snapshot(&self) -> Option<DebugSnapshot<'_>> {
        let anchor = self.anchor()?;
        Some(DebugSnapshot::capture(
            &self.chunk_store,
            &self.camera_state.camera,
            anchor,
            self.last_delta_ms,
            self.cursor_px,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::Color;

    const EPSILON: f64 = 1e-9;

    fn seeded_config() -> SandboxConfig {
        let mut config = SandboxConfig::default();
        config.world.seed = Some(WorldSeed(0.42));
        config
    }

    #[test]
    fn new_world_has_spawn_chunks_and_entities() {
        let engine = EngineState::new(&seeded_config()).unwrap();
        assert!(engine.chunk_store.exists(-1));
        assert!(engine.chunk_store.exists(0));
        assert_eq!(engine.chunk_store.loaded_count(), 2);
        assert_eq!(engine.entities.len(), 2);
        assert_eq!(engine.anchor().and_then(Entity::username), Some("steve"));
        assert!(!engine.entities[1].is_player());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = seeded_config();
        config.generation.method = "mystery".to_owned();
        assert!(matches!(
            EngineState::new(&config),
            Err(ConfigError::UnknownGenerationMethod(_))
        ));
    }

    #[test]
    fn tick_generates_the_visible_range() {
        let mut engine = EngineState::new(&seeded_config()).unwrap();
        let report = engine.tick(16.0, &PlayerAction::default());
        assert_eq!(report.visible, -1..=1);
        assert_eq!(report.generation.generated, vec![1]);
        assert!((report.delta_seconds - 0.016).abs() < EPSILON);
        assert_eq!(engine.visible_chunks(), -1..=1);
    }

    #[test]
    fn only_the_anchor_follows_input() {
        let mut engine = EngineState::new(&seeded_config()).unwrap();
        let action = PlayerAction {
            move_right: true,
            ..PlayerAction::default()
        };
        engine.tick(500.0, &action);
        assert!((engine.entities[0].position().x - 2.0).abs() < EPSILON);
        assert_eq!(engine.entities[1].position().x, 0.0);
        assert_eq!(engine.camera_state.camera.anchor, [2.0, 0.0]);
    }

    #[test]
    fn jump_is_applied_before_the_step() {
        let mut engine = EngineState::new(&seeded_config()).unwrap();
        let action = PlayerAction {
            jump: true,
            ..PlayerAction::default()
        };
        let report = engine.tick(100.0, &action);
        assert!(report.jumped);
        let anchor = engine.anchor().unwrap();
        assert!((anchor.body.velocity.y - (7.0 - 0.98)).abs() < EPSILON);
        assert!(anchor.position().y > 0.0);

        // mid-air, a second jump is refused
        assert!(!engine.tick(16.0, &action).jumped);
    }

    #[test]
    fn scrolling_zooms_before_visibility() {
        let mut engine = EngineState::new(&seeded_config()).unwrap();
        let action = PlayerAction {
            zoom_delta_px: 1200.0,
            ..PlayerAction::default()
        };
        let report = engine.tick(16.0, &action);
        assert_eq!(engine.camera_state.camera.zoom, 1.0);
        // 800 blocks wide at zoom 1
        assert_eq!(report.visible, -25..=25);
    }

    #[test]
    fn bad_deltas_do_not_move_anything() {
        let mut engine = EngineState::new(&seeded_config()).unwrap();
        engine.entities[1].body.position.y = 5.0;
        for delta in [f64::NAN, f64::INFINITY, -16.0] {
            let report = engine.tick(delta, &PlayerAction::default());
            assert_eq!(report.delta_seconds, 0.0);
        }
        assert_eq!(engine.entities[1].position().y, 5.0);
    }

    #[test]
    fn generation_budget_defers_far_chunks() {
        let mut config = seeded_config();
        config.world.spawn_chunks = vec![];
        config.world.max_chunks_per_tick = Some(1);
        let mut engine = EngineState::new(&config).unwrap();

        let report = engine.tick(16.0, &PlayerAction::default());
        assert_eq!(report.generation.generated, vec![0]);
        assert_eq!(report.generation.deferred, vec![-1, 1]);
        let report = engine.tick(16.0, &PlayerAction::default());
        assert_eq!(report.generation.generated, vec![-1]);
        let report = engine.tick(16.0, &PlayerAction::default());
        assert_eq!(report.generation.generated, vec![1]);
        assert!(report.generation.deferred.is_empty());
    }

    #[test]
    fn render_frame_skips_missing_chunks() {
        let mut config = seeded_config();
        config.world.spawn_chunks = vec![];
        config.world.max_chunks_per_tick = Some(1);
        let mut engine = EngineState::new(&config).unwrap();
        engine.tick(16.0, &PlayerAction::default());

        let frame = engine.render_frame();
        assert_eq!(frame.chunk_indices, vec![0]);
        assert_eq!(frame.rects[0].color, Color::RED);
        assert_eq!(frame.entity_rect_count, 5);
    }

    #[test]
    fn spawned_entities_get_fresh_ids() {
        let mut engine = EngineState::new(&seeded_config()).unwrap();
        let id = engine.spawn_entity(EntityKind::Generic, Point2::new(3.0, 4.0));
        assert_eq!(id, 2);
        engine.tick(1000.0, &PlayerAction::default());
        assert!((engine.entities[2].position().y - 0.0).abs() < EPSILON);
    }

    #[test]
    fn debug_snapshot_tracks_the_cursor() {
        let mut engine = EngineState::new(&seeded_config()).unwrap();
        let action = PlayerAction {
            cursor_px: Some(Point2::new(400.0, 300.0)),
            ..PlayerAction::default()
        };
        engine.tick(20.0, &action);
        let snapshot = engine.debug_snapshot().unwrap();
        assert_eq!(snapshot.frame_time_ms, 20.0);
        assert_eq!(snapshot.cursor_world, [0.0, 1.0]);
        assert_eq!(snapshot.seed, WorldSeed(0.42));
    }

    #[test]
    fn input_translation() {
        let mut input = ProcessedInputState::default();
        input
            .keyboard_states
            .insert(KeyCode::KeyA, crate::application_state::input_state::RawInputState::Held);
        input.key_presses.insert(KeyCode::KeyW, 1);
        input.scroll_delta_px = -50.0;

        let action = translate_processed_input(&input);
        assert!(action.move_left);
        assert!(!action.move_right);
        assert!(action.jump);
        assert_eq!(action.zoom_delta_px, -50.0);
        assert_eq!(action.movement().horizontal_velocity(4.0), -4.0);
    }
}
