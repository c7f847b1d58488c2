//! # Debug Inspector
//!
//! A snapshot of the values worth watching while the sandbox runs: frame
//! timing, the seed, where the anchor is and how fast it moves, which chunks
//! are on screen, and what block sits under the cursor.
//!
//! The snapshot serializes with serde for tooling and renders to the plain
//! text panel with [`DebugSnapshot::lines`].

use cgmath::Point2;
use serde::Serialize;

use super::{
    camera_state::Camera,
    entities::Entity,
    terrain::{
        chunk_store::{BlockLookup, ChunkStore},
        noise_source::{NoiseSource, WorldSeed},
    },
};

/// Rounds half-way cases towards positive infinity, so `-2.5` becomes `-2`.
fn round_half_up(x: f64) -> f64 {
    // adding zero turns -0 into 0 so it prints without a sign
    (x + 0.5).floor() + 0.0
}

/// Rounds `x` to `precision * 10` steps per unit: a precision of `1.0` keeps
/// one decimal, `0.1` rounds to whole numbers.
pub fn round_to(x: f64, precision: f64) -> f64 {
    let steps = precision * 10.0;
    round_half_up(x * steps) / steps
}

/// One frame's worth of debug values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugSnapshot<'a> {
    /// Time since the previous frame.
    pub frame_time_ms: f64,
    /// Frames per second implied by `frame_time_ms`.
    pub fps: f64,
    /// The world seed.
    pub seed: WorldSeed,
    /// Anchor display name, if the anchor is a player.
    pub anchor_username: Option<String>,
    /// Anchor position.
    pub anchor_position: [f64; 2],
    /// Anchor velocity.
    pub anchor_velocity: [f64; 2],
    /// Camera zoom.
    pub zoom: f64,
    /// Chunk holding the anchor.
    pub anchor_chunk: i32,
    /// Chunks the viewport covers around the anchor.
    pub visible_chunks: Vec<i32>,
    /// Block coordinates under the cursor.
    pub cursor_world: [f64; 2],
    /// Chunk holding the cursor.
    pub cursor_chunk: i32,
    /// What the cursor is pointing at.
    pub cursor_block: BlockLookup<'a>,
}

impl<'a> DebugSnapshot<'a> {
    /// Captures a snapshot.
    ///
    /// # Arguments
    /// * `store` - The world's chunks; probed but never generated into
    /// * `camera` - The camera used to place the cursor in the world
    /// * `anchor` - The entity the camera follows
    /// * `frame_time_ms` - Duration of the last frame
    /// * `cursor_px` - Cursor position in viewport pixels
    pub fn capture<N: NoiseSource>(
        store: &'a ChunkStore<N>,
        camera: &Camera,
        anchor: &Entity,
        frame_time_ms: f64,
        cursor_px: Point2<f64>,
    ) -> Self {
        let position = anchor.position();
        let velocity = anchor.body.velocity;

        let cursor = camera.screen_to_world(cursor_px);
        let cursor_x = round_half_up(cursor.x);
        let cursor_y = round_half_up(cursor.y);

        Self {
            frame_time_ms,
            fps: 1000.0 / frame_time_ms,
            seed: store.seed(),
            anchor_username: anchor.username().map(str::to_owned),
            anchor_position: [position.x, position.y],
            anchor_velocity: [velocity.x, velocity.y],
            zoom: camera.zoom,
            anchor_chunk: store.chunk_index_of(position.x),
            visible_chunks: store
                .visible_indices(position.x, camera.zoom, camera.viewport_width)
                .collect(),
            cursor_world: [cursor_x, cursor_y],
            cursor_chunk: store.chunk_index_of(cursor_x),
            cursor_block: store.block_at(cursor_x, cursor_y),
        }
    }

    /// The text panel, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let [x, y] = self.anchor_position;
        let [xvel, yvel] = self.anchor_velocity;
        let visible = self
            .visible_chunks
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let block = serde_json::to_string(&self.cursor_block)
            .unwrap_or_else(|err| format!("<unprintable: {err}>"));

        vec![
            format!("Frametime: {}ms", round_to(self.frame_time_ms, 1.0)),
            format!("FPS: {}", round_to(self.fps, 1.0)),
            String::new(),
            format!("Seed: {}", self.seed),
            String::new(),
            "Player:".to_owned(),
            format!("    X: {}", round_to(x, 1.0)),
            format!("    Y: {}", round_to(y, 1.0)),
            format!("   vX: {}", round_to(xvel, 1.0)),
            format!("   vY: {}", round_to(yvel, 1.0)),
            String::new(),
            format!("Zoom: {}", self.zoom),
            String::new(),
            format!("ChunkN: {}", self.anchor_chunk),
            format!("Rendered chunks: [{visible}]"),
            String::new(),
            format!("Mouse: ({},{})", self.cursor_world[0], self.cursor_world[1]),
            format!("  Chunk: {}", self.cursor_chunk),
            format!("  Block: {block}"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::terrain::{
        chunk::ChunkDimensions,
        generator::{ChunkGenerator, GenerationMethod, GeneratorSettings},
    };

    fn solid_store() -> ChunkStore<fn(f64, f64) -> f64> {
        let settings = GeneratorSettings {
            method: GenerationMethod::Solid,
            ..GeneratorSettings::default()
        };
        let noise: fn(f64, f64) -> f64 = |_, _| 0.0;
        let generator = ChunkGenerator::new(noise, ChunkDimensions::default(), settings).unwrap();
        ChunkStore::with_generator(WorldSeed(0.5), generator)
    }

    #[test]
    fn rounding_matches_the_panel() {
        assert_eq!(round_to(0.26, 1.0), 0.3);
        assert_eq!(round_to(-9.8, 1.0), -9.8);
        assert_eq!(round_to(16.666, 1.0), 16.7);
        assert_eq!(round_to(-2.5, 0.1), -2.0);
        assert_eq!(round_to(-0.04, 1.0).to_string(), "0");
    }

    #[test]
    fn captures_the_cursor_block() {
        let mut store = solid_store();
        store.ensure_generated(0);
        let camera = Camera::default();
        let anchor = Entity::player(0, "steve", Point2::new(0.0, 0.0));

        let snapshot = DebugSnapshot::capture(&store, &camera, &anchor, 16.0, Point2::new(400.0, 300.0));
        assert_eq!(snapshot.cursor_world, [0.0, 1.0]);
        assert_eq!(snapshot.cursor_chunk, 0);
        assert_eq!(snapshot.visible_chunks, vec![-1, 0, 1]);
        assert_eq!(snapshot.fps, 62.5);
        match snapshot.cursor_block {
            BlockLookup::Found { row, column, .. } => assert_eq!((row, column), (1, 0)),
            ref other => panic!("unexpected lookup {other:?}"),
        }
    }

    #[test]
    fn panel_lines_read_like_the_overlay() {
        let store = solid_store();
        let camera = Camera::default();
        let mut anchor = Entity::player(0, "steve", Point2::new(-3.04, 12.0));
        anchor.body.velocity.y = -9.8;

        let snapshot = DebugSnapshot::capture(&store, &camera, &anchor, 20.0, Point2::new(0.0, 0.0));
        let lines = snapshot.lines();
        assert_eq!(lines[0], "Frametime: 20ms");
        assert_eq!(lines[1], "FPS: 50");
        assert_eq!(lines[3], "Seed: 0.5");
        assert_eq!(lines[5], "Player:");
        assert_eq!(lines[6], "    X: -3");
        assert_eq!(lines[9], "   vY: -9.8");
        assert_eq!(lines[11], "Zoom: 25");
        assert_eq!(lines[13], "ChunkN: -1");
        assert_eq!(lines[14], "Rendered chunks: [-2,-1,0]");
        assert!(lines[18].starts_with("  Block: {\"what\":\"not-loaded\""));
    }

    #[test]
    fn snapshot_serializes() {
        let store = solid_store();
        let anchor = Entity::generic(1, Point2::new(0.0, 0.0));
        let snapshot = DebugSnapshot::capture(&store, &Camera::default(), &anchor, 10.0, Point2::new(0.0, 0.0));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["seed"], 0.5);
        assert_eq!(json["anchor_username"], serde_json::Value::Null);
        assert_eq!(json["cursor_block"]["what"], "not-loaded");
    }
}
