//! # Rendering Hand-off
//!
//! The engine does not draw pixels itself. Each tick it builds a
//! [`RenderFrame`]: the camera it was built with and an ordered list of
//! screen-space rectangles. A [`Renderer`] implementation turns those into
//! pixels, log lines, or nothing at all.
//!
//! ## Ordering
//!
//! Entities are emitted first, then the solid cells of every visible chunk in
//! ascending chunk order, so terrain paints over entities.
//!
//! ## Purity
//!
//! [`build_frame`] only reads its arguments. Camera state is passed in rather
//! than looked up, so the same inputs always yield the same frame.

use log::trace;
use serde::Serialize;

use super::{
    camera_state::Camera,
    entities::{Entity, EntityKind},
    terrain::chunk::Chunk,
};

pub mod rectangle;

pub use rectangle::{Color, ScreenRect, WorldRect};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    /// The camera the rectangles were projected with.
    pub camera: Camera,
    /// Rectangles in paint order.
    pub rects: Vec<ScreenRect>,
    /// How many of the leading `rects` belong to entities.
    pub entity_rect_count: usize,
    /// Indices of the chunks drawn, ascending.
    pub chunk_indices: Vec<i32>,
}

impl RenderFrame {
    /// The entity rectangles.
    pub fn entity_rects(&self) -> &[ScreenRect] {
        &self.rects[..self.entity_rect_count]
    }

    /// The terrain rectangles.
    pub fn terrain_rects(&self) -> &[ScreenRect] {
        &self.rects[self.entity_rect_count..]
    }
}

/// Consumes render frames.
pub trait Renderer {
    /// Draws one frame.
    fn draw(&mut self, frame: &RenderFrame);
}

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &RenderFrame) {}
}

/// Logs a one-line summary of each frame at trace level and counts frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingRenderer {
    /// Frames drawn so far.
    pub frames_drawn: u64,
}

impl Renderer for LoggingRenderer {
    fn draw(&mut self, frame: &RenderFrame) {
        self.frames_drawn += 1;
        trace!(
            "frame {}: {} entity rects, {} terrain rects, chunks {:?}",
            self.frames_drawn,
            frame.entity_rect_count,
            frame.rects.len() - frame.entity_rect_count,
            frame.chunk_indices
        );
    }
}

/// Keeps the most recent frame for a caller to pick up later.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    /// The last frame drawn.
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, frame: &RenderFrame) {
        self.last_frame = Some(frame.clone());
    }
}

/// The world-space shapes that make up an entity.
pub fn entity_shapes(entity: &Entity) -> Vec<WorldRect> {
    let position = entity.position();
    let (x, y) = (position.x, position.y);
    match entity.kind {
        EntityKind::Generic => vec![
            WorldRect::unit(x, y, Color::DEEP_PINK),
            WorldRect::new(x + 0.5, y, 0.5, 0.5, Color::BLACK),
            WorldRect::new(x, y - 0.5, 0.5, 0.5, Color::BLACK),
        ],
        EntityKind::Player { .. } => vec![
            WorldRect::unit(x, y + 1.0, Color::RED),
            WorldRect::unit(x, y, Color::BLUE),
        ],
    }
}

/// The world-space shapes of a chunk's solid cells.
pub fn chunk_shapes(chunk: &Chunk) -> impl Iterator<Item = WorldRect> + '_ {
    let offset = chunk.world_offset() as f64;
    chunk
        .solid_blocks()
        .map(move |(column, row, _)| WorldRect::unit(column as f64 + offset, row as f64, Color::WHITE))
}

/// Builds the frame for a camera, its entities and the visible chunks.
pub fn build_frame<'a>(
    camera: &Camera,
    entities: &[Entity],
    chunks: impl IntoIterator<Item = &'a Chunk>,
) -> RenderFrame {
    let mut rects: Vec<ScreenRect> = entities
        .iter()
        .flat_map(entity_shapes)
        .map(|shape| shape.project(camera))
        .collect();
    let entity_rect_count = rects.len();

    let mut chunk_indices = Vec::new();
    for chunk in chunks {
        chunk_indices.push(chunk.index);
        rects.extend(chunk_shapes(chunk).map(|shape| shape.project(camera)));
    }

    RenderFrame {
        camera: *camera,
        rects,
        entity_rect_count,
        chunk_indices,
    }
}
