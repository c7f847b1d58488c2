//! # Chunk Store
//!
//! This module provides the `ChunkStore`, which owns every generated chunk and
//! answers the spatial questions the rest of the engine asks about terrain:
//! which chunk holds a position, which chunks a viewport can see, and what
//! block sits at a world cell.
//!
//! ## Storage
//!
//! Chunks live in a sparse map keyed by chunk index. Only requested indices are
//! ever generated, and a generated chunk is kept for the lifetime of the store.
//!
//! ## Generation
//!
//! All generation goes through [`ChunkStore::ensure_generated`]. Generation is
//! synchronous; [`ChunkStore::generate_missing`] can optionally cap how many
//! chunks it builds per call, deferring the rest.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use log::{debug, warn};
use serde::Serialize;

use crate::core::error::ConfigError;

use super::{
    block::Block,
    chunk::{chunk_index_of, local_column_of, Chunk, ChunkDimensions},
    generator::{ChunkGenerator, GeneratorSettings},
    noise_source::{NoiseSource, PerlinNoise, WorldSeed},
};

/// The result of looking up the block at a world position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "what", rename_all = "kebab-case")]
pub enum BlockLookup<'a> {
    /// The vertical coordinate is below the floor or above the top row.
    OutOfRange,
    /// The position lies in a chunk that has not been generated yet.
    NotLoaded {
        /// The chunk that would hold the position.
        chunk_index: i32,
    },
    /// The position resolved to a cell.
    Found {
        /// The owning chunk.
        chunk_index: i32,
        /// Chunk-local row.
        row: usize,
        /// Chunk-local column, always in `[0, width)`.
        column: usize,
        /// The block in the cell.
        block: Block,
        /// The full row the cell belongs to.
        layer: &'a [Block],
    },
}

impl<'a> BlockLookup<'a> {
    /// The block, if the lookup found one.
    pub fn block(&self) -> Option<Block> {
        match self {
            BlockLookup::Found { block, .. } => Some(*block),
            _ => None,
        }
    }
}

/// What a call to [`ChunkStore::generate_missing`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Indices generated during the call, in generation order.
    pub generated: Vec<i32>,
    /// Missing indices left for a later call because of the budget.
    pub deferred: Vec<i32>,
}

/// Owns the world's chunks and generates them on demand.
pub struct ChunkStore<N: NoiseSource = PerlinNoise> {
    /// The generation seed, fixed for the life of the store
    seed: WorldSeed,
    /// Builds chunks that are requested but not yet present
    generator: ChunkGenerator<N>,
    /// Every chunk generated so far, keyed by chunk index
    chunks: HashMap<i32, Chunk>,
}

impl ChunkStore<PerlinNoise> {
    /// Creates a store generating Perlin terrain from `seed`.
    pub fn new(
        seed: WorldSeed,
        dimensions: ChunkDimensions,
        settings: GeneratorSettings,
    ) -> Result<Self, ConfigError> {
        let generator = ChunkGenerator::new(PerlinNoise::new(seed), dimensions, settings)?;
        Ok(Self::with_generator(seed, generator))
    }
}

impl<N: NoiseSource> ChunkStore<N> {
    /// Creates a store around an existing generator.
    ///
    /// `seed` is only recorded for reporting; the generator's noise source
    /// decides what terrain looks like.
    pub fn with_generator(seed: WorldSeed, generator: ChunkGenerator<N>) -> Self {
        Self {
            seed,
            generator,
            chunks: HashMap::new(),
        }
    }

    /// The generation seed.
    pub fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Size of every chunk in this store.
    pub fn dimensions(&self) -> ChunkDimensions {
        self.generator.dimensions()
    }

    /// The index of the chunk containing `world_x`.
    pub fn chunk_index_of(&self, world_x: f64) -> i32 {
        chunk_index_of(world_x, self.dimensions().width)
    }

    /// Whether the chunk at `index` has been generated.
    pub fn exists(&self, index: i32) -> bool {
        self.chunks.contains_key(&index)
    }

    /// The chunk at `index`, if it has been generated.
    pub fn get(&self, index: i32) -> Option<&Chunk> {
        self.chunks.get(&index)
    }

    /// Number of generated chunks.
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns the chunk at `index`, generating and storing it first if needed.
    ///
    /// Existing chunks are never regenerated.
    pub fn ensure_generated(&mut self, index: i32) -> &Chunk {
        let generator = &self.generator;
        self.chunks
            .entry(index)
            .or_insert_with(|| generator.generate(index))
    }

    /// The inclusive range of chunk indices overlapping a viewport.
    ///
    /// The viewport is centered on `center_x` and spans
    /// `viewport_width_px / zoom` world units.
    pub fn visible_indices(
        &self,
        center_x: f64,
        zoom: f64,
        viewport_width_px: f64,
    ) -> RangeInclusive<i32> {
        let blocks_displayable = viewport_width_px / zoom;
        let mut half_width = blocks_displayable / 2.0;
        if !half_width.is_finite() {
            warn!("Viewport half width is {half_width} (zoom {zoom}), showing a single chunk");
            half_width = 0.0;
        }

        let left_chunk = self.chunk_index_of(center_x - half_width);
        let right_chunk = self.chunk_index_of(center_x + half_width);
        left_chunk..=right_chunk
    }

    /// Generates every missing chunk in `indices`.
    ///
    /// With a `budget`, at most that many chunks are generated, closest to
    /// `focus` first; the remaining missing indices are reported as deferred.
    pub fn generate_missing(
        &mut self,
        indices: RangeInclusive<i32>,
        budget: Option<usize>,
        focus: i32,
    ) -> GenerationReport {
        let mut missing: Vec<i32> = indices.filter(|index| !self.exists(*index)).collect();
        if missing.is_empty() {
            return GenerationReport::default();
        }

        let mut deferred = Vec::new();
        if let Some(budget) = budget {
            if missing.len() > budget {
                missing.sort_by_key(|index| ((*index as i64 - focus as i64).abs(), *index));
                deferred = missing.split_off(budget);
                deferred.sort_unstable();
                debug!("Deferring generation of {} chunks", deferred.len());
            }
        }

        for index in &missing {
            self.ensure_generated(*index);
        }

        GenerationReport {
            generated: missing,
            deferred,
        }
    }

    /// Looks up the block at a world position.
    ///
    /// Never generates: positions in chunks that do not exist yet report
    /// [`BlockLookup::NotLoaded`].
    pub fn block_at(&self, world_x: f64, world_y: f64) -> BlockLookup<'_> {
        let dimensions = self.dimensions();
        if !world_x.is_finite() || !(0.0..dimensions.height as f64).contains(&world_y) {
            return BlockLookup::OutOfRange;
        }

        let chunk_index = self.chunk_index_of(world_x);
        let Some(chunk) = self.get(chunk_index) else {
            return BlockLookup::NotLoaded { chunk_index };
        };

        let row = world_y.floor() as usize;
        let column = local_column_of(world_x, dimensions.width);
        match (chunk.row(row), chunk.block_at(column, row)) {
            (Some(layer), Some(block)) => BlockLookup::Found {
                chunk_index,
                row,
                column,
                block,
                layer,
            },
            _ => BlockLookup::OutOfRange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::terrain::generator::GenerationMethod;

    fn perlin_store() -> ChunkStore {
        ChunkStore::new(
            WorldSeed(0.42),
            ChunkDimensions::default(),
            GeneratorSettings::default(),
        )
        .unwrap()
    }

    fn counting_store() -> ChunkStore<fn(f64, f64) -> f64> {
        let settings = GeneratorSettings {
            method: GenerationMethod::Checkerboard,
            ..GeneratorSettings::default()
        };
        let noise: fn(f64, f64) -> f64 = |_, _| 0.0;
        let generator = ChunkGenerator::new(noise, ChunkDimensions::default(), settings).unwrap();
        ChunkStore::with_generator(WorldSeed(1.0), generator)
    }

    #[test]
    fn ensure_generated_is_idempotent() {
        let mut store = perlin_store();
        let first = store.ensure_generated(3).clone();
        assert_eq!(store.loaded_count(), 1);
        let second = store.ensure_generated(3).clone();
        assert_eq!(store.loaded_count(), 1);
        assert_eq!(first, second);
        assert!(store.exists(3));
        assert!(!store.exists(4));
    }

    #[test]
    fn visible_indices_cover_the_viewport() {
        let store = perlin_store();
        // 800 px at zoom 25 is 32 blocks, 16 on either side of x = 0
        assert_eq!(store.visible_indices(0.0, 25.0, 800.0), -1..=1);
        assert_eq!(store.visible_indices(8.0, 25.0, 800.0), -1..=1);
        assert_eq!(store.visible_indices(8.0, 50.0, 800.0), 0..=1);
        assert_eq!(store.visible_indices(-40.0, 100.0, 800.0), -3..=-3);
        assert_eq!(store.visible_indices(-31.0, 100.0, 800.0), -3..=-2);
    }

    #[test]
    fn degenerate_zoom_shows_one_chunk() {
        let store = perlin_store();
        assert_eq!(store.visible_indices(20.0, 0.0, 800.0), 1..=1);
    }

    #[test]
    fn block_at_reports_out_of_range() {
        let mut store = perlin_store();
        store.ensure_generated(0);
        assert_eq!(store.block_at(1.0, -0.1), BlockLookup::OutOfRange);
        assert_eq!(store.block_at(1.0, 56.0), BlockLookup::OutOfRange);
        assert_eq!(store.block_at(1.0, f64::NAN), BlockLookup::OutOfRange);
        assert_eq!(store.block_at(f64::INFINITY, 1.0), BlockLookup::OutOfRange);
    }

    #[test]
    fn block_at_never_generates() {
        let store = perlin_store();
        assert_eq!(
            store.block_at(40.0, 3.0),
            BlockLookup::NotLoaded { chunk_index: 2 }
        );
        assert_eq!(store.loaded_count(), 0);
    }

    #[test]
    fn block_at_wraps_negative_x() {
        let mut store = perlin_store();
        store.ensure_generated(-1);
        match store.block_at(-1.0, 0.0) {
            BlockLookup::Found {
                chunk_index,
                row,
                column,
                block,
                layer,
            } => {
                assert_eq!(chunk_index, -1);
                assert_eq!(row, 0);
                assert_eq!(column, 15);
                assert_eq!(block, Block::SOLID);
                assert_eq!(layer.len(), 16);
            }
            other => panic!("unexpected lookup {other:?}"),
        }
    }

    #[test]
    fn block_at_matches_chunk_cells() {
        let mut store = counting_store();
        store.ensure_generated(1);
        let lookup = store.block_at(21.7, 3.9);
        let chunk = store.get(1).unwrap();
        assert_eq!(lookup.block(), chunk.block_at(5, 3));
    }

    #[test]
    fn unbudgeted_generation_fills_the_range() {
        let mut store = counting_store();
        store.ensure_generated(0);
        let report = store.generate_missing(-2..=2, None, 0);
        assert_eq!(report.generated, vec![-2, -1, 1, 2]);
        assert!(report.deferred.is_empty());
        assert_eq!(store.loaded_count(), 5);
    }

    #[test]
    fn budgeted_generation_starts_near_the_focus() {
        let mut store = counting_store();
        let report = store.generate_missing(-3..=3, Some(3), 1);
        assert_eq!(report.generated, vec![1, 0, 2]);
        assert_eq!(report.deferred, vec![-3, -2, -1, 3]);

        let report = store.generate_missing(-3..=3, Some(3), 1);
        assert_eq!(report.generated, vec![-1, 3, -2]);
        assert_eq!(report.deferred, vec![-3]);
    }

    #[test]
    fn lookup_serializes_with_a_tag() {
        let json = serde_json::to_string(&BlockLookup::OutOfRange).unwrap();
        assert_eq!(json, r#"{"what":"out-of-range"}"#);
        let json = serde_json::to_string(&BlockLookup::NotLoaded { chunk_index: -2 }).unwrap();
        assert_eq!(json, r#"{"what":"not-loaded","chunk_index":-2}"#);
    }
}
