//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one vertical strip of the world,
//! `height` rows by `width` columns of blocks, plus the coordinate helpers that
//! map world space onto chunk indices and chunk-local cells.
//!
//! ## Storage
//!
//! Chunks keep two views of the same cells, built together by
//! [`ChunkCreationIterator`]:
//! - `blocks`: dense row-major block tags, row `0` first (the lowest row)
//! - `solid_array`: a bit vector with one bit per cell, set when the cell is solid
//!
//! The bit vector answers solidity queries and drives [`ChunkBlockIterator`],
//! which skips air without touching the tag storage.
//!
//! ## Coordinates
//!
//! Chunk `n` covers world X in `[n * width, (n + 1) * width)`. World Y maps
//! directly onto rows; there is no vertical chunking.

use bitvec::prelude::BitVec;
use serde::{Deserialize, Serialize};

use super::block::{Block, BlockTypeSize};

pub use chunk_creation::ChunkCreationIterator;
pub use chunk_iteration::ChunkBlockIterator;

mod chunk_creation;
pub mod chunk_iteration;

/// Default number of columns in a chunk.
pub const CHUNK_WIDTH: usize = 16;
/// Default number of rows in a chunk.
pub const CHUNK_HEIGHT: usize = 56;
/// The row that is always solid, whatever the generator produced.
pub const BEDROCK_ROW: usize = 0;

/// The size of every chunk in a world, fixed when the world is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkDimensions {
    /// Columns per chunk.
    pub width: usize,
    /// Rows per chunk.
    pub height: usize,
}

impl ChunkDimensions {
    /// Creates a new set of dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells in one chunk.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Whether both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for ChunkDimensions {
    fn default() -> Self {
        Self::new(CHUNK_WIDTH, CHUNK_HEIGHT)
    }
}

/// Returns the index of the chunk containing `world_x`.
///
/// This is floor division, so negative positions land in negative chunks:
/// `-1.0` belongs to chunk `-1`, not chunk `0`.
pub fn chunk_index_of(world_x: f64, chunk_width: usize) -> i32 {
    (world_x / chunk_width as f64).floor() as i32
}

/// Returns the chunk-local column of `world_x`, always in `[0, chunk_width)`.
pub fn local_column_of(world_x: f64, chunk_width: usize) -> usize {
    // rem_euclid can round up to exactly chunk_width for tiny negative inputs
    (world_x.rem_euclid(chunk_width as f64).floor() as usize).min(chunk_width - 1)
}

/// One generated strip of terrain.
///
/// Chunks are immutable once built; the store owns them for the lifetime of
/// the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// The chunk index along the horizontal axis.
    pub index: i32,

    /// Width and height of this chunk in cells.
    pub dimensions: ChunkDimensions,

    /// One bit per cell in row-major order, set when the cell is solid.
    pub solid_array: BitVec,

    /// Every cell's block in row-major order, row `0` first.
    pub blocks: Vec<Block>,
}

impl Chunk {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    /// World X of this chunk's column `0`.
    pub fn world_offset(&self) -> i64 {
        self.index as i64 * self.dimensions.width as i64
    }

    /// Returns row `y` as a slice of `width` blocks, or `None` past the top.
    pub fn row(&self, y: usize) -> Option<&[Block]> {
        if y >= self.height() {
            return None;
        }
        let start = y * self.width();
        Some(&self.blocks[start..start + self.width()])
    }

    /// Iterates over all rows from the bottom up.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.blocks.chunks_exact(self.width())
    }

    /// Gets the block at chunk-local coordinates.
    ///
    /// # Returns
    /// `None` if either coordinate is outside the chunk.
    pub fn block_at(&self, column: usize, row: usize) -> Option<Block> {
        if column >= self.width() || row >= self.height() {
            return None;
        }
        Some(self.blocks[row * self.width() + column])
    }

    /// Checks if the cell at chunk-local coordinates is solid.
    /// Out-of-bounds coordinates count as air.
    pub fn is_block_solid(&self, column: usize, row: usize) -> bool {
        if column >= self.width() || row >= self.height() {
            return false;
        }
        self.solid_array[row * self.width() + column]
    }

    /// Counts the solid cells in this chunk.
    pub fn solid_count(&self) -> usize {
        self.solid_array.count_ones()
    }

    /// All block tags as raw bytes in row-major order.
    pub fn raw_cells(&self) -> &[BlockTypeSize] {
        bytemuck::cast_slice(&self.blocks)
    }

    /// Iterates over solid cells only, yielding `(column, row, block)`.
    pub fn solid_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::terrain::block::block_type::BlockType;

    fn striped_chunk(index: i32) -> Chunk {
        let dimensions = ChunkDimensions::new(4, 3);
        let mut cci = ChunkCreationIterator::new(index, dimensions);
        for row in 0..3 {
            for column in 0..4 {
                if (row + column) % 2 == 0 {
                    cci.push_block_type(BlockType::SOLID);
                } else {
                    cci.push_block_type(BlockType::AIR);
                }
            }
        }
        cci.return_chunk()
    }

    #[test]
    fn chunk_index_uses_floor_division() {
        assert_eq!(chunk_index_of(0.0, 16), 0);
        assert_eq!(chunk_index_of(15.999, 16), 0);
        assert_eq!(chunk_index_of(16.0, 16), 1);
        assert_eq!(chunk_index_of(-1.0, 16), -1);
        assert_eq!(chunk_index_of(-16.0, 16), -1);
        assert_eq!(chunk_index_of(-16.5, 16), -2);
    }

    #[test]
    fn chunk_index_is_non_decreasing() {
        let mut previous = i32::MIN;
        let mut x = -100.0;
        while x < 100.0 {
            let index = chunk_index_of(x, 16);
            assert!(index >= previous, "index dropped at x = {x}");
            previous = index;
            x += 0.37;
        }
    }

    #[test]
    fn local_column_wraps_negative_positions() {
        assert_eq!(local_column_of(-1.0, 16), 15);
        assert_eq!(local_column_of(-16.0, 16), 0);
        assert_eq!(local_column_of(-0.5, 16), 15);
        assert_eq!(local_column_of(17.9, 16), 1);
        assert_eq!(local_column_of(-1e-17, 16), 15);
    }

    #[test]
    fn rows_and_cells_line_up() {
        let chunk = striped_chunk(2);
        assert_eq!(chunk.world_offset(), 8);
        assert_eq!(chunk.rows().count(), 3);
        assert_eq!(chunk.row(0).unwrap(), &[Block::SOLID, Block::AIR, Block::SOLID, Block::AIR]);
        assert_eq!(chunk.row(3), None);
        assert_eq!(chunk.block_at(1, 1), Some(Block::SOLID));
        assert_eq!(chunk.block_at(4, 0), None);
        assert!(chunk.is_block_solid(0, 2));
        assert!(!chunk.is_block_solid(1, 2));
        assert!(!chunk.is_block_solid(9, 9));
        assert_eq!(chunk.solid_count(), 6);
    }

    #[test]
    fn raw_cells_expose_tags() {
        let chunk = striped_chunk(0);
        assert_eq!(&chunk.raw_cells()[..4], &[1, 0, 1, 0]);
        assert_eq!(chunk.raw_cells().len(), 12);
    }
}
