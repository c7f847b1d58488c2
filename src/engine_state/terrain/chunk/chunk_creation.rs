//! # Chunk Creation Module
//!
//! This module provides the builder used by every generation method. It keeps
//! the solidity bit vector and the block storage in step while cells are pushed
//! one at a time in row-major order, bottom row first.

use bitvec::vec::BitVec;

use crate::engine_state::terrain::block::{block_type::BlockType, Block};

use super::{Chunk, ChunkDimensions};

/// A builder that fills a chunk cell by cell.
///
/// Cells are pushed left to right, then row by row upwards. The builder
/// maintains the relationship between:
/// 1. The bit vector tracking solid cells (`solid_array`)
/// 2. The vector storing each cell's block (`blocks`)
pub struct ChunkCreationIterator {
    /// The index of the chunk being created
    index: i32,
    /// Size of the chunk being created
    dimensions: ChunkDimensions,
    /// One bit per cell pushed so far, set for solid cells
    solid_array: BitVec,
    /// Every cell pushed so far
    blocks: Vec<Block>,
    /// Column the next push lands in
    local_x: usize,
    /// Row the next push lands in
    local_y: usize,
}

impl ChunkCreationIterator {
    /// Creates a new builder for the chunk at `index`.
    pub fn new(index: i32, dimensions: ChunkDimensions) -> Self {
        ChunkCreationIterator {
            index,
            dimensions,
            solid_array: BitVec::with_capacity(dimensions.cell_count()),
            blocks: Vec::with_capacity(dimensions.cell_count()),
            local_x: 0,
            local_y: 0,
        }
    }

    /// The `(column, row)` the next pushed cell will occupy.
    pub fn next_position(&self) -> (usize, usize) {
        (self.local_x, self.local_y)
    }

    /// Whether every cell of the chunk has been pushed.
    pub fn is_complete(&self) -> bool {
        self.blocks.len() >= self.dimensions.cell_count()
    }

    /// Adds a block at the current position and advances the position.
    ///
    /// Pushes past the last cell are ignored.
    pub fn push_block_type(&mut self, block_type: BlockType) {
        if self.is_complete() {
            return;
        }

        let block = Block::new(block_type);
        self.solid_array.push(block.is_solid());
        self.blocks.push(block);

        self.local_x += 1;
        if self.local_x == self.dimensions.width {
            self.local_x = 0;
            self.local_y += 1;
        }
    }

    /// Finalizes the chunk. Any cells that were never pushed are air.
    pub fn return_chunk(mut self) -> Chunk {
        while !self.is_complete() {
            self.push_block_type(BlockType::AIR);
        }

        Chunk {
            index: self.index,
            dimensions: self.dimensions,
            solid_array: self.solid_array,
            blocks: self.blocks,
        }
    }
}
