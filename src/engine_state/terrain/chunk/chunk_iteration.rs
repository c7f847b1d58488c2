//! # Chunk Iteration Module
//!
//! This module provides an iterator over the solid cells of a chunk. It scans
//! the `solid_array` bit vector, so air cells are skipped without reading the
//! block storage.

use crate::engine_state::terrain::block::Block;

use super::Chunk;

/// An iterator over all solid cells in a chunk, bottom row first.
///
/// Yields `(column, row, block)` for each solid cell.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Current position in the solid array
    current_solid_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first cell.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_solid_offset: 0,
        }
    }

    /// Gets the next solid cell in the chunk along with its position.
    ///
    /// # Returns
    /// - `Some((column, row, block))` if another solid cell is found
    /// - `None` once the end of the chunk is reached
    pub fn get_next_block(&mut self) -> Option<(usize, usize, &'a Block)> {
        let chunk: &'a Chunk = self.chunk_ref;
        let remaining = chunk.solid_array.get(self.current_solid_offset..)?;
        let skipped = remaining.first_one()?;

        let offset = self.current_solid_offset + skipped;
        self.current_solid_offset = offset + 1;

        let width = chunk.width();
        Some((offset % width, offset / width, &chunk.blocks[offset]))
    }
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    type Item = (usize, usize, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        self.get_next_block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::terrain::block::block_type::BlockType;
    use crate::engine_state::terrain::chunk::{ChunkCreationIterator, ChunkDimensions};

    #[test]
    fn yields_only_solid_cells_in_order() {
        let mut cci = ChunkCreationIterator::new(0, ChunkDimensions::new(3, 2));
        for block_type in [
            BlockType::AIR,
            BlockType::SOLID,
            BlockType::AIR,
            BlockType::SOLID,
            BlockType::AIR,
            BlockType::SOLID,
        ] {
            cci.push_block_type(block_type);
        }
        let chunk = cci.return_chunk();

        let cells: Vec<(usize, usize)> = chunk
            .solid_blocks()
            .map(|(column, row, _)| (column, row))
            .collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (2, 1)]);
    }

    #[test]
    fn empty_chunk_yields_nothing() {
        let chunk = ChunkCreationIterator::new(0, ChunkDimensions::new(4, 4)).return_chunk();
        assert_eq!(chunk.solid_blocks().count(), 0);
    }
}
