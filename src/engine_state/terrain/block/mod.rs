//! # Block Module
//!
//! This module provides the cell tags stored in every chunk of the terrain.
//! A block is deliberately tiny: one tag byte, so a chunk's cells can be
//! handed to a renderer as a flat byte slice.

use block_type::BlockType;
use serde::Serialize;

pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Represents a single terrain cell.
///
/// The tag is kept as a raw `BlockTypeSize` so that chunks can store and expose
/// their cells without conversion. Use [`Block::get_block_type`] to decode it.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute keeps the layout identical to a bare `u8`, which
/// lets `bytemuck` reinterpret a slice of blocks as raw tag bytes.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable, Debug, Serialize)]
#[serde(transparent)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// An air cell.
    pub const AIR: Block = Block {
        block_type: BlockType::AIR as BlockTypeSize,
    };

    /// A solid cell.
    pub const SOLID: Block = Block {
        block_type: BlockType::SOLID as BlockTypeSize,
    };

    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Decodes the stored tag, returning `None` for tags no `BlockType` claims.
    pub fn get_block_type(&self) -> Option<BlockType> {
        BlockType::from_tag(self.block_type)
    }

    /// Whether this cell blocks space. Any tag other than air counts as solid.
    pub fn is_solid(&self) -> bool {
        self.block_type != BlockType::AIR as BlockTypeSize
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::AIR
    }
}
