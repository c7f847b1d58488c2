//! # Block Type Module
//!
//! This module defines the different kinds of cells a chunk can hold.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all known block types.
///
/// The discriminants are the tags stored in chunk data, so the order is part of
/// the data format: `0` is air and `1` is solid. New kinds go at the end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space.
    AIR = 0,

    /// Generic solid terrain.
    SOLID = 1,
}

impl BlockType {
    /// Converts a stored tag back into a `BlockType`.
    ///
    /// # Returns
    /// `None` when the tag does not name a known block type.
    pub fn from_tag(tag: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(tag)
    }

    /// Picks the block for a noise sample: air at or below the threshold, solid above it.
    pub fn from_noise_sample(sample: f64, air_threshold: f64) -> Self {
        if sample <= air_threshold {
            BlockType::AIR
        } else {
            BlockType::SOLID
        }
    }
}
