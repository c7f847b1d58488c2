//! # Terrain
//!
//! This module contains everything about the world's block grid: the block
//! tags themselves, the fixed-size chunks that hold them, the noise source and
//! generator that fill chunks, and the store that owns and queries them.
//!
//! ## Data Flow
//!
//! 1. The engine asks the store which chunk indices a viewport covers
//! 2. Missing indices are handed to the generator through `ensure_generated`
//! 3. The renderer and debug inspector read chunks back out of the store

pub mod block;
pub mod chunk;
pub mod chunk_store;
pub mod generator;
pub mod noise_source;
