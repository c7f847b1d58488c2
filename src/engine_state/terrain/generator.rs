//! # Chunk Generator
//!
//! Turns a chunk index into chunk data. Generation is a pure function of the
//! noise source and the index: no chunk depends on another, and generating the
//! same index twice yields identical cells.
//!
//! ## Methods
//!
//! - `perlin`: threshold 2D Perlin noise into air and solid (the world generator)
//! - `solid`: every cell solid
//! - `empty`: every cell air
//! - `checkerboard`: alternating cells, handy when eyeballing coordinate math
//!
//! Whatever the method, row [`BEDROCK_ROW`] is forced solid.

use log::debug;
use phf::phf_map;

use crate::core::error::ConfigError;

use super::{
    block::block_type::BlockType,
    chunk::{Chunk, ChunkCreationIterator, ChunkDimensions, BEDROCK_ROW},
    noise_source::NoiseSource,
};

/// World coordinates are divided by this before sampling noise.
pub const NOISE_FREQUENCY_DIVISOR: f64 = 10.0;
/// Noise samples at or below this value become air.
pub const AIR_THRESHOLD: f64 = 0.05;

/// The method used to fill new chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationMethod {
    /// Thresholded Perlin noise.
    Perlin,
    /// Every cell solid.
    Solid,
    /// Every cell air (apart from bedrock).
    Empty,
    /// Alternating solid and air cells.
    Checkerboard,
}

static GENERATION_METHODS: phf::Map<&'static str, GenerationMethod> = phf_map! {
    "perlin" => GenerationMethod::Perlin,
    "solid" => GenerationMethod::Solid,
    "empty" => GenerationMethod::Empty,
    "checkerboard" => GenerationMethod::Checkerboard,
};

impl GenerationMethod {
    /// Looks a method up by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        GENERATION_METHODS.get(name).copied()
    }

    /// The configuration name of this method.
    pub fn name(&self) -> &'static str {
        match self {
            GenerationMethod::Perlin => "perlin",
            GenerationMethod::Solid => "solid",
            GenerationMethod::Empty => "empty",
            GenerationMethod::Checkerboard => "checkerboard",
        }
    }
}

/// Tunables for a [`ChunkGenerator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorSettings {
    /// Fill method.
    pub method: GenerationMethod,
    /// Divisor applied to world coordinates before sampling noise.
    pub frequency_divisor: f64,
    /// Samples at or below this become air.
    pub air_threshold: f64,
}

impl GeneratorSettings {
    /// Rejects settings that would make generation divide by zero or compare against NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frequency_divisor.is_finite() || self.frequency_divisor <= 0.0 {
            return Err(ConfigError::InvalidFrequencyDivisor(self.frequency_divisor));
        }
        if !self.air_threshold.is_finite() {
            return Err(ConfigError::InvalidAirThreshold(self.air_threshold));
        }
        Ok(())
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            method: GenerationMethod::Perlin,
            frequency_divisor: NOISE_FREQUENCY_DIVISOR,
            air_threshold: AIR_THRESHOLD,
        }
    }
}

/// Generates chunks from a noise source.
pub struct ChunkGenerator<N: NoiseSource> {
    noise: N,
    dimensions: ChunkDimensions,
    settings: GeneratorSettings,
}

impl<N: NoiseSource> ChunkGenerator<N> {
    /// Creates a generator, validating its configuration up front so that
    /// [`ChunkGenerator::generate`] can never fail.
    pub fn new(
        noise: N,
        dimensions: ChunkDimensions,
        settings: GeneratorSettings,
    ) -> Result<Self, ConfigError> {
        if !dimensions.is_valid() {
            return Err(ConfigError::ZeroChunkDimension {
                width: dimensions.width,
                height: dimensions.height,
            });
        }
        settings.validate()?;

        Ok(Self {
            noise,
            dimensions,
            settings,
        })
    }

    /// Size of the chunks this generator builds.
    pub fn dimensions(&self) -> ChunkDimensions {
        self.dimensions
    }

    /// The settings this generator was built with.
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generates the chunk at `index`.
    pub fn generate(&self, index: i32) -> Chunk {
        debug!(
            "Generating chunk {} with method {}",
            index,
            self.settings.method.name()
        );

        let x_offset = index as f64 * self.dimensions.width as f64;
        let mut cci = ChunkCreationIterator::new(index, self.dimensions);

        for y in 0..self.dimensions.height {
            for x in 0..self.dimensions.width {
                let block_type = if y == BEDROCK_ROW {
                    BlockType::SOLID
                } else {
                    self.block_type_at(x, y, x_offset)
                };
                cci.push_block_type(block_type);
            }
        }

        cci.return_chunk()
    }

    fn block_type_at(&self, x: usize, y: usize, x_offset: f64) -> BlockType {
        match self.settings.method {
            GenerationMethod::Perlin => {
                let divisor = self.settings.frequency_divisor;
                let sample = self
                    .noise
                    .sample((x as f64 + x_offset) / divisor, y as f64 / divisor);
                BlockType::from_noise_sample(sample, self.settings.air_threshold)
            }
            GenerationMethod::Solid => BlockType::SOLID,
            GenerationMethod::Empty => BlockType::AIR,
            GenerationMethod::Checkerboard => {
                // parity in world space so the pattern continues across chunk borders
                let world_x = x as i64 + x_offset as i64;
                if (world_x + y as i64).rem_euclid(2) == 0 {
                    BlockType::SOLID
                } else {
                    BlockType::AIR
                }
            }
        }
    }
}
