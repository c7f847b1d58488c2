//! # Noise Source
//!
//! The coherent-noise function terrain generation samples. Generation only
//! needs a deterministic `(x, y) -> f64` map, so the dependency is a trait;
//! the default implementation wraps `noise::Perlin`.

use std::fmt;

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Deterministic 2D coherent noise.
///
/// Implementations must return the same value for the same input every time;
/// chunk generation relies on this to be reproducible.
pub trait NoiseSource {
    /// Samples the noise field at `(x, y)`.
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64,
{
    fn sample(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// The world generation seed.
///
/// Seeds are real numbers, usually drawn uniformly from `[0, 1)`. They are
/// folded into the 32-bit seed Perlin noise takes by [`WorldSeed::noise_seed`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldSeed(pub f64);

impl WorldSeed {
    /// Draws a fresh seed in `[0, 1)`.
    pub fn random() -> Self {
        WorldSeed(fastrand::f64())
    }

    /// The raw seed value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Folds the seed into a 32-bit noise seed.
    ///
    /// Fractions in `(0, 1)` are scaled up to 16 bits first so that distinct
    /// small seeds stay distinct, and seeds below 256 are mirrored into the
    /// high byte.
    pub fn noise_seed(&self) -> u32 {
        let mut scaled = self.0;
        if scaled > 0.0 && scaled < 1.0 {
            scaled *= 65536.0;
        }

        let mut seed = scaled.floor() as u32;
        if seed < 256 {
            seed |= seed << 8;
        }
        seed
    }
}

impl fmt::Display for WorldSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Perlin noise seeded from a [`WorldSeed`].
#[derive(Clone)]
pub struct PerlinNoise {
    perlin: Perlin,
    seed: WorldSeed,
}

impl PerlinNoise {
    /// Creates Perlin noise for the given world seed.
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            perlin: Perlin::new(seed.noise_seed()),
            seed,
        }
    }

    /// The world seed this noise was built from.
    pub fn seed(&self) -> WorldSeed {
        self.seed
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y])
    }
}
