//! # Sandbox Configuration
//!
//! Everything tunable about a world, grouped by the subsystem that reads it.
//! Every field has a default, so an empty JSON object (or no file at all) gives
//! the stock sandbox: 16x56 chunks, Perlin terrain, a random seed and a player
//! named `steve`.
//!
//! ## Loading
//! - [`SandboxConfig::from_json_str`] parses a JSON document
//! - [`SandboxConfig::from_path`] reads and parses a file
//! - [`SandboxConfig::load_from_env`] reads the file named by
//!   [`CONFIG_PATH_ENV`], falling back to the defaults when it is unset
//!
//! All three validate before returning.

use std::{env, fs, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::engine_state::{
    camera_state::camera::{
        Camera, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, DEFAULT_ZOOM, MAX_VIEWPORT_PX,
        MIN_ZOOM,
    },
    entities::PhysicsConstants,
    terrain::{
        chunk::{ChunkDimensions, CHUNK_HEIGHT, CHUNK_WIDTH},
        generator::{GenerationMethod, GeneratorSettings, AIR_THRESHOLD, NOISE_FREQUENCY_DIVISOR},
        noise_source::WorldSeed,
    },
};

/// Environment variable holding the path of a JSON config file.
pub const CONFIG_PATH_ENV: &str = "CHUNK_SANDBOX_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// World layout and seed.
    pub world: WorldConfig,
    /// Terrain generation.
    pub generation: GenerationConfig,
    /// Physics constants.
    pub physics: PhysicsConstants,
    /// Camera and viewport.
    pub camera: CameraConfig,
    /// Who is in the world.
    pub player: PlayerConfig,
}

/// World layout and seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Columns per chunk.
    pub chunk_width: usize,
    /// Rows per chunk.
    pub chunk_height: usize,
    /// Fixed seed. A random one is drawn when absent.
    pub seed: Option<WorldSeed>,
    /// Chunks generated before the first tick.
    pub spawn_chunks: Vec<i32>,
    /// Upper bound on chunks generated per tick, at least 1. Unbounded when absent.
    pub max_chunks_per_tick: Option<usize>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_width: CHUNK_WIDTH,
            chunk_height: CHUNK_HEIGHT,
            seed: None,
            spawn_chunks: vec![-1, 0],
            max_chunks_per_tick: None,
        }
    }
}

/// Terrain generation settings, in their serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Name of the generation method.
    pub method: String,
    /// Divisor applied to world coordinates before sampling noise.
    pub frequency_divisor: f64,
    /// Samples at or below this become air.
    pub air_threshold: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            method: GenerationMethod::Perlin.name().to_owned(),
            frequency_divisor: NOISE_FREQUENCY_DIVISOR,
            air_threshold: AIR_THRESHOLD,
        }
    }
}

/// Camera and viewport settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial zoom in pixels per block.
    pub zoom: f64,
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl CameraConfig {
    /// Builds the camera these settings describe.
    pub fn camera(&self) -> Camera {
        Camera::new(self.zoom, self.viewport_width, self.viewport_height)
    }
}

/// Who populates a new world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// The anchor player's display name.
    pub username: String,
    /// Generic entities spawned next to the player.
    pub generic_entities: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            username: "steve".to_owned(),
            generic_entities: 1,
        }
    }
}

impl SandboxConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SandboxConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loading config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Loads the file named by [`CONFIG_PATH_ENV`], or the defaults if the
    /// variable is unset.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_path(path),
            None => {
                info!("{CONFIG_PATH_ENV} is not set, using the default config");
                Ok(Self::default())
            }
        }
    }

    /// Checks every section, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dimensions().is_valid() {
            return Err(ConfigError::ZeroChunkDimension {
                width: self.world.chunk_width,
                height: self.world.chunk_height,
            });
        }
        if self.world.max_chunks_per_tick == Some(0) {
            return Err(ConfigError::InvalidGenerationBudget);
        }
        if let Some(seed) = self.world.seed {
            if !seed.value().is_finite() {
                return Err(ConfigError::InvalidSeed(seed.value()));
            }
        }

        self.generator_settings()?.validate()?;
        self.physics.validate()?;

        let camera = &self.camera;
        if !camera.zoom.is_finite() || camera.zoom < MIN_ZOOM {
            return Err(ConfigError::InvalidZoom(camera.zoom));
        }
        let viewport_ok = [camera.viewport_width, camera.viewport_height]
            .iter()
            .all(|side| *side > 0.0 && *side <= MAX_VIEWPORT_PX);
        if !viewport_ok {
            return Err(ConfigError::InvalidViewport {
                width: camera.viewport_width,
                height: camera.viewport_height,
            });
        }
        Ok(())
    }

    /// Chunk dimensions for the world.
    pub fn dimensions(&self) -> ChunkDimensions {
        ChunkDimensions::new(self.world.chunk_width, self.world.chunk_height)
    }

    /// Resolves the generation section into generator settings.
    pub fn generator_settings(&self) -> Result<GeneratorSettings, ConfigError> {
        let method = GenerationMethod::from_name(&self.generation.method)
            .ok_or_else(|| ConfigError::UnknownGenerationMethod(self.generation.method.clone()))?;
        Ok(GeneratorSettings {
            method,
            frequency_divisor: self.generation.frequency_divisor,
            air_threshold: self.generation.air_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = SandboxConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SandboxConfig::default());
        assert_eq!(config.dimensions(), ChunkDimensions::new(16, 56));
        assert_eq!(config.world.spawn_chunks, vec![-1, 0]);
        assert_eq!(config.player.username, "steve");
        assert_eq!(config.generator_settings().unwrap(), GeneratorSettings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SandboxConfig::from_json_str(
            r#"{
                "world": { "seed": 0.42, "max_chunks_per_tick": 2 },
                "generation": { "method": "checkerboard" },
                "physics": { "gravity": 20.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.world.seed, Some(WorldSeed(0.42)));
        assert_eq!(config.world.max_chunks_per_tick, Some(2));
        assert_eq!(config.world.chunk_width, 16);
        assert_eq!(
            config.generator_settings().unwrap().method,
            GenerationMethod::Checkerboard
        );
        assert_eq!(config.physics.gravity, 20.0);
        assert_eq!(config.physics.jump_impulse, 7.0);
    }

    #[test]
    fn rejects_unknown_methods() {
        let err = SandboxConfig::from_json_str(r#"{ "generation": { "method": "caves" } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownGenerationMethod(name) if name == "caves"));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = SandboxConfig::from_json_str(r#"{ "world": { "chunk_width": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroChunkDimension {
                width: 0,
                height: 56
            }
        ));
    }

    #[test]
    fn rejects_bad_camera_and_generation() {
        let mut config = SandboxConfig::default();
        config.camera.zoom = 0.5;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidZoom(_))));

        let mut config = SandboxConfig::default();
        config.camera.viewport_height = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidViewport { .. })
        ));

        let mut config = SandboxConfig::default();
        config.generation.frequency_divisor = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFrequencyDivisor(_))
        ));
    }

    #[test]
    fn rejects_a_zero_generation_budget() {
        let err = SandboxConfig::from_json_str(r#"{ "world": { "max_chunks_per_tick": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGenerationBudget));

        let config =
            SandboxConfig::from_json_str(r#"{ "world": { "max_chunks_per_tick": 1 } }"#).unwrap();
        assert_eq!(config.world.max_chunks_per_tick, Some(1));
    }

    #[test]
    fn rejects_oversized_viewports() {
        let mut config = SandboxConfig::default();
        config.camera.viewport_width = 1e9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidViewport { .. })
        ));

        config.camera.viewport_width = MAX_VIEWPORT_PX;
        assert!(config.validate().is_ok());

        config.camera.viewport_width = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_errors_are_reported() {
        let err = SandboxConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("could not parse config"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SandboxConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
