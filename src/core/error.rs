//! Errors raised while loading and validating configuration.
//!
//! Nothing at runtime is fatal: soft failures such as out-of-range block
//! lookups are ordinary values (see `BlockLookup`). Everything that could make
//! generation or physics ill-defined is caught here, before the world starts.

use std::{error::Error, fmt, io, path::PathBuf};

use crate::engine_state::camera_state::camera::MAX_VIEWPORT_PX;

/// A configuration problem detected at startup.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The configuration is not valid JSON for `SandboxConfig`.
    Parse(serde_json::Error),
    /// A chunk dimension is zero.
    ZeroChunkDimension {
        /// Configured chunk width.
        width: usize,
        /// Configured chunk height.
        height: usize,
    },
    /// The noise frequency divisor is zero, negative or not finite.
    InvalidFrequencyDivisor(f64),
    /// The air threshold is not finite.
    InvalidAirThreshold(f64),
    /// No generation method has this name.
    UnknownGenerationMethod(String),
    /// The seed is not a finite number.
    InvalidSeed(f64),
    /// Zoom must be finite and at least the minimum zoom.
    InvalidZoom(f64),
    /// The per-tick generation budget is zero, so no chunk would ever load.
    InvalidGenerationBudget,
    /// The viewport must be positive and no larger than `MAX_VIEWPORT_PX`.
    InvalidViewport {
        /// Configured viewport width in pixels.
        width: f64,
        /// Configured viewport height in pixels.
        height: f64,
    },
    /// A physics constant is out of its allowed range.
    InvalidPhysics {
        /// Which constant.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "could not read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(err) => write!(f, "could not parse config: {err}"),
            ConfigError::ZeroChunkDimension { width, height } => {
                write!(f, "chunk dimensions must be non-zero, got {width}x{height}")
            }
            ConfigError::InvalidFrequencyDivisor(value) => {
                write!(f, "noise frequency divisor must be positive and finite, got {value}")
            }
            ConfigError::InvalidAirThreshold(value) => {
                write!(f, "air threshold must be finite, got {value}")
            }
            ConfigError::UnknownGenerationMethod(name) => {
                write!(f, "unknown generation method {name:?}")
            }
            ConfigError::InvalidSeed(value) => write!(f, "seed must be finite, got {value}"),
            ConfigError::InvalidZoom(value) => write!(f, "zoom must be finite and >= 1, got {value}"),
            ConfigError::InvalidGenerationBudget => {
                write!(f, "max_chunks_per_tick must be at least 1")
            }
            ConfigError::InvalidViewport { width, height } => {
                write!(
                    f,
                    "viewport sides must be in (0, {MAX_VIEWPORT_PX}], got {width}x{height}"
                )
            }
            ConfigError::InvalidPhysics { name, value } => {
                write!(f, "physics constant {name} is out of range: {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
