//! # Core Module
//!
//! Startup plumbing shared by the rest of the crate: the configuration a world
//! is built from and the errors raised while loading it.
//!
//! ## Key Components
//! - `SandboxConfig`: JSON-backed configuration with per-section defaults
//! - `ConfigError`: everything that can be wrong with a configuration

pub mod config;
pub mod error;

pub use config::SandboxConfig;
pub use error::ConfigError;
