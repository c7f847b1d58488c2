#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Chunk Sandbox
//!
//! The simulation core of a 2D side-scrolling sandbox: an infinite strip of
//! procedurally generated terrain, split into fixed-width chunks that are
//! generated from Perlin noise the first time the camera sees them, and a
//! handful of entities falling, walking and jumping under simple physics.
//!
//! ## Key Modules
//!
//! * `application_state` - Frame lifecycle, input handling and frame timing
//! * `core` - Configuration and configuration errors
//! * `engine_state` - Terrain, entities, camera, rendering hand-off and the debug inspector
//!
//! ## Architecture
//!
//! The crate draws nothing itself. Each frame the engine produces a draw list
//! of screen-space rectangles and hands it to a [`Renderer`](engine_state::rendering::Renderer),
//! so the same core runs headless, in tests, or behind a browser canvas.
//!
//! ## Usage
//!
//! ```no_run
//! // Native headless session
//! fn main() {
//!     if chunk_sandbox::run().is_err() {
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! Driving the loop yourself:
//!
//! ```no_run
//! use chunk_sandbox::{
//!     application_state::ApplicationState,
//!     core::SandboxConfig,
//!     engine_state::{rendering::NullRenderer, EngineState},
//! };
//!
//! let engine = EngineState::new(&SandboxConfig::default()).unwrap();
//! let mut app = ApplicationState::new(engine);
//! let mut renderer = NullRenderer;
//! for frame in 1..=60 {
//!     app.on_frame(frame as f64 * 16.0, &mut renderer);
//! }
//! ```

#[cfg(not(target_family = "wasm"))]
use std::{thread, time::Duration};

#[cfg(not(target_family = "wasm"))]
use log::{error, info};
#[cfg(not(target_family = "wasm"))]
use winit::keyboard::KeyCode;

#[cfg(not(target_family = "wasm"))]
use crate::{
    application_state::{frame_clock::WallClock, ApplicationState},
    core::{config::SandboxConfig, error::ConfigError},
    engine_state::{rendering::LoggingRenderer, EngineState},
};

pub mod application_state;
pub mod core;
pub mod engine_state;

/// Frames in the scripted headless session.
#[cfg(not(target_family = "wasm"))]
const SESSION_FRAMES: u64 = 600;

/// Target time between headless frames.
#[cfg(not(target_family = "wasm"))]
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// The debug panel is logged every this many frames.
#[cfg(not(target_family = "wasm"))]
const DEBUG_LOG_INTERVAL: u64 = 60;

/// Key presses and releases of the headless session, by frame.
#[cfg(not(target_family = "wasm"))]
const SESSION_SCRIPT: [(u64, KeyCode, bool); 8] = [
    (30, KeyCode::KeyD, true),
    (90, KeyCode::KeyW, true),
    (92, KeyCode::KeyW, false),
    (240, KeyCode::KeyD, false),
    (300, KeyCode::KeyA, true),
    (420, KeyCode::KeyW, true),
    (421, KeyCode::KeyW, false),
    (540, KeyCode::KeyA, false),
];

/// Initializes logging.
///
/// Natively this writes to stdout, filtered by `RUST_LOG`. On the web it logs
/// to the browser console and installs a panic hook that does the same.
/// Calling it more than once is harmless.
pub fn init_logger() {
    cfg_if::cfg_if! {
        if #[cfg(target_family = "wasm")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            let _ = console_log::init_with_level(log::Level::Info);
        } else {
            let _ = env_logger::Builder::new()
                .target(env_logger::Target::Stdout)
                .parse_env("RUST_LOG")
                .try_init();
        }
    }
}

/// Runs a scripted headless session.
///
/// Loads the configuration named by `CHUNK_SANDBOX_CONFIG` (or the defaults),
/// then walks the player right, jumps, walks back left and jumps again, logging
/// the debug panel once a second.
#[cfg(not(target_family = "wasm"))]
pub fn run() -> Result<(), ConfigError> {
    init_logger();
    info!("Logger initialized");

    let config = SandboxConfig::load_from_env().inspect_err(|err| error!("{err}"))?;
    let engine_state = EngineState::new(&config).inspect_err(|err| error!("{err}"))?;

    let mut state = ApplicationState::new(engine_state);
    state.set_debug_visible(true);
    let mut renderer = LoggingRenderer::default();
    let clock = WallClock::new();

    for frame in 0..SESSION_FRAMES {
        for (_, key, pressed) in SESSION_SCRIPT.iter().filter(|(at, ..)| *at == frame) {
            state.input_manager.set_key_state(*key, *pressed);
        }

        state.on_frame(clock.elapsed_ms(), &mut renderer);

        if frame % DEBUG_LOG_INTERVAL == 0 {
            for line in state.debug_lines().iter().filter(|line| !line.is_empty()) {
                info!("{line}");
            }
        }
        thread::sleep(FRAME_INTERVAL);
    }

    info!(
        "Session finished: {} frames drawn, {} chunks loaded",
        renderer.frames_drawn,
        state.engine_state.chunk_store.loaded_count()
    );
    Ok(())
}

/// Sets up logging for the browser build.
#[cfg(target_family = "wasm")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn run_web() {
    init_logger();
    log::info!("Logger initialized");
}

#[cfg(target_family = "wasm")]
pub mod web;
