//! # Application State Management
//!
//! This module drives the engine from frame callbacks, including:
//! - Input handling
//! - Frame timing
//! - The Idle to Running lifecycle transition
//! - Handing each frame's draw list to a renderer
//!
//! Whoever owns the frame loop (a window, a browser animation callback or a
//! scripted headless session) calls [`ApplicationState::on_frame`] with the
//! frame timestamp and forwards window events to
//! [`ApplicationState::intake_window_event`].

pub mod frame_clock;
pub mod input_manager;
pub mod input_state;

use frame_clock::FrameClock;
use input_manager::InputManager;
use log::info;
use winit::event::WindowEvent;

use crate::engine_state::{
    rendering::Renderer, translate_processed_input, EngineState, TickReport,
};

/// Where the application is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Built, but no frame has been delivered yet
    #[default]
    Idle,
    /// Frames are being delivered
    Running,
}

/// The main application state container that manages the application's lifecycle.
///
/// This struct owns the engine, the input manager and the frame clock, and
/// turns frame callbacks into engine ticks.
pub struct ApplicationState {
    /// The core engine state and logic
    pub engine_state: EngineState,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Converts frame timestamps into deltas
    pub frame_clock: FrameClock,

    /// Lifecycle state
    loop_state: LoopState,

    /// Whether the debug panel is collected each frame
    debug_visible: bool,

    /// The debug panel from the last frame, empty while hidden
    debug_lines: Vec<String>,

    /// Frames delivered so far
    frames: u64,
}

impl ApplicationState {
    /// Wraps an engine that has not seen a frame yet.
    pub fn new(engine_state: EngineState) -> Self {
        Self {
            engine_state,
            input_manager: InputManager::new(),
            frame_clock: FrameClock::new(),
            loop_state: LoopState::Idle,
            debug_visible: false,
            debug_lines: Vec::new(),
            frames: 0,
        }
    }

    /// Current lifecycle state.
    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    /// Frames delivered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Shows or hides the debug panel.
    pub fn set_debug_visible(&mut self, visible: bool) {
        self.debug_visible = visible;
        if !visible {
            self.debug_lines.clear();
        }
    }

    /// The debug panel from the last frame.
    pub fn debug_lines(&self) -> &[String] {
        &self.debug_lines
    }

    /// Processes a window event.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_window_event(&mut self, event: &WindowEvent) {
        self.input_manager.intake_input(event);

        match event {
            WindowEvent::Resized(size) => {
                self.engine_state
                    .resize_viewport(f64::from(size.width), f64::from(size.height));
            }
            WindowEvent::Focused(false) => {
                self.input_manager.release_all();
            }
            _ => (),
        }
    }

    /// Runs one frame: tick the engine with this frame's input, then draw.
    ///
    /// # Arguments
    /// * `time_ms` - Absolute timestamp of the frame in milliseconds
    /// * `renderer` - Receives the frame's draw list
    ///
    /// # Returns
    /// What the engine tick did
    pub fn on_frame(&mut self, time_ms: f64, renderer: &mut dyn Renderer) -> TickReport {
        if self.loop_state == LoopState::Idle {
            info!("First frame at {time_ms}ms, simulation running");
            self.loop_state = LoopState::Running;
        }

        let delta_ms = self.frame_clock.advance(time_ms);
        let processed_input = self.input_manager.get_and_reset_processed_input();
        let action = translate_processed_input(&processed_input);

        let report = self.engine_state.tick(delta_ms, &action);
        renderer.draw(&self.engine_state.render_frame());

        if self.debug_visible {
            self.debug_lines = self
                .engine_state
                .debug_snapshot()
                .map(|snapshot| snapshot.lines())
                .unwrap_or_default();
        }

        self.frames += 1;
        report
    }
}
