//! # Browser Bindings
//!
//! A thin `wasm-bindgen` surface over [`ApplicationState`]. The page owns the
//! animation loop and the canvas: it forwards input, calls
//! [`WebSandbox::frame`] from `requestAnimationFrame`, and fills the returned
//! rectangles.

use wasm_bindgen::prelude::*;
use winit::keyboard::KeyCode;

use crate::{
    application_state::ApplicationState,
    core::config::SandboxConfig,
    engine_state::{rendering::RecordingRenderer, EngineState},
};

/// A sandbox driven from JavaScript.
#[wasm_bindgen]
pub struct WebSandbox {
    state: ApplicationState,
    renderer: RecordingRenderer,
}

#[wasm_bindgen]
impl WebSandbox {
    /// Builds a sandbox from an optional JSON configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebSandbox, JsError> {
        let config = match config_json {
            Some(json) => SandboxConfig::from_json_str(&json)?,
            None => SandboxConfig::default(),
        };
        let engine_state = EngineState::new(&config)?;
        Ok(Self {
            state: ApplicationState::new(engine_state),
            renderer: RecordingRenderer::default(),
        })
    }

    /// Runs a frame at `time_ms` and returns its draw list as JSON.
    pub fn frame(&mut self, time_ms: f64) -> Result<String, JsError> {
        self.state.on_frame(time_ms, &mut self.renderer);
        Ok(serde_json::to_string(&self.renderer.last_frame)?)
    }

    /// Forwards a key event. `key` is the DOM `KeyboardEvent.key` value.
    pub fn key(&mut self, key: &str, pressed: bool) {
        let code = match key {
            "a" => KeyCode::KeyA,
            "d" => KeyCode::KeyD,
            "w" => KeyCode::KeyW,
            _ => return,
        };
        self.state.input_manager.set_key_state(code, pressed);
    }

    /// Forwards a wheel event's `deltaY`.
    pub fn scroll(&mut self, delta_y_px: f64) {
        self.state.input_manager.intake_scroll(delta_y_px);
    }

    /// Forwards the cursor position relative to the canvas.
    pub fn cursor(&mut self, x: f64, y: f64) {
        self.state
            .input_manager
            .intake_cursor(cgmath::Point2::new(x, y));
    }

    /// Resizes the viewport to the canvas size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.state.engine_state.resize_viewport(width, height);
    }

    /// Shows or hides the debug panel.
    pub fn set_debug(&mut self, visible: bool) {
        self.state.set_debug_visible(visible);
    }

    /// The debug panel from the last frame, one line per entry.
    pub fn debug_text(&self) -> String {
        self.state.debug_lines().join("\n")
    }
}
