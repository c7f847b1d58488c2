//! # Input State
//!
//! This module defines the input state types used by the input manager.
//! It provides enums and structs for representing the state of input devices.

use std::collections::HashMap;

use cgmath::Point2;
use winit::keyboard::KeyCode;

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Key/button is not pressed
    #[default]
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Updates the input state based on the previous and current raw states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of one frame of input.
///
/// Key states describe where each key ended up relative to the previous
/// frame. Press events are counted separately so that a key pressed and
/// released between two frames is still seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedInputState {
    /// Current state of all tracked keyboard keys
    pub keyboard_states: HashMap<KeyCode, RawInputState>,

    /// Press events seen per key during the frame, auto-repeat included
    pub key_presses: HashMap<KeyCode, u32>,

    /// Vertical scroll since the last frame in pixels, positive scrolls down
    pub scroll_delta_px: f64,

    /// Latest cursor position in viewport pixels, if it moved this frame
    pub cursor_position: Option<Point2<f64>>,
}

impl ProcessedInputState {
    /// Gets the state of a keyboard key
    pub fn get_key_state(&self, key: KeyCode) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    /// Whether `key` saw at least one press event this frame
    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.key_presses.get(&key).is_some_and(|count| *count > 0)
    }
}
