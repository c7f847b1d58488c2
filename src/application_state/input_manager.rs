//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Keyboard input state tracking
//! - Press event counting, so short taps are not lost between frames
//! - Mouse wheel and cursor tracking
//!
//! Scroll is reported in pixels with positive values scrolling down, which is
//! what the camera zoom expects.

use std::collections::HashMap;

use cgmath::Point2;
use winit::{
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{ProcessedInputState, RawInputState};

const KEY_CODES: [KeyCode; 3] = [KeyCode::KeyA, KeyCode::KeyD, KeyCode::KeyW];

/// Pixels scrolled per wheel line.
pub const SCROLL_LINE_PX: f64 = 100.0;

/// Manages the state of all input devices and processes input events.
///
/// This struct maintains the current state of keyboard and mouse inputs
/// and provides methods to process input events from the windowing system.
#[derive(Debug, Clone)]
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,
    /// Press events per key since the last reset
    pub key_presses: HashMap<KeyCode, u32>,

    /// Scroll accumulated since the last reset, in pixels
    pub scroll_delta_px: f64,
    /// Cursor position, if it moved since the last reset
    pub cursor_position: Option<Point2<f64>>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with every tracked key released.
    pub fn new() -> Self {
        let keyboard_inputs_old: HashMap<KeyCode, bool> =
            KEY_CODES.iter().map(|key| (*key, false)).collect();
        let keyboard_inputs_new = keyboard_inputs_old.clone();

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            key_presses: HashMap::new(),
            scroll_delta_px: 0.0,
            cursor_position: None,
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }
    }

    /// Processes a window event and updates internal input state.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                self.set_key_state(*key, *state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scrolling up as positive, the camera wants it negative
                let delta_y_px = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -f64::from(*y) * SCROLL_LINE_PX,
                    MouseScrollDelta::PixelDelta(position) => -position.y,
                };
                self.intake_scroll(delta_y_px);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.intake_cursor(Point2::new(position.x, position.y));
            }
            _ => {}
        }
    }

    /// Records a key press or release. Untracked keys are ignored.
    ///
    /// Every press counts, so held keys that auto-repeat count again.
    pub fn set_key_state(&mut self, key: KeyCode, pressed: bool) {
        let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) else {
            return;
        };
        *key_state = pressed;
        if pressed {
            *self.key_presses.entry(key).or_insert(0) += 1;
        }
    }

    /// Adds a vertical scroll in pixels, positive scrolling down.
    pub fn intake_scroll(&mut self, delta_y_px: f64) {
        if delta_y_px.is_finite() {
            self.scroll_delta_px += delta_y_px;
        }
    }

    /// Records the cursor position in viewport pixels.
    pub fn intake_cursor(&mut self, position: Point2<f64>) {
        self.cursor_position = Some(position);
    }

    /// Creates a processed input state from the current raw states.
    ///
    /// # Returns
    /// A new `ProcessedInputState` with processed input states.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            key_presses: self.key_presses.clone(),
            scroll_delta_px: self.scroll_delta_px,
            cursor_position: self.cursor_position,
        }
    }

    /// Returns the processed input state and resets per-frame state.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Starts a new frame: current key states become the old ones and the
    /// per-frame accumulators are cleared.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.key_presses.clear();
        self.scroll_delta_px = 0.0;
        self.cursor_position = None;
    }

    /// Releases every key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        for state in self.keyboard_inputs_new.values_mut() {
            *state = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_hold_release_cycle() {
        let mut manager = InputManager::new();
        manager.set_key_state(KeyCode::KeyA, true);
        let frame = manager.get_and_reset_processed_input();
        assert_eq!(frame.get_key_state(KeyCode::KeyA), RawInputState::Pressed);
        assert!(frame.was_pressed(KeyCode::KeyA));

        let frame = manager.get_and_reset_processed_input();
        assert_eq!(frame.get_key_state(KeyCode::KeyA), RawInputState::Held);
        assert!(!frame.was_pressed(KeyCode::KeyA));

        manager.set_key_state(KeyCode::KeyA, false);
        let frame = manager.get_and_reset_processed_input();
        assert_eq!(frame.get_key_state(KeyCode::KeyA), RawInputState::Released);
    }

    #[test]
    fn taps_between_frames_are_counted() {
        let mut manager = InputManager::new();
        manager.set_key_state(KeyCode::KeyW, true);
        manager.set_key_state(KeyCode::KeyW, false);
        let frame = manager.get_and_reset_processed_input();
        assert_eq!(frame.get_key_state(KeyCode::KeyW), RawInputState::NotPressed);
        assert!(frame.was_pressed(KeyCode::KeyW));
    }

    #[test]
    fn untracked_keys_are_ignored() {
        let mut manager = InputManager::new();
        manager.set_key_state(KeyCode::KeyQ, true);
        let frame = manager.get_and_reset_processed_input();
        assert!(!frame.was_pressed(KeyCode::KeyQ));
        assert!(!frame.keyboard_states.contains_key(&KeyCode::KeyQ));
    }

    #[test]
    fn scroll_and_cursor_reset_each_frame() {
        let mut manager = InputManager::new();
        manager.intake_scroll(50.0);
        manager.intake_scroll(-20.0);
        manager.intake_scroll(f64::NAN);
        manager.intake_cursor(Point2::new(10.0, 20.0));

        let frame = manager.get_and_reset_processed_input();
        assert_eq!(frame.scroll_delta_px, 30.0);
        assert_eq!(frame.cursor_position, Some(Point2::new(10.0, 20.0)));

        let frame = manager.get_and_reset_processed_input();
        assert_eq!(frame.scroll_delta_px, 0.0);
        assert_eq!(frame.cursor_position, None);
    }

    #[test]
    fn release_all_drops_held_keys() {
        let mut manager = InputManager::new();
        manager.set_key_state(KeyCode::KeyD, true);
        manager.get_and_reset_processed_input();
        manager.release_all();
        let frame = manager.get_and_reset_processed_input();
        assert_eq!(frame.get_key_state(KeyCode::KeyD), RawInputState::Released);
    }
}
