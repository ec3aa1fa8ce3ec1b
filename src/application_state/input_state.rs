//! # Input State
//!
//! Per-frame input snapshot handed from the input manager to the engine.

use std::collections::HashMap;
use winit::{event::MouseButton, keyboard::KeyCode};

/// How a key or button changed between the previous frame and this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputTransition {
    /// Up in both frames
    #[default]
    Idle,
    /// Went down this frame
    Pressed,
    /// Down in both frames
    Held,
    /// Went up this frame
    Released,
}

impl InputTransition {
    /// Classifies a key from whether it was down last frame and is down now.
    pub fn between(was_down: bool, is_down: bool) -> Self {
        match (was_down, is_down) {
            (false, false) => Self::Idle,
            (false, true) => Self::Pressed,
            (true, true) => Self::Held,
            (true, false) => Self::Released,
        }
    }

    /// `true` while the key is down.
    pub fn is_down(self) -> bool {
        matches!(self, Self::Pressed | Self::Held)
    }
}

/// Everything the engine needs to know about input for one frame.
///
/// Keys and buttons that were never recorded read as [`InputTransition::Idle`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    keys: HashMap<KeyCode, InputTransition>,
    buttons: HashMap<MouseButton, InputTransition>,
    mouse_delta: Option<(f64, f64)>,
}

impl InputSnapshot {
    /// Records a key transition.
    pub fn with_key(mut self, key: KeyCode, transition: InputTransition) -> Self {
        self.keys.insert(key, transition);
        self
    }

    /// Records a mouse button transition.
    pub fn with_button(mut self, button: MouseButton, transition: InputTransition) -> Self {
        self.buttons.insert(button, transition);
        self
    }

    /// Records the mouse motion accumulated over the frame.
    pub fn with_mouse_delta(mut self, delta: Option<(f64, f64)>) -> Self {
        self.mouse_delta = delta;
        self
    }

    pub fn key(&self, key: KeyCode) -> InputTransition {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    pub fn button(&self, button: MouseButton) -> InputTransition {
        self.buttons.get(&button).copied().unwrap_or_default()
    }

    /// Raw mouse motion since the last snapshot, if the mouse moved.
    pub fn mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }
}
