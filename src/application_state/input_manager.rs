//! # Input Manager
//!
//! Collects window and device events between frames and turns them into one
//! [`InputSnapshot`] per frame.

use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{InputSnapshot, InputTransition};

/// Keys that move the camera. Everything else is ignored.
pub const TRACKED_KEYS: [KeyCode; 6] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
    KeyCode::ShiftLeft,
];

/// Dragging with this button turns the camera.
pub const LOOK_BUTTON: MouseButton = MouseButton::Left;

/// Tracks which inputs are down now and which were down at the last snapshot.
#[derive(Debug, Default)]
pub struct InputManager {
    keys_down: HashSet<KeyCode>,
    keys_were_down: HashSet<KeyCode>,
    look_down: bool,
    look_was_down: bool,
    mouse_delta: Option<(f64, f64)>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records key and mouse button changes from a window event.
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
            } if TRACKED_KEYS.contains(key) => {
                self.set_key(*key, *state == ElementState::Pressed);
            }
            WindowEvent::MouseInput { button, state, .. } if *button == LOOK_BUTTON => {
                self.look_down = *state == ElementState::Pressed;
            }
            _ => {}
        }
    }

    /// Marks a tracked key as down or up.
    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        if down {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Marks the look button as down or up.
    pub fn set_look_button(&mut self, down: bool) {
        self.look_down = down;
    }

    /// Adds raw mouse motion. Several motion events in one frame are summed.
    pub fn intake_mouse_motion(&mut self, (dx, dy): (f64, f64)) {
        let (x, y) = self.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_delta = Some((x + dx, y + dy));
    }

    /// Builds this frame's snapshot and starts the next frame.
    ///
    /// The current key state becomes the previous one and the mouse delta
    /// is cleared.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        let snapshot = TRACKED_KEYS
            .iter()
            .fold(InputSnapshot::default(), |snapshot, key| {
                snapshot.with_key(
                    *key,
                    InputTransition::between(
                        self.keys_were_down.contains(key),
                        self.keys_down.contains(key),
                    ),
                )
            })
            .with_button(
                LOOK_BUTTON,
                InputTransition::between(self.look_was_down, self.look_down),
            )
            .with_mouse_delta(self.mouse_delta.take());

        self.keys_were_down.clone_from(&self.keys_down);
        self.look_was_down = self.look_down;
        snapshot
    }

    /// Releases everything, e.g. when the window loses focus and key-up
    /// events would never arrive.
    pub fn clear(&mut self) {
        self.keys_down.clear();
        self.look_down = false;
        self.mouse_delta = None;
    }
}
