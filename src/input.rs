//! Input state for the frame driver.
//!
//! [`Input`] folds raw winit window events into per-frame state: which
//! mouse buttons are held, which keys went down this frame, and where the
//! cursor is. The cursor is kept in physical pixels with the origin at the
//! top-left and y pointing down, the same space particles live in.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard and mouse state, rebuilt from window events.
#[derive(Debug, Default)]
pub struct Input {
    keys_pressed: HashSet<KeyCode>,
    keys_held: HashSet<KeyCode>,
    mouse_held: HashSet<MouseButton>,
    cursor: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down since the last [`begin_frame`](Self::begin_frame).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Cursor position in physical pixels.
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    /// Clear per-frame state. Held state carries over.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.key(key, event.state);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_button(*button, *state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
            }
            // Releases while unfocused never arrive.
            WindowEvent::Focused(false) => {
                self.keys_held.clear();
                self.mouse_held.clear();
            }
            _ => {}
        }
    }

    fn key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // Ignore auto-repeat
                if self.keys_held.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    fn mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_lasts_one_frame() {
        let mut input = Input::new();
        input.key(KeyCode::Escape, ElementState::Pressed);
        assert!(input.key_pressed(KeyCode::Escape));

        input.begin_frame();
        assert!(!input.key_pressed(KeyCode::Escape));
        assert!(input.keys_held.contains(&KeyCode::Escape));
    }

    #[test]
    fn test_key_repeat_does_not_retrigger() {
        let mut input = Input::new();
        input.key(KeyCode::Space, ElementState::Pressed);
        input.begin_frame();
        input.key(KeyCode::Space, ElementState::Pressed);
        assert!(!input.key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_mouse_hold_and_release() {
        let mut input = Input::new();
        input.mouse_button(MouseButton::Left, ElementState::Pressed);
        input.begin_frame();
        assert!(input.mouse_held(MouseButton::Left));

        input.mouse_button(MouseButton::Left, ElementState::Released);
        assert!(!input.mouse_held(MouseButton::Left));
    }

    #[test]
    fn test_focus_loss_releases_everything() {
        let mut input = Input::new();
        input.mouse_button(MouseButton::Left, ElementState::Pressed);
        input.key(KeyCode::KeyA, ElementState::Pressed);

        input.handle_event(&WindowEvent::Focused(false));

        assert!(!input.mouse_held(MouseButton::Left));
        assert!(!input.keys_held.contains(&KeyCode::KeyA));
    }
}
