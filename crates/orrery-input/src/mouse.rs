//! Per-frame mouse state.
//!
//! [`MouseState`] collects winit mouse events between redraws. The frame
//! consumer reads the drag delta and scroll, then calls
//! [`end_frame`](MouseState::end_frame).

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of trackpad scroll treated as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
struct ButtonState {
    held: bool,
    pressed_this_frame: bool,
}

fn slot(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    has_position: bool,
    delta: Vec2,
    buttons: [ButtonState; 3],
    scroll: f32,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle `WindowEvent::CursorMoved`.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let next = Vec2::new(x as f32, y as f32);
        // The first event after entering the window has nothing to diff against.
        if self.has_position {
            self.delta += next - self.position;
        }
        self.position = next;
        self.has_position = true;
    }

    /// Handle `WindowEvent::CursorLeft`.
    pub fn on_cursor_left(&mut self) {
        self.has_position = false;
    }

    /// Handle `WindowEvent::MouseInput`. Back/forward/other buttons are ignored.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(i) = slot(button) else {
            return;
        };
        let pressed = state == ElementState::Pressed;
        self.buttons[i].held = pressed;
        if pressed {
            self.buttons[i].pressed_this_frame = true;
        }
    }

    /// Handle `WindowEvent::MouseWheel`. Positive is away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
    }

    /// Reset the per-frame delta, scroll and press edges.
    pub fn end_frame(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
        for b in &mut self.buttons {
            b.pressed_this_frame = false;
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Cursor movement since the last [`end_frame`](Self::end_frame).
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    #[must_use]
    pub fn is_held(&self, button: MouseButton) -> bool {
        slot(button).is_some_and(|i| self.buttons[i].held)
    }

    #[must_use]
    pub fn was_pressed(&self, button: MouseButton) -> bool {
        slot(button).is_some_and(|i| self.buttons[i].pressed_this_frame)
    }
}
