//! Pointer event translation
//!
//! winit reports button presses without a position, so the translator keeps
//! the last cursor position and stamps it on presses and releases.

use clipbox::PointerEvent;
use glam::DVec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Turns winit window events into clipbox pointer events
#[derive(Debug, Clone, Default)]
pub struct WinitPointerInput {
    cursor: Option<DVec2>,
}

impl WinitPointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position in physical pixels
    pub fn cursor_position(&self) -> Option<DVec2> {
        self.cursor
    }

    /// Handle cursor movement
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> PointerEvent {
        let position = DVec2::new(position.x, position.y);
        self.cursor = Some(position);
        PointerEvent::Move { position }
    }

    /// Handle a mouse button; only the left button is forwarded
    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }
        let Some(position) = self.cursor else {
            clipbox::clip_trace!("ignoring {:?} before the first cursor position", state);
            return None;
        };
        Some(match state {
            ElementState::Pressed => PointerEvent::LeftDown { position },
            ElementState::Released => PointerEvent::LeftUp { position },
        })
    }

    /// Handle the cursor leaving the window
    pub fn cursor_left(&mut self) -> PointerEvent {
        self.cursor = None;
        PointerEvent::CanvasLeave
    }

    /// Handle a focus change; only losing focus is forwarded
    pub fn focus_changed(&mut self, focused: bool) -> Option<PointerEvent> {
        (!focused).then_some(PointerEvent::FocusLost)
    }

    /// Translate a window event, if it is one the editors listen to
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(self.cursor_moved(*position)),
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button),
            WindowEvent::CursorLeft { .. } => Some(self.cursor_left()),
            WindowEvent::Focused(focused) => self.focus_changed(*focused),
            _ => None,
        }
    }
}
