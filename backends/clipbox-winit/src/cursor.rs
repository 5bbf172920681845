//! Cursor management for the clipping editors
//!
//! Editors report a [`CursorStyle`]; this maps it to a winit icon and caches the
//! last applied style to avoid redundant window calls.

use clipbox::CursorStyle;
use winit::window::{CursorIcon, Window};

/// Convert an editor cursor to a winit cursor
pub fn cursor_icon(style: CursorStyle) -> CursorIcon {
    match style {
        CursorStyle::Auto => CursorIcon::Default,
        CursorStyle::Move => CursorIcon::Move,
        CursorStyle::Pointer => CursorIcon::Pointer,
        CursorStyle::Grabbing => CursorIcon::Grabbing,
    }
}

/// Last cursor applied to a window
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorCache {
    applied: Option<CursorStyle>,
}

impl CursorCache {
    /// Record `style`; returns whether it differs from the last one
    pub fn update(&mut self, style: CursorStyle) -> bool {
        let changed = self.applied != Some(style);
        self.applied = Some(style);
        changed
    }

    /// Apply `style` to the window unless it is already showing
    pub fn apply(&mut self, window: &Window, style: CursorStyle) {
        if self.update(style) {
            window.set_cursor(cursor_icon(style));
        }
    }

    /// Forget the applied style, e.g. after the host changed the cursor
    pub fn reset(&mut self) {
        self.applied = None;
    }
}
