//! Pointer input delivered to the controller
//!
//! Backends translate their native events into [`PointerEvent`]s. A controller
//! only reacts to the actions its [`HandlerRegistration`] subscribed to; once
//! the registration is released every event is ignored.

use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use glam::DVec2;

bitflags! {
    /// Pointer actions a handler subscribes to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputActions: u32 {
        /// Primary button pressed
        const LEFT_DOWN = 1 << 0;
        /// Primary button released
        const LEFT_UP = 1 << 1;
        /// Pointer moved over the canvas
        const MOUSE_MOVE = 1 << 2;
        /// Pointer left the canvas
        const CANVAS_LEAVE = 1 << 3;
        /// Canvas lost input focus
        const FOCUS_LOST = 1 << 4;

        /// Everything the controller listens to
        const ALL = Self::LEFT_DOWN.bits()
            | Self::LEFT_UP.bits()
            | Self::MOUSE_MOVE.bits()
            | Self::CANVAS_LEAVE.bits()
            | Self::FOCUS_LOST.bits();
    }
}

/// A pointer event in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed at `position`
    LeftDown { position: DVec2 },
    /// Primary button released at `position`
    LeftUp { position: DVec2 },
    /// Pointer moved to `position`
    Move { position: DVec2 },
    /// Pointer left the canvas
    CanvasLeave,
    /// Canvas lost input focus
    FocusLost,
}

impl PointerEvent {
    /// The action this event belongs to
    pub fn action(&self) -> InputActions {
        match self {
            PointerEvent::LeftDown { .. } => InputActions::LEFT_DOWN,
            PointerEvent::LeftUp { .. } => InputActions::LEFT_UP,
            PointerEvent::Move { .. } => InputActions::MOUSE_MOVE,
            PointerEvent::CanvasLeave => InputActions::CANVAS_LEAVE,
            PointerEvent::FocusLost => InputActions::FOCUS_LOST,
        }
    }

    /// Canvas position carried by the event
    pub fn position(&self) -> Option<DVec2> {
        match *self {
            PointerEvent::LeftDown { position }
            | PointerEvent::LeftUp { position }
            | PointerEvent::Move { position } => Some(position),
            PointerEvent::CanvasLeave | PointerEvent::FocusLost => None,
        }
    }
}

/// Identifier of a live handler registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id, for logging
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A live subscription to a set of pointer actions
#[derive(Debug, PartialEq, Eq)]
pub struct HandlerRegistration {
    id: HandlerId,
    actions: InputActions,
}

impl HandlerRegistration {
    /// Subscribe to `actions`
    pub fn new(actions: InputActions) -> Self {
        let registration = Self {
            id: HandlerId::next(),
            actions,
        };
        crate::clip_debug!(
            "installed pointer handler {} for {:?}",
            registration.id.get(),
            actions
        );
        registration
    }

    /// Registration id
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Subscribed actions
    pub fn actions(&self) -> InputActions {
        self.actions
    }

    /// Whether `event` is delivered to this handler
    pub fn accepts(&self, event: &PointerEvent) -> bool {
        self.actions.contains(event.action())
    }
}

impl Drop for HandlerRegistration {
    fn drop(&mut self) {
        crate::clip_debug!("released pointer handler {}", self.id.get());
    }
}
