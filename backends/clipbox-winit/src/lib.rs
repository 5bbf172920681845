//! Winit backend for clipbox
//!
//! Translates winit window events into [`clipbox::PointerEvent`]s and editor
//! cursors into winit cursor icons.
//!
//! ```no_run
//! use clipbox_winit::{CursorCache, WinitPointerInput};
//! # fn on_event(
//! #     editor: &mut clipbox::ClippingBoxEditor,
//! #     scene: &mut clipbox::HeadlessScene,
//! #     window: &winit::window::Window,
//! #     event: &winit::event::WindowEvent,
//! # ) {
//! let mut input = WinitPointerInput::new();
//! let mut cursor = CursorCache::default();
//! if let Some(pointer) = input.handle_window_event(event) {
//!     editor.handle_pointer_event(scene, pointer);
//!     cursor.apply(window, editor.cursor());
//! }
//! # }
//! ```

#![deny(rust_2018_idioms)]

mod cursor;
mod events;

pub use cursor::{CursorCache, cursor_icon};
pub use events::WinitPointerInput;
