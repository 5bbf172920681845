//! # clipbox - interactive clipping volumes for globe-anchored models
//!
//! An oriented clipping box that users resize and move directly in the 3D
//! view. Pointer input drives a pick/hover/drag controller; picked faces slide
//! the box, picked corners scale it from the dragged corner. Screen-space
//! pointer deltas are turned into world displacements by projecting the face
//! normal through the camera.
//!
//! ## Features
//!
//! - Pick, hover and drag state machine with camera-navigation hand-off
//! - Face translation along the normal or across the globe surface
//! - Corner scaling with the opposite faces held fixed
//! - Alternate editor that slides individual clipping planes
//! - Renderer-agnostic proxies and declarative UI toggles
//!
//! ## Quick Start
//!
//! ```no_run
//! use clipbox::*;
//! use glam::{DMat4, DVec2, DVec3};
//!
//! let center = DVec3::new(6_378_137.0, 0.0, 0.0);
//! let camera = PerspectiveCamera::look_at(
//!     center + DVec3::X * 200.0,
//!     center,
//!     DVec3::Z,
//!     DVec2::new(1280.0, 720.0),
//! );
//! let mut scene = HeadlessScene::new(camera);
//!
//! let mut editor = ClippingBoxEditor::new(
//!     east_north_up_to_fixed_frame(center),
//!     &BoundingSphere::new(center, 25.0),
//!     ClippingSettings { enabled: true, show_editor: true },
//!     ClippingConfig::default(),
//! )?;
//! editor.activate(&mut scene);
//!
//! editor.handle_pointer_event(&mut scene, PointerEvent::Move { position: DVec2::new(640.0, 360.0) });
//! let collection = editor.clipping_plane_collection();
//! assert_eq!(collection.planes.len(), 6);
//! # Ok::<(), ClipError>(())
//! ```

#![deny(rust_2018_idioms)]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod camera;
pub mod config;
pub mod controller;
pub mod dimensions;
pub mod editor;
pub mod error;
pub mod headless;
pub mod input;
pub mod logging;
pub mod math;
pub mod memo;
pub mod projection;
pub mod scene;
pub mod solver;
pub mod style;
pub mod types;
pub mod volume;

#[cfg(test)]
mod test_util;

pub use camera::PerspectiveCamera;
pub use config::ClippingConfig;
pub use controller::{
    Controller, ControllerEvent, ControllerEventKind, DragPlane, InteractionState,
    TrackedEntities,
};
pub use dimensions::{SelectableDimension, SelectableDimensionGroup};
pub use editor::{
    BoxHandle, ClippingBoxEditor, ClippingPlanesEditor, ClippingSettings, CursorStyle,
    PlaneCollectionDefinition, PlaneDefinition, PlaneEntity, PointEntity, RenderedEntities,
};
pub use error::{ClipError, ClipResult};
pub use headless::HeadlessScene;
pub use input::{HandlerRegistration, InputActions, PointerEvent};
pub use math::{Ellipsoid, east_north_up_to_fixed_frame};
pub use scene::SceneView;
pub use solver::{SolverConfig, compute_move_amount};
pub use style::{Color, EditorStyle, Highlight};
pub use types::{BoundingSphere, ClippingPlane, EntityId, PointerMovement, Ray};
pub use volume::{ClippingPlaneCollection, ClippingVolume, Corner, Face};
