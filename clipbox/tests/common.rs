#![allow(dead_code)]

use clipbox::{
    BoundingSphere, ClippingBoxEditor, ClippingConfig, ClippingSettings, HeadlessScene,
    PerspectiveCamera, east_north_up_to_fixed_frame,
};
use glam::{DVec2, DVec3};

/// Point on the equator at the prime meridian; east, north and up are world
/// `+Y`, `+Z` and `+X` there.
pub const EQUATOR: DVec3 = DVec3::new(6_378_137.0, 0.0, 0.0);

pub const VIEWPORT: DVec2 = DVec2::new(1000.0, 1000.0);

/// Radius of the model the box is sized around
pub const MODEL_RADIUS: f64 = 20.0;

/// Camera 100 m south of the anchor looking north with a 90 degree fov
///
/// One metre at the anchor's depth covers 5 px.
pub fn side_view_scene() -> HeadlessScene {
    let camera =
        PerspectiveCamera::look_at(EQUATOR - DVec3::Z * 100.0, EQUATOR, DVec3::X, VIEWPORT)
            .with_fov_y(std::f64::consts::FRAC_PI_2);
    HeadlessScene::new(camera)
}

/// A box editor at the anchor, active and with clipping on
///
/// The box is 10 m east-west, 15 m north-south and 30 m tall.
pub fn active_box_editor(scene: &mut HeadlessScene) -> ClippingBoxEditor {
    let mut editor = ClippingBoxEditor::new(
        east_north_up_to_fixed_frame(EQUATOR),
        &BoundingSphere::new(EQUATOR, MODEL_RADIUS),
        ClippingSettings {
            enabled: true,
            show_editor: true,
        },
        ClippingConfig::default(),
    )
    .expect("valid model bounds");
    editor.activate(scene);
    editor
}
