//! Shared scene fixtures for unit tests

use glam::{DVec2, DVec3};

use crate::camera::PerspectiveCamera;
use crate::headless::HeadlessScene;

/// Surface point on the equator at the prime meridian
///
/// Its east-north-up frame maps east, north and up to world `+Y`, `+Z`, `+X`.
pub const EQUATOR: DVec3 = DVec3::new(6_378_137.0, 0.0, 0.0);

pub const VIEWPORT: DVec2 = DVec2::new(1000.0, 1000.0);

/// Camera 100 m south of [`EQUATOR`] looking north, 90 degree fov
pub fn side_view_scene() -> HeadlessScene {
    let camera = PerspectiveCamera::look_at(
        EQUATOR - DVec3::Z * 100.0,
        EQUATOR,
        DVec3::X,
        VIEWPORT,
    )
    .with_fov_y(std::f64::consts::FRAC_PI_2);
    HeadlessScene::new(camera)
}

/// Camera 150 m up and 150 m south of [`EQUATOR`] looking down at it
pub fn oblique_scene() -> HeadlessScene {
    let camera = PerspectiveCamera::look_at(
        EQUATOR + DVec3::X * 150.0 - DVec3::Z * 150.0,
        EQUATOR,
        DVec3::X,
        VIEWPORT,
    )
    .with_fov_y(std::f64::consts::FRAC_PI_2);
    HeadlessScene::new(camera)
}
