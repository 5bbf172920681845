//! The renderer collaborator
//!
//! Everything the interaction core needs from the host renderer goes through
//! [`SceneView`]: picking, projection, the camera direction, globe picking and
//! the camera navigation switch.

use glam::{DVec2, DVec3};

use crate::math::Ellipsoid;
use crate::types::{EntityId, Ray};

/// Queries and switches provided by the host renderer
pub trait SceneView {
    /// Entity rendered at a canvas position, if any
    fn pick(&self, position: DVec2) -> Option<EntityId>;

    /// Canvas position of a world point; `None` when it cannot be projected
    fn world_to_canvas(&self, point: DVec3) -> Option<DVec2>;

    /// Unit view direction of the camera
    fn camera_direction(&self) -> DVec3;

    /// Ray from the camera through a canvas position
    fn pick_ray(&self, position: DVec2) -> Option<Ray>;

    /// Intersection of a ray with the globe or terrain
    fn pick_globe(&self, ray: &Ray) -> Option<DVec3>;

    /// Whether camera navigation currently reacts to pointer input
    fn camera_input_enabled(&self) -> bool;

    /// Enable or disable camera navigation input
    fn set_camera_input_enabled(&mut self, enabled: bool);

    /// Reference ellipsoid used for local east-north-up frames
    fn ellipsoid(&self) -> Ellipsoid {
        Ellipsoid::WGS84
    }
}

/// World position under a canvas position, resolved against the globe
pub fn screen_to_world(scene: &dyn SceneView, position: DVec2) -> Option<DVec3> {
    let ray = scene.pick_ray(position)?;
    scene.pick_globe(&ray)
}
