//! Screen projection of plane normals
//!
//! Plane normals live in the box's local frame. Dragging reasons about them in
//! canvas space, so a normal is first lifted into a world ray using the
//! east-north-up frame at its anchor and then both ends of a sampled segment
//! are projected to the canvas.

use glam::{DVec2, DVec3};

use crate::scene::SceneView;
use crate::types::{ClippingPlane, Ray};

/// World-space ray starting at `anchor` along the plane's local normal
pub fn plane_ray(scene: &dyn SceneView, plane: &ClippingPlane, anchor: DVec3) -> Ray {
    let frame = scene.ellipsoid().east_north_up_to_fixed_frame(anchor);
    let direction = frame.transform_vector3(plane.normal);
    Ray::new(anchor, direction)
}

/// Canvas-space vector spanned by `far_distance` metres of the plane normal
///
/// Returns `None` when either end of the segment cannot be projected, which
/// callers treat as "no drag axis this frame".
pub fn project_normal_to_screen(
    scene: &dyn SceneView,
    plane: &ClippingPlane,
    anchor: DVec3,
    far_distance: f64,
) -> Option<DVec2> {
    let ray = plane_ray(scene, plane, anchor);
    let near = scene.world_to_canvas(ray.point_at(0.0));
    let far = scene.world_to_canvas(ray.point_at(far_distance));
    match (near, far) {
        (Some(near), Some(far)) => Some(far - near),
        _ => {
            crate::clip_trace!(
                "plane normal {:?} at {:?} does not project to the canvas",
                plane.normal,
                anchor
            );
            None
        }
    }
}
