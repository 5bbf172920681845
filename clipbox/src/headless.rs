//! A renderer-free [`SceneView`]
//!
//! `HeadlessScene` answers projection queries with a [`PerspectiveCamera`],
//! globe picks with an [`Ellipsoid`], and entity picks with circular canvas
//! targets registered by the host. It drives the editors in tests and in tools
//! that replay recorded pointer input without a renderer.

use glam::{DVec2, DVec3};

use crate::camera::PerspectiveCamera;
use crate::math::Ellipsoid;
use crate::scene::SceneView;
use crate::types::{EntityId, Ray};

/// A circular pick region on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickTarget {
    /// Entity reported when the region is hit
    pub entity: EntityId,
    /// Centre in canvas pixels
    pub center: DVec2,
    /// Hit radius in pixels
    pub radius: f64,
}

/// Headless scene backed by a reference camera
#[derive(Debug, Clone)]
pub struct HeadlessScene {
    camera: PerspectiveCamera,
    ellipsoid: Ellipsoid,
    targets: Vec<PickTarget>,
    camera_input_enabled: bool,
    camera_input_changes: usize,
}

impl HeadlessScene {
    /// Create a scene viewed through `camera` on the WGS84 globe
    pub fn new(camera: PerspectiveCamera) -> Self {
        Self {
            camera,
            ellipsoid: Ellipsoid::WGS84,
            targets: Vec::new(),
            camera_input_enabled: true,
            camera_input_changes: 0,
        }
    }

    /// Use a different globe
    pub fn with_ellipsoid(mut self, ellipsoid: Ellipsoid) -> Self {
        self.ellipsoid = ellipsoid;
        self
    }

    /// The camera
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Replace the camera
    pub fn set_camera(&mut self, camera: PerspectiveCamera) {
        self.camera = camera;
    }

    /// Register a pick region; later regions win where regions overlap
    pub fn add_target(&mut self, entity: EntityId, center: DVec2, radius: f64) {
        self.targets.push(PickTarget {
            entity,
            center,
            radius,
        });
    }

    /// Register a pick region around the projection of a world point
    ///
    /// Returns the canvas centre, or `None` if the point is not visible.
    pub fn add_world_target(&mut self, entity: EntityId, point: DVec3, radius: f64) -> Option<DVec2> {
        let center = self.camera.world_to_canvas(point)?;
        self.add_target(entity, center, radius);
        Some(center)
    }

    /// Remove every pick region
    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    /// Registered pick regions
    pub fn targets(&self) -> &[PickTarget] {
        &self.targets
    }

    /// How many times camera input was switched
    pub fn camera_input_changes(&self) -> usize {
        self.camera_input_changes
    }
}

impl SceneView for HeadlessScene {
    fn pick(&self, position: DVec2) -> Option<EntityId> {
        self.targets
            .iter()
            .rev()
            .find(|target| target.center.distance(position) <= target.radius)
            .map(|target| target.entity)
    }

    fn world_to_canvas(&self, point: DVec3) -> Option<DVec2> {
        self.camera.world_to_canvas(point)
    }

    fn camera_direction(&self) -> DVec3 {
        self.camera.direction
    }

    fn pick_ray(&self, position: DVec2) -> Option<Ray> {
        self.camera.pick_ray(position)
    }

    fn pick_globe(&self, ray: &Ray) -> Option<DVec3> {
        self.ellipsoid.intersect_ray(ray)
    }

    fn camera_input_enabled(&self) -> bool {
        self.camera_input_enabled
    }

    fn set_camera_input_enabled(&mut self, enabled: bool) {
        if self.camera_input_enabled != enabled {
            self.camera_input_changes += 1;
        }
        self.camera_input_enabled = enabled;
    }

    fn ellipsoid(&self) -> Ellipsoid {
        self.ellipsoid
    }
}
