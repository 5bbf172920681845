//! Reference perspective camera
//!
//! Hosts with their own renderer answer projection queries through
//! [`SceneView`](crate::scene::SceneView) directly. This camera gives headless
//! hosts and tests the same math in one place: canvas coordinates have their
//! origin at the top-left corner with `y` growing downward.

use glam::{DMat4, DVec2, DVec3};

use crate::types::Ray;

/// Perspective camera looking along `direction`
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Eye position in world space
    pub position: DVec3,
    /// Unit view direction
    pub direction: DVec3,
    /// Approximate up vector
    pub up: DVec3,
    /// Vertical field of view in radians
    pub fov_y: f64,
    /// Canvas size in pixels
    pub viewport: DVec2,
    /// Near plane distance
    pub near: f64,
    /// Far plane distance
    pub far: f64,
}

impl PerspectiveCamera {
    /// Create a camera looking from `position` toward `target`
    pub fn look_at(position: DVec3, target: DVec3, up: DVec3, viewport: DVec2) -> Self {
        Self {
            position,
            direction: (target - position).normalize(),
            up,
            fov_y: std::f64::consts::FRAC_PI_3,
            viewport,
            near: 0.1,
            far: 1.0e8,
        }
    }

    /// Set the vertical field of view (radians)
    pub fn with_fov_y(mut self, fov_y: f64) -> Self {
        self.fov_y = fov_y;
        self
    }

    /// Set the clip range
    pub fn with_clip_range(mut self, near: f64, far: f64) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f64 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.position + self.direction, self.up)
    }

    /// View-to-clip matrix
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov_y, self.aspect_ratio(), self.near, self.far)
    }

    /// Project a world point to canvas pixels; `None` behind the eye
    pub fn world_to_canvas(&self, point: DVec3) -> Option<DVec2> {
        let view = self.view_matrix().transform_point3(point);
        // Right-handed view space looks down -Z
        if -view.z <= self.near * 0.5 {
            return None;
        }
        let clip = self.projection_matrix() * view.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let canvas = DVec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        );
        canvas.is_finite().then_some(canvas)
    }

    /// Ray from the eye through a canvas position
    pub fn pick_ray(&self, position: DVec2) -> Option<Ray> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        let ndc_x = position.x / self.viewport.x * 2.0 - 1.0;
        let ndc_y = 1.0 - position.y / self.viewport.y * 2.0;
        let tan_half = (self.fov_y * 0.5).tan();
        let view_direction = DVec3::new(
            ndc_x * tan_half * self.aspect_ratio(),
            ndc_y * tan_half,
            -1.0,
        );
        let world_direction = self
            .view_matrix()
            .inverse()
            .transform_vector3(view_direction);
        Some(Ray::new(self.position, world_direction))
    }
}
