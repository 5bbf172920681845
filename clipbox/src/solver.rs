//! Move-amount solver
//!
//! Turns a pointer movement on the canvas into a signed world displacement
//! along a plane normal. The canvas direction of the normal tells us which
//! part of the movement counts; the canvas length of a sampled segment tells
//! us how many metres a pixel is worth at the anchor's depth.

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::projection::{plane_ray, project_normal_to_screen};
use crate::scene::SceneView;
use crate::types::{ClippingPlane, PointerMovement};

/// Projected axes shorter than this many pixels are treated as degenerate
const MIN_PIXEL_LENGTH: f64 = 1e-9;

/// Tuning for the move-amount solver
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SolverConfig {
    /// `k` in the `cos(k * dot(camera, normal))` foreshortening damping
    pub foreshortening_coefficient: f64,
    /// Lower bound for the projection sampling distance, in metres
    pub min_sampling_distance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            foreshortening_coefficient: std::f64::consts::FRAC_PI_2,
            min_sampling_distance: 1e-3,
        }
    }
}

impl SolverConfig {
    /// Set the foreshortening coefficient
    pub fn with_foreshortening_coefficient(mut self, coefficient: f64) -> Self {
        self.foreshortening_coefficient = coefficient;
        self
    }

    /// Set the minimum sampling distance
    pub fn with_min_sampling_distance(mut self, distance: f64) -> Self {
        self.min_sampling_distance = distance;
        self
    }

    /// Damping applied for a given camera/normal alignment
    pub fn foreshortening_correction(&self, camera_dot: f64) -> f64 {
        (self.foreshortening_coefficient * camera_dot).cos()
    }

    /// Distance along the normal used to measure the projected axis
    pub fn sampling_distance(&self, axis_dimension: f64) -> f64 {
        if axis_dimension.is_finite() {
            axis_dimension.max(self.min_sampling_distance)
        } else {
            self.min_sampling_distance
        }
    }
}

/// Signed displacement along `plane`'s normal for a pointer movement
///
/// `axis_dimension` picks the length of the sampled segment; it does not
/// scale the result. Any projection failure yields `0.0`.
pub fn compute_move_amount(
    scene: &dyn SceneView,
    plane: &ClippingPlane,
    anchor: DVec3,
    movement: PointerMovement,
    axis_dimension: f64,
    config: &SolverConfig,
) -> f64 {
    let sampling = config.sampling_distance(axis_dimension);
    let Some(plane_vector) = project_normal_to_screen(scene, plane, anchor, sampling) else {
        return 0.0;
    };

    let pixel_length = plane_vector.length();
    if !pixel_length.is_finite() || pixel_length < MIN_PIXEL_LENGTH {
        crate::clip_trace!("plane normal {:?} is edge-on to the camera", plane.normal);
        return 0.0;
    }
    let unit_direction = plane_vector / pixel_length;
    let pixel_amount = movement.screen_delta().dot(unit_direction);

    let camera_dot = scene
        .camera_direction()
        .dot(plane_ray(scene, plane, anchor).direction);
    let correction = config.foreshortening_correction(camera_dot);

    let amount = pixel_amount * correction * sampling / pixel_length;
    if amount.is_finite() { amount } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{EQUATOR, side_view_scene};
    use approx::assert_relative_eq;
    use glam::DVec2;

    fn drag(start: [f64; 2], end: [f64; 2]) -> PointerMovement {
        PointerMovement::new(DVec2::from(start), DVec2::from(end))
    }

    #[test]
    fn test_upward_drag_on_bottom_face() {
        let scene = side_view_scene();
        let plane = ClippingPlane::new(DVec3::Z, 0.5);
        // 50 px upward at 100 m with a 90 degree fov is 10 m
        let amount = compute_move_amount(
            &scene,
            &plane,
            EQUATOR,
            drag([500.0, 500.0], [500.0, 450.0]),
            10.0,
            &SolverConfig::default(),
        );
        assert_relative_eq!(amount, -10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sampling_distance_does_not_scale_result() {
        let scene = side_view_scene();
        let plane = ClippingPlane::new(-DVec3::Z, 0.5);
        let movement = drag([500.0, 500.0], [500.0, 520.0]);
        let config = SolverConfig::default();
        let short = compute_move_amount(&scene, &plane, EQUATOR, movement, 2.0, &config);
        let long = compute_move_amount(&scene, &plane, EQUATOR, movement, 40.0, &config);
        assert_relative_eq!(short, long, epsilon = 1e-6);
        assert_relative_eq!(short, -4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_perpendicular_movement_is_ignored() {
        let scene = side_view_scene();
        let plane = ClippingPlane::new(DVec3::Z, 0.5);
        let amount = compute_move_amount(
            &scene,
            &plane,
            EQUATOR,
            drag([500.0, 500.0], [560.0, 500.0]),
            10.0,
            &SolverConfig::default(),
        );
        assert_relative_eq!(amount, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normal_along_view_direction_is_damped_to_zero() {
        let scene = side_view_scene();
        // Local north is world +Z, the camera's view direction
        let plane = ClippingPlane::new(DVec3::Y, 0.5);
        let amount = compute_move_amount(
            &scene,
            &plane,
            EQUATOR,
            drag([500.0, 500.0], [530.0, 470.0]),
            10.0,
            &SolverConfig::default(),
        );
        assert!(amount.is_finite());
        assert!(amount.abs() < 1e-3);
    }

    #[test]
    fn test_projection_failure_yields_zero() {
        let scene = side_view_scene();
        let plane = ClippingPlane::new(-DVec3::Y, 0.5);
        let amount = compute_move_amount(
            &scene,
            &plane,
            EQUATOR,
            drag([500.0, 500.0], [400.0, 400.0]),
            500.0,
            &SolverConfig::default(),
        );
        assert_eq!(amount, 0.0);
    }

    #[test]
    fn test_collapsed_axis_still_moves() {
        let scene = side_view_scene();
        let plane = ClippingPlane::new(DVec3::Z, 0.5);
        let amount = compute_move_amount(
            &scene,
            &plane,
            EQUATOR,
            drag([500.0, 500.0], [500.0, 450.0]),
            0.0,
            &SolverConfig::default(),
        );
        assert_relative_eq!(amount, -10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_custom_coefficient_changes_damping() {
        let config = SolverConfig::default().with_foreshortening_coefficient(0.0);
        assert_eq!(config.foreshortening_correction(1.0), 1.0);
        assert_relative_eq!(
            SolverConfig::default().foreshortening_correction(1.0),
            0.0,
            epsilon = 1e-12
        );
    }
}
