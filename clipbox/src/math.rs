//! Geodesy helpers: reference ellipsoid, east-north-up frames and globe picking

use glam::{DMat4, DVec3, DVec4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Ray;

/// Squared length below which a position is treated as the ellipsoid centre
const CENTER_EPSILON: f64 = 1e-14;

/// An axis-aligned ellipsoid centred at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ellipsoid {
    radii: DVec3,
}

impl Ellipsoid {
    /// The WGS84 ellipsoid
    pub const WGS84: Ellipsoid = Ellipsoid {
        radii: DVec3::new(6_378_137.0, 6_378_137.0, 6_356_752.314_245_179),
    };

    /// A sphere of the given radius
    pub const fn sphere(radius: f64) -> Self {
        Self {
            radii: DVec3::splat(radius),
        }
    }

    /// Create an ellipsoid from its three radii
    pub const fn new(radii: DVec3) -> Self {
        Self { radii }
    }

    /// Radii along X, Y and Z
    pub fn radii(&self) -> DVec3 {
        self.radii
    }

    /// Outward surface normal of the ellipsoid at (or above) `position`
    pub fn geodetic_surface_normal(&self, position: DVec3) -> DVec3 {
        (position / (self.radii * self.radii)).normalize_or_zero()
    }

    /// Nearest forward intersection of `ray` with the ellipsoid surface
    pub fn intersect_ray(&self, ray: &Ray) -> Option<DVec3> {
        // Solve in the unit-sphere frame
        let origin = ray.origin / self.radii;
        let direction = ray.direction / self.radii;

        let a = direction.dot(direction);
        if a <= f64::EPSILON {
            return None;
        }
        let b = 2.0 * origin.dot(direction);
        let c = origin.dot(origin) - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_discriminant = discriminant.sqrt();
        // Numerically stable root pair
        let q = -0.5 * (b + b.signum() * sqrt_discriminant);
        let (t0, t1) = {
            let r0 = q / a;
            let r1 = if q != 0.0 { c / q } else { r0 };
            (r0.min(r1), r0.max(r1))
        };

        let t = if t0 >= 0.0 {
            t0
        } else if t1 >= 0.0 {
            t1
        } else {
            return None;
        };
        Some(ray.point_at(t))
    }

    /// Local east-north-up frame at `origin`, as a local-to-fixed transform
    ///
    /// Columns are east, north, up and the origin itself. At the poles, where
    /// east is undefined, east is `+Y` and north points along `-X` scaled by
    /// the sign of the pole.
    pub fn east_north_up_to_fixed_frame(&self, origin: DVec3) -> DMat4 {
        let (east, north, up) = if origin.x.abs() < f64::EPSILON && origin.y.abs() < f64::EPSILON
        {
            let sign = if origin.z < 0.0 { -1.0 } else { 1.0 };
            let east = DVec3::Y;
            let north = DVec3::new(-sign, 0.0, 0.0);
            let up = if origin.length_squared() < CENTER_EPSILON {
                DVec3::Z
            } else {
                east.cross(north)
            };
            (east, north, up)
        } else {
            let up = self.geodetic_surface_normal(origin);
            let east = DVec3::new(-origin.y, origin.x, 0.0).normalize();
            let north = up.cross(east);
            (east, north, up)
        };

        DMat4::from_cols(
            east.extend(0.0),
            north.extend(0.0),
            up.extend(0.0),
            DVec4::new(origin.x, origin.y, origin.z, 1.0),
        )
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

/// East-north-up frame on the WGS84 ellipsoid
pub fn east_north_up_to_fixed_frame(origin: DVec3) -> DMat4 {
    Ellipsoid::WGS84.east_north_up_to_fixed_frame(origin)
}

/// Check that every element of a matrix is finite
pub fn is_matrix_finite(matrix: &DMat4) -> bool {
    matrix.to_cols_array().iter().all(|v| v.is_finite())
}
