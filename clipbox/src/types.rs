//! Core data types shared by the projection math, the volume model and the controller

use glam::{DMat4, DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether a normal is parallel to an axis
pub const AXIS_EPSILON: f64 = 1e-6;

/// Local coordinate axis of the clipping box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Local X (east for an east-north-up origin)
    X,
    /// Local Y (north for an east-north-up origin)
    Y,
    /// Local Z, the vertical axis
    Z,
}

impl Axis {
    /// All axes in component order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the positive axis
    pub fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }

    /// Whether this is the box-local vertical axis
    pub fn is_vertical(self) -> bool {
        self == Axis::Z
    }
}

/// A clipping plane in Hessian normal form
///
/// Points `p` with `normal.dot(p) + distance == 0` lie on the plane, and the
/// normal points toward the side that is kept. The canonical plane with normal
/// `+X` and distance `0.5` therefore sits at `x = -0.5` and faces into the box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClippingPlane {
    /// Unit normal
    pub normal: DVec3,
    /// Signed distance from the origin along `-normal`
    pub distance: f64,
}

impl ClippingPlane {
    /// Create a plane from a normal and distance
    pub const fn new(normal: DVec3, distance: f64) -> Self {
        Self { normal, distance }
    }

    /// Signed distance of `point` from the plane (positive on the kept side)
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.distance
    }

    /// Closest point on the plane to the origin
    pub fn point_on_plane(&self) -> DVec3 {
        self.normal * -self.distance
    }

    /// Axis the normal is parallel to, if any
    pub fn normal_axis(&self) -> Option<Axis> {
        Axis::ALL
            .into_iter()
            .find(|axis| (self.normal.dot(axis.unit()).abs() - 1.0).abs() < AXIS_EPSILON)
    }

    /// Whether the plane faces along the box-local vertical axis
    pub fn is_vertical(&self) -> bool {
        self.normal_axis().is_some_and(Axis::is_vertical)
    }

    /// The same plane expressed in a frame stretched by `scale`
    ///
    /// Only axis-aligned planes are stretched exactly; any other plane keeps
    /// its normal and has its distance scaled by the mean stretch.
    pub fn scaled(&self, scale: DVec3) -> Self {
        let factor = match self.normal_axis() {
            Some(axis) => scale[axis.index()],
            None => (scale.x + scale.y + scale.z) / 3.0,
        };
        Self {
            normal: self.normal,
            distance: self.distance * factor,
        }
    }
}

/// A world-space ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: DVec3,
    /// Unit direction
    pub direction: DVec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn point_at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Bounding sphere of the clipped model
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingSphere {
    /// World-space centre
    pub center: DVec3,
    /// Radius in metres
    pub radius: f64,
}

impl BoundingSphere {
    /// Create a bounding sphere
    pub const fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Whether the sphere can size a clipping volume
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite() && self.radius > 0.0
    }
}

/// Identifier of a renderer-visible proxy entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Pointer movement between two canvas positions, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMovement {
    /// Previous pointer position
    pub start: DVec2,
    /// Current pointer position
    pub end: DVec2,
}

impl PointerMovement {
    /// Create a movement
    pub const fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Screen delta in the solver's convention (`start - end`)
    pub fn screen_delta(&self) -> DVec2 {
        self.start - self.end
    }
}

/// Translation component of an affine transform
pub fn matrix_translation(matrix: &DMat4) -> DVec3 {
    matrix.w_axis.truncate()
}
