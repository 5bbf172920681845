//! The clipping volume model
//!
//! A box is six canonical planes and eight canonical corners in a unit-cube
//! local frame, placed in the world by two transforms: the read-only origin
//! transform owned by the clipped item, and the mutable box transform (scale
//! then translate) that face and corner drags edit. Planes, corners and their
//! adjacency never change; only the box transform does.

use glam::{DMat4, DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ClippingConfig;
use crate::error::{ClipError, ClipResult};
use crate::scene::{SceneView, screen_to_world};
use crate::solver::{SolverConfig, compute_move_amount};
use crate::style::Color;
use crate::types::{Axis, BoundingSphere, ClippingPlane, PointerMovement, matrix_translation};

/// Canonical planes in face order: `+Z, -Z, +Y, -Y, +X, -X` normals
pub const CANONICAL_PLANES: [ClippingPlane; 6] = [
    ClippingPlane::new(DVec3::Z, 0.5),
    ClippingPlane::new(DVec3::NEG_Z, 0.5),
    ClippingPlane::new(DVec3::Y, 0.5),
    ClippingPlane::new(DVec3::NEG_Y, 0.5),
    ClippingPlane::new(DVec3::X, 0.5),
    ClippingPlane::new(DVec3::NEG_X, 0.5),
];

/// Canonical corners of the unit cube
pub const CANONICAL_CORNERS: [DVec3; 8] = [
    DVec3::new(-0.5, -0.5, -0.5),
    DVec3::new(-0.5, 0.5, -0.5),
    DVec3::new(0.5, -0.5, -0.5),
    DVec3::new(0.5, 0.5, -0.5),
    DVec3::new(-0.5, -0.5, 0.5),
    DVec3::new(-0.5, 0.5, 0.5),
    DVec3::new(0.5, -0.5, 0.5),
    DVec3::new(0.5, 0.5, 0.5),
];

/// One of the six faces of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Face(u8);

impl Face {
    /// All faces in canonical order
    pub const ALL: [Face; 6] = [Face(0), Face(1), Face(2), Face(3), Face(4), Face(5)];

    /// Face by canonical index
    pub fn from_index(index: usize) -> Option<Face> {
        Self::ALL.get(index).copied()
    }

    /// The face whose plane normal is `axis` (`positive`) or `-axis`
    pub fn from_normal(axis: Axis, positive: bool) -> Face {
        let base = match axis {
            Axis::Z => 0,
            Axis::Y => 2,
            Axis::X => 4,
        };
        Face(base + u8::from(!positive))
    }

    /// Canonical index
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Canonical unit-cube plane of this face
    pub fn plane(self) -> ClippingPlane {
        CANONICAL_PLANES[self.index()]
    }

    /// Axis of the face normal
    pub fn axis(self) -> Axis {
        match self.0 / 2 {
            0 => Axis::Z,
            1 => Axis::Y,
            _ => Axis::X,
        }
    }

    /// Whether dragging this face moves the box vertically
    pub fn is_vertical(self) -> bool {
        self.axis().is_vertical()
    }
}

/// One of the eight corners of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Corner(u8);

impl Corner {
    /// All corners in canonical order
    pub const ALL: [Corner; 8] = [
        Corner(0),
        Corner(1),
        Corner(2),
        Corner(3),
        Corner(4),
        Corner(5),
        Corner(6),
        Corner(7),
    ];

    /// Corner by canonical index
    pub fn from_index(index: usize) -> Option<Corner> {
        Self::ALL.get(index).copied()
    }

    /// Canonical index
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Position in the unit-cube frame
    pub fn local_position(self) -> DVec3 {
        CANONICAL_CORNERS[self.index()]
    }

    /// The adjacent face on each of the X, Y and Z axes
    ///
    /// A corner on the positive side of an axis touches the face whose inward
    /// normal is negative along that axis.
    pub fn adjacent_faces(self) -> [Face; 3] {
        let position = self.local_position();
        Axis::ALL.map(|axis| Face::from_normal(axis, position[axis.index()] < 0.0))
    }
}

/// Planes with `dot(normal, corner) < 0`, ordered by normal axis X, Y, Z
pub fn corner_adjacency(corner: DVec3) -> Vec<Face> {
    let mut faces: Vec<Face> = Face::ALL
        .into_iter()
        .filter(|face| face.plane().normal.dot(corner) < 0.0)
        .collect();
    faces.sort_by_key(|face| face.axis().index());
    faces
}

/// Scale-then-translate transform of the box relative to its origin
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxTransform {
    /// Extent along each local axis
    pub scale: DVec3,
    /// Offset of the box centre in the origin frame
    pub translation: DVec3,
}

impl BoxTransform {
    /// Unit box at the origin
    pub const IDENTITY: BoxTransform = BoxTransform {
        scale: DVec3::ONE,
        translation: DVec3::ZERO,
    };

    /// Box with `scale` centred at the origin
    pub const fn from_scale(scale: DVec3) -> Self {
        Self {
            scale,
            translation: DVec3::ZERO,
        }
    }

    /// The transform as a matrix
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_translation(self.translation) * DMat4::from_scale(self.scale)
    }

    /// Pre-multiply by a translation in the origin frame
    pub fn pre_translate(&mut self, offset: DVec3) {
        self.translation += offset;
    }
}

impl Default for BoxTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Planes handed to the renderer, expressed in a shared model frame
///
/// Both editors give `model_matrix` relative to the clipped model's origin
/// frame. The renderer composes it with that origin to reach world space.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippingPlaneCollection {
    /// Planes in the plane frame
    pub planes: Vec<ClippingPlane>,
    /// Plane frame to model origin frame
    pub model_matrix: DMat4,
    /// Whether clipping is applied at all
    pub enabled: bool,
    /// Clip what is outside any plane (`true`) or outside all planes
    pub union_clipping_regions: bool,
    /// Color of the clipped edge, if drawn
    pub edge_color: Option<Color>,
    /// Width of the clipped edge
    pub edge_width: f32,
}

/// The box: origin transform, box transform and a revision counter
#[derive(Debug, Clone, PartialEq)]
pub struct ClippingVolume {
    origin: DMat4,
    transform: BoxTransform,
    revision: u64,
}

impl ClippingVolume {
    /// Create a box of `scale` centred on the origin transform
    pub fn new(origin: DMat4, scale: DVec3) -> Self {
        Self {
            origin,
            transform: BoxTransform::from_scale(scale.max(DVec3::ZERO)),
            revision: 0,
        }
    }

    /// Size a box around a model's bounding sphere
    pub fn from_bounding_sphere(
        origin: DMat4,
        sphere: &BoundingSphere,
        config: &ClippingConfig,
    ) -> ClipResult<Self> {
        if !sphere.is_valid() {
            return Err(ClipError::invalid_bounds(format!(
                "bounding sphere radius {} at {:?}",
                sphere.radius, sphere.center
            )));
        }
        config.validate()?;
        let size = sphere.radius * config.box_size_factor;
        let scale = DVec3::from(config.box_aspect) * size;
        crate::clip_debug!("sizing clipping box {:?} for radius {}", scale, sphere.radius);
        Ok(Self::new(origin, scale))
    }

    /// Origin transform
    pub fn origin(&self) -> DMat4 {
        self.origin
    }

    /// Replace the origin transform (the clipped item moved)
    pub fn set_origin(&mut self, origin: DMat4) {
        if origin != self.origin {
            self.origin = origin;
            self.bump();
        }
    }

    /// Box transform
    pub fn box_transform(&self) -> BoxTransform {
        self.transform
    }

    /// Replace the box transform, clamping negative scale to zero
    pub fn set_box_transform(&mut self, transform: BoxTransform) {
        self.transform = BoxTransform {
            scale: transform.scale.max(DVec3::ZERO),
            translation: transform.translation,
        };
        self.bump();
    }

    /// Counter bumped by every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Extent of the box along each local axis
    pub fn dimensions(&self) -> DVec3 {
        self.transform.scale
    }

    /// Box transform as a matrix
    pub fn model_matrix(&self) -> DMat4 {
        self.transform.to_matrix()
    }

    /// Local unit-cube to world transform
    pub fn world_matrix(&self) -> DMat4 {
        self.origin * self.model_matrix()
    }

    /// World position of the box centre
    pub fn position(&self) -> DVec3 {
        matrix_translation(&self.world_matrix())
    }

    /// The six canonical planes
    pub fn local_planes(&self) -> [ClippingPlane; 6] {
        CANONICAL_PLANES
    }

    /// Plane of `face` stretched by the current scale
    pub fn scaled_plane(&self, face: Face) -> ClippingPlane {
        face.plane().scaled(self.transform.scale)
    }

    /// Width and height of the quad drawn for `face`
    pub fn plane_dimensions(&self, face: Face) -> DVec2 {
        let scale = self.transform.scale;
        match face.axis() {
            Axis::X => DVec2::new(scale.y, scale.z),
            Axis::Y => DVec2::new(scale.x, scale.z),
            Axis::Z => DVec2::new(scale.x, scale.y),
        }
    }

    /// World position of `corner`
    pub fn corner_position(&self, corner: Corner) -> DVec3 {
        self.world_matrix().transform_point3(corner.local_position())
    }

    /// Move the box by `offset` in its origin frame
    pub fn translate(&mut self, offset: DVec3) {
        if offset == DVec3::ZERO || !offset.is_finite() {
            return;
        }
        self.transform.pre_translate(offset);
        self.bump();
    }

    /// Move the box along `face`'s normal; returns the applied offset
    ///
    /// The offset is `-amount * normal`, so a positive amount pushes the face
    /// outward.
    pub fn translate_face(&mut self, face: Face, amount: f64) -> DVec3 {
        let offset = face.plane().normal * -amount;
        self.translate(offset);
        offset
    }

    /// Move the box horizontally by the globe displacement under the pointer
    ///
    /// Both pointer positions are resolved on the globe and expressed in the
    /// east-north-up frame at the box centre; the vertical part of their
    /// difference is dropped. Does nothing when either position misses the
    /// globe.
    pub fn translate_horizontally(
        &mut self,
        scene: &dyn SceneView,
        previous: DVec2,
        current: DVec2,
    ) -> DVec3 {
        let (Some(previous_world), Some(current_world)) =
            (screen_to_world(scene, previous), screen_to_world(scene, current))
        else {
            crate::clip_trace!("horizontal drag missed the globe");
            return DVec3::ZERO;
        };

        let to_local = scene
            .ellipsoid()
            .east_north_up_to_fixed_frame(self.position())
            .inverse();
        let mut offset =
            to_local.transform_point3(current_world) - to_local.transform_point3(previous_world);
        offset.z = 0.0;

        self.translate(offset);
        offset
    }

    /// Apply a face drag: vertical faces slide by `amount`, other faces follow
    /// the globe under the pointer
    pub fn drag_face(
        &mut self,
        scene: &dyn SceneView,
        face: Face,
        amount: f64,
        movement: PointerMovement,
    ) -> DVec3 {
        if face.is_vertical() {
            self.translate_face(face, amount)
        } else {
            self.translate_horizontally(scene, movement.start, movement.end)
        }
    }

    /// Grow (or shrink) the box from `corner` by per-axis amounts
    ///
    /// Scale never drops below zero. The compensating translation uses the
    /// delta that was actually applied, so the faces opposite the corner stay
    /// put even when an axis clamps. Returns the applied scale delta.
    pub fn apply_corner_scale(&mut self, corner: Corner, amounts: DVec3) -> DVec3 {
        if !amounts.is_finite() {
            return DVec3::ZERO;
        }
        let old_scale = self.transform.scale;
        let requested = old_scale + amounts;
        let new_scale = requested.max(DVec3::ZERO);
        if new_scale != requested {
            crate::clip_debug!("clamped box scale {:?} to {:?}", requested, new_scale);
        }
        let delta = new_scale - old_scale;

        let mut compensation = DVec3::ZERO;
        for (axis, face) in Axis::ALL.into_iter().zip(corner.adjacent_faces()) {
            let i = axis.index();
            compensation[i] = -face.plane().normal[i] * delta[i] / 2.0;
        }

        self.transform.scale = new_scale;
        self.transform.pre_translate(compensation);
        self.bump();
        delta
    }

    /// Per-axis move amounts for a corner drag
    pub fn corner_move_amounts(
        &self,
        scene: &dyn SceneView,
        corner: Corner,
        movement: PointerMovement,
        solver: &SolverConfig,
    ) -> DVec3 {
        let anchor = self.position();
        let dimensions = self.dimensions();
        let mut amounts = DVec3::ZERO;
        for (axis, face) in Axis::ALL.into_iter().zip(corner.adjacent_faces()) {
            let i = axis.index();
            amounts[i] = compute_move_amount(
                scene,
                &self.scaled_plane(face),
                anchor,
                movement,
                dimensions[i],
                solver,
            );
        }
        amounts
    }

    /// Scale the box from `corner` following a pointer movement
    pub fn scale_from_corner(
        &mut self,
        scene: &dyn SceneView,
        corner: Corner,
        movement: PointerMovement,
        solver: &SolverConfig,
    ) -> DVec3 {
        let amounts = self.corner_move_amounts(scene, corner, movement, solver);
        self.apply_corner_scale(corner, amounts)
    }

    /// Planes for the renderer; the matrix is the box transform relative to
    /// the origin, not the world
    pub fn clipping_plane_collection(&self, enabled: bool) -> ClippingPlaneCollection {
        ClippingPlaneCollection {
            planes: CANONICAL_PLANES.to_vec(),
            model_matrix: self.model_matrix(),
            enabled,
            union_clipping_regions: true,
            edge_color: None,
            edge_width: 0.0,
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
