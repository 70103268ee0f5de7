//! Oriented box collision shape
//!
//! A [`CollidableBox`] is an [`OrientedTransform`] plus half extents measured
//! along its own right/up/forward axes. The box is always tested in world space
//! directly from its current basis; nothing is cached between tests.

use crate::foundation::math::{dot, Mat3, Mat4, Vec3};
use crate::foundation::transform::OrientedTransform;

/// Default half extent on every axis (a unit cube)
pub const DEFAULT_HALF_EXTENT: f32 = 0.5;

/// What a box represents for collision purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    /// Solid cuboid that contains points and overlaps other cuboids
    #[default]
    Cuboid,
    /// Placeholder with no volume; never contains or overlaps anything
    Empty,
}

/// Oriented box that can be tested against points and other boxes
#[derive(Debug, Clone, PartialEq)]
pub struct CollidableBox {
    transform: OrientedTransform,
    half_extents: Vec3,
    kind: ShapeKind,
}

impl Default for CollidableBox {
    fn default() -> Self {
        Self {
            transform: OrientedTransform::default(),
            half_extents: Vec3::new(DEFAULT_HALF_EXTENT, DEFAULT_HALF_EXTENT, DEFAULT_HALF_EXTENT),
            kind: ShapeKind::Cuboid,
        }
    }
}

impl CollidableBox {
    /// Create a unit cuboid at the origin in the canonical pose
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.translate_to(position);
        self
    }

    /// Builder pattern: Set full dimensions along right/up/forward
    pub fn with_scale(mut self, size: Vec3) -> Self {
        self.set_scale(size);
        self
    }

    /// Builder pattern: Set shape kind
    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Underlying transform
    pub fn transform(&self) -> &OrientedTransform {
        &self.transform
    }

    /// Mutable access to the underlying transform
    pub fn transform_mut(&mut self) -> &mut OrientedTransform {
        &mut self.transform
    }

    /// World position of the box centre
    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    /// Half extents along right/up/forward
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Shape kind
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Set shape kind
    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = kind;
    }

    /// Set half extents directly
    pub fn set_half_extents(&mut self, half_extents: Vec3) {
        self.half_extents = half_extents.abs();
    }

    /// Set the full dimensions of the box
    pub fn set_scale(&mut self, size: Vec3) {
        self.set_half_extents(size * 0.5);
    }

    /// Set the half extent along the box's right axis
    pub fn set_half_extent_right(&mut self, half_extent: f32) {
        self.half_extents.x = half_extent.abs();
    }

    /// Set the half extent along the box's up axis
    pub fn set_half_extent_up(&mut self, half_extent: f32) {
        self.half_extents.y = half_extent.abs();
    }

    /// Set the half extent along the box's forward axis
    pub fn set_half_extent_forward(&mut self, half_extent: f32) {
        self.half_extents.z = half_extent.abs();
    }

    /// The box's own axes paired with the half extent along each
    fn axes_with_extents(&self) -> [(Vec3, f32); 3] {
        [
            (self.transform.right(), self.half_extents.x),
            (self.transform.up(), self.half_extents.y),
            (self.transform.forward(), self.half_extents.z),
        ]
    }

    /// Whether `point` lies inside the box
    ///
    /// Each axis contributes two face planes. The point must be strictly before
    /// the positive face and on or after the negative face, so a point exactly on
    /// a positive face is outside while one on a negative face is inside.
    pub fn is_point_inside(&self, point: &Vec3) -> bool {
        if self.kind != ShapeKind::Cuboid {
            return false;
        }

        let center = self.transform.position();
        self.axes_with_extents().iter().all(|(axis, extent)| {
            let positive_face = center + axis * *extent;
            let negative_face = center - axis * *extent;

            !is_on_or_after_plane(point, &positive_face, axis)
                && is_on_or_after_plane(point, &negative_face, axis)
        })
    }

    /// Whether this box overlaps `other`
    ///
    /// Projects both boxes onto this box's three axes and then the other box's
    /// three axes; they overlap only if the projections intersect on all six.
    /// The nine edge-edge cross axes of a full separating-axis test are not
    /// checked, so some rotated, non-touching pairs report an overlap.
    pub fn is_shape_inside(&self, other: &Self) -> bool {
        if self.kind != ShapeKind::Cuboid || other.kind != ShapeKind::Cuboid {
            return false;
        }

        let axes = [
            self.transform.right(),
            self.transform.up(),
            self.transform.forward(),
            other.transform.right(),
            other.transform.up(),
            other.transform.forward(),
        ];

        axes.iter().all(|axis| {
            let (this_min, this_max) = self.axis_min_max(axis);
            let (other_min, other_max) = other.axis_min_max(axis);
            this_min < other_max && other_min < this_max
        })
    }

    /// Interval covered by the box's eight corners projected onto `axis`
    pub fn axis_min_max(&self, axis: &Vec3) -> (f32, f32) {
        self.corners()
            .iter()
            .map(|corner| dot(corner, axis))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), projection| {
                (min.min(projection), max.max(projection))
            })
    }

    /// World positions of the eight corners
    pub fn corners(&self) -> [Vec3; 8] {
        let center = self.transform.position();
        let right = self.transform.right() * self.half_extents.x;
        let up = self.transform.up() * self.half_extents.y;
        let forward = self.transform.forward() * self.half_extents.z;

        [
            center - right - up - forward,
            center + right - up - forward,
            center - right + up - forward,
            center + right + up - forward,
            center - right - up + forward,
            center + right - up + forward,
            center - right + up + forward,
            center + right + up + forward,
        ]
    }

    /// Model matrix mapping a unit cube centred on the origin onto this box
    pub fn model_matrix(&self) -> Mat4 {
        let basis = Mat3::from_columns(&[
            self.transform.right(),
            self.transform.up(),
            self.transform.forward(),
        ]);

        Mat4::new_translation(&self.transform.position())
            * basis.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&(self.half_extents * 2.0))
    }
}

/// Plane side test: `point` lies on the plane or on the side `normal` points to
fn is_on_or_after_plane(point: &Vec3, plane_point: &Vec3, normal: &Vec3) -> bool {
    dot(&(point - plane_point), normal) >= 0.0
}
