//! Oriented transform shared by every movable entity
//!
//! An [`OrientedTransform`] is a position plus an orthonormal right/up/forward
//! basis. Horizontal and vertical angles are derived from the basis after every
//! rotation rather than accumulated, so they never drift away from the geometry.
//!
//! Coordinate conventions:
//! - Y+ is world vertical
//! - Z+ is forward in the canonical pose, X+ is right
//! - A positive horizontal angle turns forward from Z+ towards X-
//! - A positive vertical angle tilts forward downwards

use crate::foundation::math::{
    self, elevation_of, heading_of, level_forward, level_right, rotation_about_axis,
    rotation_about_vertical, signed_side, Mat3, Vec3,
};

/// Position and orientation of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedTransform {
    position: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    angle_horizontal: f32,
    angle_vertical: f32,
}

impl Default for OrientedTransform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            right: math::unit_x(),
            up: math::unit_y(),
            forward: math::unit_z(),
            angle_horizontal: 0.0,
            angle_vertical: 0.0,
        }
    }
}

impl OrientedTransform {
    /// Create a transform in the canonical pose (origin, world-aligned basis)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Return to the canonical pose
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit forward vector (primary facing axis)
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Horizontal angle in radians, derived from `forward`
    pub fn angle_horizontal(&self) -> f32 {
        self.angle_horizontal
    }

    /// Vertical angle in radians, derived from `forward`
    pub fn angle_vertical(&self) -> f32 {
        self.angle_vertical
    }

    /// World-space offset of a displacement expressed in this transform's basis
    pub fn local_offset(&self, distance_right: f32, distance_up: f32, distance_forward: f32) -> Vec3 {
        self.right * distance_right + self.up * distance_up + self.forward * distance_forward
    }

    /// Move relative to the current facing
    pub fn move_local(&mut self, distance_right: f32, distance_up: f32, distance_forward: f32) {
        self.position += self.local_offset(distance_right, distance_up, distance_forward);
    }

    /// Move along world axes
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Jump to an absolute world position
    pub fn translate_to(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Rotate around the world vertical axis
    ///
    /// Returns the rotation matrix that was applied to the basis so that
    /// composing types can rotate their own vectors the same way.
    pub fn rotate_horizontal(&mut self, angle: f32) -> Mat3 {
        let rotation = rotation_about_vertical(angle);
        self.apply_rotation(&rotation);

        self.angle_horizontal = heading_of(&self.forward).unwrap_or(0.0);
        rotation
    }

    /// Tilt up or down around the level right axis
    ///
    /// The pivot axis is derived from the horizontal angle, not from `right`,
    /// so any roll the basis carries does not leak into vertical rotation.
    pub fn rotate_vertical(&mut self, angle: f32) -> Mat3 {
        let pivot = level_right(self.angle_horizontal);
        let level = level_forward(self.angle_horizontal);

        let rotation = rotation_about_axis(&pivot, angle);
        self.apply_rotation(&rotation);

        self.angle_vertical = math::angle_between(&level, &self.forward)
            .map(|between| between * -signed_side(&level, &self.forward, &self.right))
            .unwrap_or(0.0);
        rotation
    }

    /// Face the heading of `direction`, offset by `angle`
    ///
    /// Leaves the transform untouched when `direction` has no horizontal
    /// component.
    pub fn rotate_horizontal_from_vector(&mut self, angle: f32, direction: &Vec3) {
        if let Some(heading) = heading_of(direction) {
            self.set_angle_horizontal(heading + angle);
        }
    }

    /// Tilt to the elevation of `direction`, offset by `angle`
    pub fn rotate_vertical_from_vector(&mut self, angle: f32, direction: &Vec3) {
        let elevation = elevation_of(direction).unwrap_or(0.0);
        self.set_angle_vertical(elevation + angle);
    }

    /// Rotate horizontally to an absolute angle
    pub fn set_angle_horizontal(&mut self, angle: f32) {
        self.rotate_horizontal(angle - self.angle_horizontal);
    }

    /// Rotate vertically to an absolute angle
    pub fn set_angle_vertical(&mut self, angle: f32) {
        self.rotate_vertical(angle - self.angle_vertical);
    }

    /// Apply `rotation` to each basis vector and renormalize against drift
    fn apply_rotation(&mut self, rotation: &Mat3) {
        self.right = renormalize(rotation * self.right, self.right);
        self.up = renormalize(rotation * self.up, self.up);
        self.forward = renormalize(rotation * self.forward, self.forward);
    }
}

/// Normalize a rotated basis vector, keeping the previous one if it collapsed
pub(crate) fn renormalize(rotated: Vec3, previous: Vec3) -> Vec3 {
    math::try_normalize(&rotated).unwrap_or_else(|err| {
        log::warn!("Basis vector degenerated during rotation ({err}), keeping previous value");
        previous
    })
}
