//! Math utilities and types
//!
//! Provides the vector and matrix primitives every transform in the simulation is
//! built on: dot/cross products, checked normalization, the signed-side test used
//! for angle reconstruction, and the two rotation matrix forms.

pub use nalgebra::{Matrix3, Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type (rotations)
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type (view and model matrices handed to a renderer)
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Errors raised by vector operations
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// The vector has no direction to normalize to
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Tolerance absorbed by [`super::signed_side`] near zero crossings
    pub const SIDE_EPSILON: f32 = 1e-6;
}

/// World X axis (right in the canonical pose)
pub fn unit_x() -> Vec3 {
    Vec3::new(1.0, 0.0, 0.0)
}

/// World Y axis (vertical)
pub fn unit_y() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// World Z axis (forward in the canonical pose)
pub fn unit_z() -> Vec3 {
    Vec3::new(0.0, 0.0, 1.0)
}

/// Dot product
pub fn dot(a: &Vec3, b: &Vec3) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Cross product (right-handed)
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Euclidean length
pub fn magnitude(v: &Vec3) -> f32 {
    dot(v, v).sqrt()
}

/// Euclidean distance between two points
pub fn distance(a: &Vec3, b: &Vec3) -> f32 {
    magnitude(&(b - a))
}

/// Scale `v` to unit length
///
/// # Errors
/// Returns [`MathError::ZeroLength`] when `v` has zero (or non-finite) magnitude
/// instead of producing a NaN vector.
pub fn try_normalize(v: &Vec3) -> Result<Vec3, MathError> {
    let length = magnitude(v);
    if length == 0.0 || !length.is_finite() {
        return Err(MathError::ZeroLength);
    }
    Ok(v / length)
}

/// Scale `v` to unit length, or return the zero vector if it has no direction
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    try_normalize(v).unwrap_or_else(|_| Vec3::zeros())
}

/// Which side of `reference` the `candidate` vector falls on, seen along `normal`
///
/// Returns `1.0` when every component of `cross(candidate, reference)` agrees in sign
/// with the matching component of `normal`, `-1.0` otherwise. Products down to
/// `-1e-6` count as agreeing so that near-zero crossings resolve positive.
pub fn signed_side(reference: &Vec3, candidate: &Vec3, normal: &Vec3) -> f32 {
    let crossed = cross(candidate, reference);
    let tolerance = -constants::SIDE_EPSILON;

    if crossed.x * normal.x >= tolerance
        && crossed.y * normal.y >= tolerance
        && crossed.z * normal.z >= tolerance
    {
        1.0
    } else {
        -1.0
    }
}

/// Unsigned angle between two unit vectors
///
/// `None` when the dot product drifted outside `[-1, 1]` (or an input was NaN)
/// and the arccosine is undefined. Callers treat `None` as "no rotation".
pub fn angle_between(a: &Vec3, b: &Vec3) -> Option<f32> {
    valid_angle(dot(a, b).acos())
}

/// Filter out NaN angles
pub fn valid_angle(angle: f32) -> Option<f32> {
    if angle.is_nan() {
        None
    } else {
        Some(angle)
    }
}

/// Rotation around the world vertical axis
///
/// Built from `cos(-angle)` and `sin(-angle)`, so a positive angle turns
/// world Z towards world -X (a right-hand turn when looking down -Y).
pub fn rotation_about_vertical(angle: f32) -> Mat3 {
    let cos_of_angle = (-angle).cos();
    let sin_of_angle = (-angle).sin();

    Mat3::new(
        cos_of_angle, 0.0, sin_of_angle,
        0.0, 1.0, 0.0,
        -sin_of_angle, 0.0, cos_of_angle,
    )
}

/// General axis-angle (Rodrigues) rotation around a unit `axis`
pub fn rotation_about_axis(axis: &Vec3, angle: f32) -> Mat3 {
    let cos_of_angle = angle.cos();
    let sin_of_angle = angle.sin();
    let one_minus_cos = 1.0 - cos_of_angle;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    Mat3::new(
        cos_of_angle + x * x * one_minus_cos,
        x * y * one_minus_cos - z * sin_of_angle,
        x * z * one_minus_cos + y * sin_of_angle,
        y * x * one_minus_cos + z * sin_of_angle,
        cos_of_angle + y * y * one_minus_cos,
        y * z * one_minus_cos - x * sin_of_angle,
        z * x * one_minus_cos - y * sin_of_angle,
        z * y * one_minus_cos + x * sin_of_angle,
        cos_of_angle + z * z * one_minus_cos,
    )
}

/// Project `v` onto the horizontal (XZ) plane and normalize it
///
/// # Errors
/// [`MathError::ZeroLength`] when `v` is vertical or zero.
pub fn horizontal_projection(v: &Vec3) -> Result<Vec3, MathError> {
    try_normalize(&Vec3::new(v.x, 0.0, v.z))
}

/// Level forward direction for a horizontal angle
pub fn level_forward(angle_horizontal: f32) -> Vec3 {
    normalize_or_zero(&(rotation_about_vertical(angle_horizontal) * unit_z()))
}

/// Level right direction for a horizontal angle
///
/// This is the axis vertical rotations pivot around. It ignores any roll the
/// entity's own right vector may carry.
pub fn level_right(angle_horizontal: f32) -> Vec3 {
    normalize_or_zero(&(rotation_about_vertical(angle_horizontal - constants::HALF_PI) * unit_z()))
}

/// Signed horizontal angle from world Z to the horizontal projection of `v`
///
/// `None` when `v` has no horizontal component or the angle is undefined.
pub fn heading_of(v: &Vec3) -> Option<f32> {
    let projected = horizontal_projection(v).ok()?;
    let z = unit_z();
    angle_between(&z, &projected).map(|angle| angle * signed_side(&z, &projected, &unit_y()))
}

/// Signed vertical angle of `direction` from its own level direction
///
/// Positive values tilt the direction downwards, matching the vertical angle
/// that [`crate::foundation::transform::OrientedTransform::rotate_vertical`]
/// reconstructs. The sign is measured against the level right axis; taking it
/// against `cross(level, direction)` instead would make it always negative.
/// `None` for a zero or purely vertical direction.
pub fn elevation_of(direction: &Vec3) -> Option<f32> {
    let direction = try_normalize(direction).ok()?;
    let level = horizontal_projection(&direction).ok()?;
    let axis = cross(&unit_y(), &level);
    angle_between(&level, &direction).map(|angle| angle * -signed_side(&level, &direction, &axis))
}

/// Signed vertical angle of `direction` relative to a given level direction
///
/// Used when the horizontal heading is already fixed and may not match the
/// direction's own projection (e.g. a point straight overhead).
pub fn elevation_from_level(level: &Vec3, level_axis: &Vec3, direction: &Vec3) -> Option<f32> {
    let direction = try_normalize(direction).ok()?;
    angle_between(level, &direction).map(|angle| angle * -signed_side(level, &direction, level_axis))
}
