//! # Orbit Camera
//!
//! A camera built on [`OrientedTransform`] that keeps a look-at target a fixed
//! distance in front of it and can revolve around that target.
//!
//! ## Design Principles
//! - **Composition**: The camera owns a transform and wraps the operations that
//!   need extra bookkeeping (target, roll vector); nothing is overridden implicitly
//! - **Target invariant**: After every rotate, translate, and zoom the target sits
//!   at `position + forward * distance`
//! - **Independent roll**: Roll only turns the `roll_up` vector handed to the
//!   view matrix; the transform's own basis is never rolled
//!
//! # Coordinate System
//! Same world conventions as [`OrientedTransform`]: Y+ is up, a positive
//! vertical angle looks downwards. The view matrix is right-handed with the
//! camera looking down its view-space -Z axis.

use crate::core::config::CameraConfig;
use crate::foundation::math::{
    self, constants, elevation_from_level, elevation_of, heading_of, level_forward, level_right,
    rotation_about_axis, signed_side, Mat3, Mat4, Point3, Vec3,
};
use crate::foundation::transform::{renormalize, OrientedTransform};

/// Default minimum (and starting) distance between camera and target
pub const DEFAULT_MIN_DISTANCE: f32 = 10.0;

/// Margin kept between the vertical angle limits and straight up/down
pub const DEFAULT_VERTICAL_MARGIN: f32 = 0.05;

/// Camera that orbits a target point
///
/// The transform's basis is the view direction; `target` is the orbit centre
/// and `roll_up` is the up vector the renderer should use.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    transform: OrientedTransform,
    target: Vec3,
    distance: f32,
    min_distance: f32,
    min_angle_vertical: f32,
    max_angle_vertical: f32,
    roll_up: Vec3,
    roll_angle: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            transform: OrientedTransform::default(),
            target: math::unit_z(),
            distance: DEFAULT_MIN_DISTANCE,
            min_distance: DEFAULT_MIN_DISTANCE,
            min_angle_vertical: -(constants::HALF_PI - DEFAULT_VERTICAL_MARGIN),
            max_angle_vertical: constants::HALF_PI - DEFAULT_VERTICAL_MARGIN,
            roll_up: math::unit_y(),
            roll_angle: 0.0,
        }
    }
}

impl OrbitCamera {
    /// Create a camera in the canonical pose
    ///
    /// The camera sits at the origin facing +Z, with its target on the Z axis,
    /// a distance and minimum distance of [`DEFAULT_MIN_DISTANCE`], and a
    /// vertical band of ±(π/2 − [`DEFAULT_VERTICAL_MARGIN`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera in the canonical pose with limits from configuration
    pub fn from_config(config: &CameraConfig) -> Self {
        let (min_angle, max_angle) = config.vertical_limits();
        Self::new()
            .with_min_distance(config.min_distance)
            .with_vertical_limits(min_angle, max_angle)
    }

    /// Builder pattern: Set the vertical angle band
    ///
    /// # Arguments
    /// * `min_angle` - Lowest vertical angle (most upward look), radians
    /// * `max_angle` - Highest vertical angle (most downward look), radians
    pub fn with_vertical_limits(mut self, min_angle: f32, max_angle: f32) -> Self {
        self.min_angle_vertical = min_angle.min(max_angle);
        self.max_angle_vertical = max_angle.max(min_angle);
        self
    }

    /// Builder pattern: Set the minimum distance (also the current distance)
    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance.max(0.0);
        self.distance = self.min_distance;
        self
    }

    /// Return to the canonical pose
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Underlying transform (read-only; mutations go through the camera)
    pub fn transform(&self) -> &OrientedTransform {
        &self.transform
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    /// View direction
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Orbit centre / look-at point
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Distance from position to target
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Smallest distance zooming will allow
    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// Vertical angle band as `(min, max)`
    pub fn vertical_limits(&self) -> (f32, f32) {
        (self.min_angle_vertical, self.max_angle_vertical)
    }

    /// Up vector including roll, for the view matrix
    pub fn roll_up(&self) -> Vec3 {
        self.roll_up
    }

    /// Current roll angle between the transform's up and `roll_up`
    pub fn roll_angle(&self) -> f32 {
        self.roll_angle
    }

    /// Horizontal angle of the view direction
    pub fn angle_horizontal(&self) -> f32 {
        self.transform.angle_horizontal()
    }

    /// Vertical angle of the view direction
    pub fn angle_vertical(&self) -> f32 {
        self.transform.angle_vertical()
    }

    fn update_target(&mut self) {
        self.target = self.transform.position() + self.transform.forward() * self.distance;
    }

    fn apply_to_roll_up(&mut self, rotation: &Mat3) {
        self.roll_up = renormalize(rotation * self.roll_up, self.roll_up);
    }

    /// Move relative to the view direction, carrying the target along
    pub fn move_local(&mut self, distance_right: f32, distance_up: f32, distance_forward: f32) {
        let offset = self.transform.local_offset(distance_right, distance_up, distance_forward);
        self.transform.translate(offset);
        self.target += offset;
    }

    /// Move along world axes, carrying the target along
    pub fn translate(&mut self, offset: Vec3) {
        self.transform.translate(offset);
        self.target += offset;
    }

    /// Jump to an absolute position; the target is re-derived from the view direction
    pub fn translate_to(&mut self, position: Vec3) {
        self.transform.translate_to(position);
        self.update_target();
        log::trace!("Camera moved to {:?}, target {:?}", position, self.target);
    }

    /// Turn the view around the world vertical axis
    pub fn rotate_horizontal(&mut self, angle: f32) -> Mat3 {
        let rotation = self.transform.rotate_horizontal(angle);
        self.apply_to_roll_up(&rotation);
        self.update_target();
        rotation
    }

    /// Tilt the view, clamped to the vertical band
    ///
    /// The applied angle is shortened so the resulting vertical angle lands on
    /// the band edge instead of crossing it.
    pub fn rotate_vertical(&mut self, angle: f32) -> Mat3 {
        let current = self.transform.angle_vertical();
        let applied = if current + angle > self.max_angle_vertical {
            self.max_angle_vertical - current
        } else if current + angle < self.min_angle_vertical {
            self.min_angle_vertical - current
        } else {
            angle
        };

        let rotation = self.transform.rotate_vertical(applied);
        self.apply_to_roll_up(&rotation);
        self.update_target();
        rotation
    }

    /// Roll the up vector around the view direction
    ///
    /// Only `roll_up` turns; the transform's basis is untouched. The reported
    /// [`roll_angle`](Self::roll_angle) grows in the opposite sense to `angle`.
    pub fn rotate_roll(&mut self, angle: f32) -> Mat3 {
        let forward = self.transform.forward();
        let rotation = rotation_about_axis(&forward, angle);
        self.apply_to_roll_up(&rotation);

        let up = self.transform.up();
        self.roll_angle = math::angle_between(&up, &self.roll_up)
            .map(|between| between * signed_side(&up, &self.roll_up, &forward))
            .unwrap_or(0.0);
        rotation
    }

    /// Roll to an absolute roll angle
    pub fn set_angle_roll(&mut self, angle: f32) {
        self.rotate_roll(self.roll_angle - angle);
    }

    /// Face the heading of `direction`, offset by `angle`
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

    /// Turn to an absolute horizontal angle
    pub fn set_angle_horizontal(&mut self, angle: f32) {
        self.rotate_horizontal(angle - self.transform.angle_horizontal());
    }

    /// Tilt to an absolute vertical angle (clamped to the band)
    pub fn set_angle_vertical(&mut self, angle: f32) {
        self.rotate_vertical(angle - self.transform.angle_vertical());
    }

    /// Orbit the target horizontally
    ///
    /// The camera rotates by `-angle` and is then moved so that the target ends
    /// up exactly where it was before.
    pub fn revolve_horizontal(&mut self, angle: f32) {
        let previous_target = self.target;
        self.rotate_horizontal(-angle);
        self.translate(previous_target - self.target);
    }

    /// Orbit the target vertically (clamped to the band)
    pub fn revolve_vertical(&mut self, angle: f32) {
        let previous_target = self.target;
        self.rotate_vertical(-angle);
        self.translate(previous_target - self.target);
    }

    /// Orbit to the heading of `direction`, offset by `angle`, keeping the target
    pub fn revolve_horizontal_from_vector(&mut self, angle: f32, direction: &Vec3) {
        let previous_target = self.target;
        self.rotate_horizontal_from_vector(-angle, direction);
        self.translate(previous_target - self.target);
    }

    /// Orbit to the elevation of `direction`, offset by `angle`, keeping the target
    pub fn revolve_vertical_from_vector(&mut self, angle: f32, direction: &Vec3) {
        let previous_target = self.target;
        self.rotate_vertical_from_vector(-angle, direction);
        self.translate(previous_target - self.target);
    }

    /// Aim at `point` without moving, then back off if it is too close
    ///
    /// The horizontal turn is skipped when `point` is straight above or below
    /// the camera. The vertical angle is measured against the level direction
    /// of the (possibly unchanged) heading and clamped to the band. Afterwards
    /// `target == point` and `distance` is the distance to it, raised to the
    /// minimum by moving the camera backwards if needed.
    pub fn set_target(&mut self, point: Vec3) {
        let direction = point - self.transform.position();

        if let Some(heading) = heading_of(&direction) {
            self.set_angle_horizontal(heading);
        }

        let heading = self.transform.angle_horizontal();
        let elevation =
            elevation_from_level(&level_forward(heading), &level_right(heading), &direction).unwrap_or(0.0);
        self.set_angle_vertical(elevation);

        self.target = point;
        self.distance = math::distance(&self.transform.position(), &self.target);
        self.zoom_distance(0.0);

        log::trace!("Camera target set to {:?} at distance {}", point, self.distance);
    }

    /// Move towards (positive) or away from (negative) the target
    ///
    /// The step is limited so the distance never drops below the minimum
    /// distance; the target does not move.
    pub fn zoom_distance(&mut self, delta: f32) {
        let step = if self.distance - delta < self.min_distance {
            self.distance - self.min_distance
        } else if self.distance - delta < 0.0 {
            self.distance
        } else {
            delta
        };

        let forward = self.transform.forward();
        self.transform.translate(forward * step);
        self.distance -= step;
    }

    /// Zoom to an absolute distance (never below the minimum)
    pub fn set_distance(&mut self, distance: f32) {
        self.zoom_distance(self.distance - distance);
    }

    /// Right-handed look-at view matrix using `roll_up` as the up vector
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.transform.position()),
            &Point3::from(self.target),
            &self.roll_up,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-3;

    /// Camera at (0, 3, 15) aimed at the origin, the chase camera's starting pose
    fn aimed_camera() -> OrbitCamera {
        let mut camera = OrbitCamera::new();
        camera.translate_to(Vec3::new(0.0, 3.0, 15.0));
        camera.set_target(Vec3::zeros());
        camera
    }

    fn assert_target_invariant(camera: &OrbitCamera) {
        let expected = camera.position() + camera.forward() * camera.distance();
        assert_relative_eq!(camera.target(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_canonical_pose() {
        let camera = OrbitCamera::new();

        assert_eq!(camera.position(), Vec3::zeros());
        assert_eq!(camera.target(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(camera.roll_up(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(camera.distance(), 10.0);
        assert_eq!(camera.min_distance(), 10.0);
        let (min, max) = camera.vertical_limits();
        assert_relative_eq!(max, constants::HALF_PI - 0.05, epsilon = 1e-6);
        assert_relative_eq!(min, -(constants::HALF_PI - 0.05), epsilon = 1e-6);
    }

    #[test]
    fn test_set_target_aims_at_point() {
        let camera = aimed_camera();

        assert_eq!(camera.target(), Vec3::zeros());
        assert_relative_eq!(camera.distance(), 234.0_f32.sqrt(), epsilon = EPSILON);
        assert_target_invariant(&camera);
        // Looking back towards -Z and slightly down
        assert!(camera.forward().z < 0.0);
        assert!(camera.forward().y < 0.0);
        assert!(camera.angle_vertical() > 0.0);
    }

    #[test]
    fn test_set_target_too_close_backs_off() {
        let mut camera = OrbitCamera::new();
        camera.translate_to(Vec3::new(0.0, 0.0, 0.0));
        camera.set_target(Vec3::new(3.0, 0.0, 4.0));

        assert_relative_eq!(camera.distance(), 10.0, epsilon = EPSILON);
        assert_eq!(camera.target(), Vec3::new(3.0, 0.0, 4.0));
        assert_relative_eq!(math::distance(&camera.position(), &camera.target()), 10.0, epsilon = EPSILON);
        assert_target_invariant(&camera);
    }

    #[test]
    fn test_set_target_straight_below_keeps_heading() {
        let mut camera = OrbitCamera::new();
        camera.rotate_horizontal(0.6);
        camera.translate_to(Vec3::new(0.0, 80.0, 0.0));
        camera.set_target(Vec3::zeros());

        assert_relative_eq!(camera.angle_horizontal(), 0.6, epsilon = EPSILON);
        // Clamped just short of straight down
        assert_relative_eq!(camera.angle_vertical(), camera.vertical_limits().1, epsilon = EPSILON);
        assert_relative_eq!(camera.distance(), 80.0, epsilon = EPSILON);
    }

    #[test]
    fn test_set_target_on_own_position_backs_off() {
        let mut camera = OrbitCamera::new();
        camera.rotate_horizontal(0.4);
        camera.rotate_vertical(0.2);
        camera.translate_to(Vec3::new(4.0, 2.0, -3.0));
        let point = camera.position();

        camera.set_target(point);

        assert!(camera.position().iter().all(|component| component.is_finite()));
        assert!(camera.angle_horizontal().is_finite());
        assert!(camera.angle_vertical().is_finite());
        assert_relative_eq!(camera.angle_horizontal(), 0.4, epsilon = EPSILON);
        assert_relative_eq!(camera.angle_vertical(), 0.0, epsilon = EPSILON);
        assert_relative_eq!(camera.distance(), camera.min_distance(), epsilon = EPSILON);
        assert_eq!(camera.target(), point);
        assert_relative_eq!(math::distance(&camera.position(), &point), 10.0, epsilon = EPSILON);
        assert_target_invariant(&camera);
    }

    #[test]
    fn test_revolve_horizontal_keeps_target() {
        let positions = [
            Vec3::new(0.0, 3.0, 15.0),
            Vec3::new(20.0, 5.0, -10.0),
            Vec3::new(-15.0, 30.0, 25.0),
            Vec3::new(3.0, 2.0, 40.0),
        ];
        let targets = [Vec3::zeros(), Vec3::new(10.0, 1.0, -5.0), Vec3::new(-4.0, 6.0, 12.0)];

        for position in positions {
            for point in targets {
                for roll in [0.0_f32, 0.35] {
                    let mut camera = OrbitCamera::new();
                    camera.translate_to(position);
                    camera.set_target(point);
                    camera.rotate_roll(roll);
                    let target = camera.target();
                    let separation = math::distance(&camera.position(), &target);

                    for angle in [0.7_f32, -1.3, 2.9] {
                        camera.revolve_horizontal(angle);
                        assert_relative_eq!(camera.target(), target, epsilon = EPSILON);
                        assert_relative_eq!(
                            math::distance(&camera.position(), &target),
                            separation,
                            epsilon = EPSILON
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_revolve_vertical_keeps_target_and_clamps() {
        let mut camera = aimed_camera();
        let target = camera.target();

        camera.revolve_vertical(-0.3);
        assert_relative_eq!(camera.target(), target, epsilon = EPSILON);

        camera.revolve_vertical(-10.0);
        assert_relative_eq!(camera.angle_vertical(), camera.vertical_limits().1, epsilon = EPSILON);
        assert_relative_eq!(camera.target(), target, epsilon = EPSILON);
        assert!(camera.position().y > target.y);
    }

    #[test]
    fn test_rotate_vertical_clamps_to_band() {
        let mut camera = OrbitCamera::new();

        camera.rotate_vertical(3.0);
        assert_relative_eq!(camera.angle_vertical(), camera.vertical_limits().1, epsilon = 1e-4);

        camera.rotate_vertical(-6.0);
        assert_relative_eq!(camera.angle_vertical(), camera.vertical_limits().0, epsilon = 1e-4);
        assert_target_invariant(&camera);
    }

    #[test]
    fn test_zoom_never_goes_below_min_distance() {
        let mut camera = aimed_camera();

        for delta in [1.0_f32, 3.0, 100.0, -2.0, 50.0, 0.0] {
            camera.zoom_distance(delta);
            assert!(camera.distance() >= camera.min_distance() - 1e-4);
            assert_target_invariant(&camera);
        }
        assert_relative_eq!(camera.distance(), camera.min_distance(), epsilon = 1e-4);
    }

    #[test]
    fn test_set_distance() {
        let mut camera = aimed_camera();

        camera.set_distance(15.0);
        assert_relative_eq!(camera.distance(), 15.0, epsilon = 1e-4);
        assert_target_invariant(&camera);

        camera.set_distance(2.0);
        assert_relative_eq!(camera.distance(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_translate_carries_target() {
        let mut camera = aimed_camera();
        let offset = Vec3::new(1.0, 2.0, -3.0);
        let target = camera.target();

        camera.translate(offset);
        assert_relative_eq!(camera.target(), target + offset, epsilon = EPSILON);

        camera.move_local(0.5, 0.0, 0.0);
        assert_target_invariant(&camera);
    }

    #[test]
    fn test_translate_to_rederives_target() {
        let mut camera = aimed_camera();
        camera.translate_to(Vec3::new(5.0, 5.0, 5.0));
        assert_target_invariant(&camera);
    }

    #[test]
    fn test_roll_turns_only_roll_up() {
        let mut camera = aimed_camera();
        let up = camera.transform().up();

        camera.set_angle_roll(0.3);
        assert_relative_eq!(camera.roll_angle(), 0.3, epsilon = 1e-4);
        assert_relative_eq!(camera.roll_up().magnitude(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.roll_up().dot(&camera.forward()), 0.0, epsilon = 1e-4);
        assert_eq!(camera.transform().up(), up);

        camera.set_angle_roll(-0.2);
        assert_relative_eq!(camera.roll_angle(), -0.2, epsilon = 1e-4);

        camera.set_angle_roll(0.0);
        assert_relative_eq!(camera.roll_up(), up, epsilon = 1e-4);
    }

    #[test]
    fn test_view_matrix_puts_target_on_negative_z() {
        let camera = aimed_camera();
        let view = camera.view_matrix();

        let eye = view.transform_point(&Point3::from(camera.position()));
        let target = view.transform_point(&Point3::from(camera.target()));

        assert_relative_eq!(eye.coords, Vec3::zeros(), epsilon = EPSILON);
        assert_relative_eq!(target.coords, Vec3::new(0.0, 0.0, -camera.distance()), epsilon = EPSILON);
    }

    #[test]
    fn test_builders() {
        let camera = OrbitCamera::new()
            .with_min_distance(4.0)
            .with_vertical_limits(0.5, -0.5);

        assert_eq!(camera.min_distance(), 4.0);
        assert_eq!(camera.distance(), 4.0);
        assert_eq!(camera.vertical_limits(), (-0.5, 0.5));
    }
}
