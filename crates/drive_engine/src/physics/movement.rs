//! Friction-based velocity integration for the vehicle
//!
//! Motion is one-dimensional: the integrator produces a signed speed along the
//! vehicle's forward axis and the caller turns it into a displacement.

use crate::core::config::IntegratorConfig;

/// Default friction factor applied per second
pub const DEFAULT_FRICTION_FACTOR: f32 = 0.9;

/// Default speed under which a coasting vehicle snaps to rest
pub const DEFAULT_MIN_FREE_VELOCITY: f32 = 1.0;

/// One-dimensional velocity integrator with friction and a rest threshold
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityIntegrator {
    velocity: f32,
    drive_acceleration: f32,
    friction_factor: f32,
    min_free_velocity: f32,
}

impl VelocityIntegrator {
    /// Create an integrator at rest with default friction and rest threshold
    pub fn new() -> Self {
        Self {
            velocity: 0.0,
            drive_acceleration: 0.0,
            friction_factor: DEFAULT_FRICTION_FACTOR,
            min_free_velocity: DEFAULT_MIN_FREE_VELOCITY,
        }
    }

    /// Create an integrator from configuration values
    pub fn from_config(config: &IntegratorConfig) -> Self {
        Self {
            friction_factor: config.friction_factor,
            min_free_velocity: config.min_free_velocity,
            ..Self::new()
        }
    }

    /// Current signed velocity in units per second
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Acceleration currently requested by the driver
    pub fn drive_acceleration(&self) -> f32 {
        self.drive_acceleration
    }

    /// Fraction of velocity removed per second
    pub fn friction_factor(&self) -> f32 {
        self.friction_factor
    }

    /// Speed under which a coasting vehicle comes to rest
    pub fn min_free_velocity(&self) -> f32 {
        self.min_free_velocity
    }

    /// Set velocity
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Set the driver's acceleration (zero means coasting)
    pub fn set_drive_acceleration(&mut self, acceleration: f32) {
        self.drive_acceleration = acceleration;
    }

    /// Set friction factor
    pub fn set_friction_factor(&mut self, friction_factor: f32) {
        self.friction_factor = friction_factor.max(0.0);
    }

    /// Set the rest threshold
    pub fn set_min_free_velocity(&mut self, min_free_velocity: f32) {
        self.min_free_velocity = min_free_velocity.max(0.0);
    }

    /// Advance velocity by one step and return it
    ///
    /// Acceleration is applied first, then friction scales the updated velocity
    /// by `1 - friction_factor * delta_time`. While coasting, speeds below
    /// `min_free_velocity` snap to zero so the vehicle actually stops.
    pub fn integrate(&mut self, delta_time: f32) -> f32 {
        self.velocity += self.drive_acceleration * delta_time;
        self.velocity *= 1.0 - self.friction_factor * delta_time;

        if self.drive_acceleration == 0.0 && self.velocity.abs() < self.min_free_velocity {
            self.velocity = 0.0;
        }

        self.velocity
    }

    /// Integrate and return the forward distance covered this step
    pub fn displacement(&mut self, delta_time: f32) -> f32 {
        self.integrate(delta_time) * delta_time
    }

    /// Stop all movement
    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }
}

impl Default for VelocityIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_defaults() {
        let integrator = VelocityIntegrator::default();
        assert_eq!(integrator.velocity(), 0.0);
        assert_eq!(integrator.drive_acceleration(), 0.0);
        assert_eq!(integrator.friction_factor(), 0.9);
        assert_eq!(integrator.min_free_velocity(), 1.0);
    }

    #[test]
    fn test_acceleration_then_friction() {
        let mut integrator = VelocityIntegrator::new();
        integrator.set_drive_acceleration(30.0);

        // (0 + 30 * 0.1) * (1 - 0.9 * 0.1)
        let velocity = integrator.integrate(0.1);
        assert_relative_eq!(velocity, 2.73, epsilon = EPSILON);
        assert_relative_eq!(integrator.velocity(), 2.73, epsilon = EPSILON);
    }

    #[test]
    fn test_coasting_below_threshold_snaps_to_rest() {
        let mut integrator = VelocityIntegrator::new();
        integrator.set_velocity(0.5);

        assert_eq!(integrator.integrate(0.1), 0.0);
    }

    #[test]
    fn test_slow_velocity_kept_while_driving() {
        let mut integrator = VelocityIntegrator::new();
        integrator.set_drive_acceleration(1.0);
        integrator.set_velocity(0.2);

        let velocity = integrator.integrate(0.01);
        assert!(velocity > 0.0);
    }

    #[test]
    fn test_coasting_decays_towards_rest() {
        let mut integrator = VelocityIntegrator::new();
        integrator.set_velocity(-20.0);

        let mut previous = integrator.velocity().abs();
        for _ in 0..400 {
            let speed = integrator.integrate(1.0 / 60.0).abs();
            assert!(speed <= previous);
            previous = speed;
        }
        assert_eq!(integrator.velocity(), 0.0);
    }

    #[test]
    fn test_displacement_and_stop() {
        let mut integrator = VelocityIntegrator::new();
        integrator.set_drive_acceleration(30.0);

        assert_relative_eq!(integrator.displacement(0.1), 0.273, epsilon = EPSILON);

        integrator.stop();
        assert_eq!(integrator.velocity(), 0.0);
        assert_eq!(integrator.drive_acceleration(), 30.0);
    }

    #[test]
    fn test_from_config() {
        let config = IntegratorConfig {
            friction_factor: 0.5,
            min_free_velocity: 0.25,
        };
        let integrator = VelocityIntegrator::from_config(&config);

        assert_eq!(integrator.friction_factor(), 0.5);
        assert_eq!(integrator.min_free_velocity(), 0.25);
        assert_eq!(integrator.velocity(), 0.0);
    }
}
