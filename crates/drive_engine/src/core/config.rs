//! # Simulation Configuration
//!
//! Every tunable of the driving simulation grouped by subsystem. Defaults
//! reproduce the stock arena and handling; a configuration file only needs the
//! values it changes because every section falls back to its defaults.
//!
//! ## Configuration Categories
//!
//! - **Engine**: Logging and the fixed frame step used by headless drivers
//! - **Drive**: Vehicle handling rates, start pose, and size
//! - **Integrator**: Friction and the coasting rest threshold
//! - **Camera**: Orbit limits and camera control rates
//! - **Chase / Overhead Camera**: How the two follow cameras track the vehicle
//! - **Arena**: Ground and boundary wall dimensions

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::{constants, Vec3};

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message()))
    }
}

/// # Engine Configuration
///
/// Logging and frame timing shared by whatever drives the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fallback log filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Frame step in seconds for fixed-step drivers
    pub fixed_delta_seconds: f32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_delta_seconds: 1.0 / 60.0,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the fixed frame step
    pub fn with_fixed_delta_seconds(mut self, delta_seconds: f32) -> Self {
        self.fixed_delta_seconds = delta_seconds;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(log::LevelFilter::from_str(&self.log_level).is_ok(), || {
            format!("Unknown log level '{}'", self.log_level)
        })?;
        ensure(self.fixed_delta_seconds > 0.0, || {
            format!("Fixed frame step must be positive, got {}", self.fixed_delta_seconds)
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Drive Configuration
///
/// Vehicle handling and the vehicle box's starting pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Acceleration while driving forwards (units/s²)
    pub forward_acceleration: f32,
    /// Acceleration while reversing (units/s², not positive)
    pub reverse_acceleration: f32,
    /// Steering rate (rad/s)
    pub turn_rate: f32,
    /// Pitch rate (rad/s)
    pub pitch_rate: f32,
    /// Speed of direct world-axis translation (units/s)
    pub translate_speed: f32,
    /// Starting position of the vehicle's centre
    pub vehicle_start: Vec3,
    /// Full vehicle dimensions along right/up/forward
    pub vehicle_size: Vec3,
}

impl DriveConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.forward_acceleration > 0.0, || {
            format!("Forward acceleration must be positive, got {}", self.forward_acceleration)
        })?;
        ensure(self.reverse_acceleration <= 0.0, || {
            format!("Reverse acceleration must not be positive, got {}", self.reverse_acceleration)
        })?;
        ensure(self.turn_rate >= 0.0 && self.pitch_rate >= 0.0 && self.translate_speed >= 0.0, || {
            "Turn rate, pitch rate and translate speed must not be negative".to_string()
        })?;
        ensure(self.vehicle_size.iter().all(|extent| *extent > 0.0), || {
            format!("Vehicle size must be positive on every axis, got {:?}", self.vehicle_size)
        })
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            forward_acceleration: 30.0,
            reverse_acceleration: -12.0,
            turn_rate: 1.0,
            pitch_rate: 2.0,
            translate_speed: 5.0,
            vehicle_start: Vec3::new(0.0, 0.375, 0.0),
            vehicle_size: Vec3::new(1.75, 0.75, 3.0),
        }
    }
}

/// # Integrator Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Fraction of velocity removed per second
    pub friction_factor: f32,
    /// Coasting speed under which the vehicle snaps to rest
    pub min_free_velocity: f32,
}

impl IntegratorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.friction_factor >= 0.0, || {
            format!("Friction factor must not be negative, got {}", self.friction_factor)
        })?;
        ensure(self.min_free_velocity >= 0.0, || {
            format!("Minimum free velocity must not be negative, got {}", self.min_free_velocity)
        })
    }
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            friction_factor: crate::physics::movement::DEFAULT_FRICTION_FACTOR,
            min_free_velocity: crate::physics::movement::DEFAULT_MIN_FREE_VELOCITY,
        }
    }
}

/// # Camera Configuration
///
/// Orbit limits applied to both cameras and the rates of the manual camera
/// controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Closest a camera may get to its target
    pub min_distance: f32,
    /// Gap between the vertical limits and looking straight up or down (rad)
    pub vertical_margin: f32,
    /// Strafe and raise speed (units/s)
    pub move_speed: f32,
    /// Orbit rate (rad/s)
    pub revolve_rate: f32,
    /// Zoom speed (units/s)
    pub zoom_rate: f32,
    /// Lowest height a manually controlled camera may reach
    pub min_height: f32,
}

impl CameraConfig {
    /// Vertical angle limits as `(min, max)`
    pub fn vertical_limits(&self) -> (f32, f32) {
        let limit = constants::HALF_PI - self.vertical_margin;
        (-limit, limit)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.min_distance >= 0.0, || {
            format!("Minimum camera distance must not be negative, got {}", self.min_distance)
        })?;
        ensure(self.vertical_margin > 0.0 && self.vertical_margin < constants::HALF_PI, || {
            format!("Vertical margin must lie in (0, π/2), got {}", self.vertical_margin)
        })?;
        ensure(self.move_speed >= 0.0 && self.revolve_rate >= 0.0 && self.zoom_rate >= 0.0, || {
            "Camera control rates must not be negative".to_string()
        })
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: crate::render::primitives::camera::DEFAULT_MIN_DISTANCE,
            vertical_margin: crate::render::primitives::camera::DEFAULT_VERTICAL_MARGIN,
            move_speed: 10.0,
            revolve_rate: 2.0,
            zoom_rate: 55.0,
            min_height: 0.1,
        }
    }
}

/// # Chase Camera Configuration
///
/// The chase camera re-aims at the vehicle every frame, orbits behind it, and
/// is lifted above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseCameraConfig {
    /// Camera position before the first frame
    pub start_position: Vec3,
    /// Distance kept behind the vehicle
    pub follow_distance: f32,
    /// Vertical orbit offset relative to the vehicle's pitch (rad, negative orbits above)
    pub pitch_offset: f32,
    /// Height added after orbiting
    pub height_offset: f32,
}

impl ChaseCameraConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.follow_distance > 0.0, || {
            format!("Follow distance must be positive, got {}", self.follow_distance)
        })
    }
}

impl Default for ChaseCameraConfig {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, 3.0, 15.0),
            follow_distance: 15.0,
            pitch_offset: -constants::PI / 32.0,
            height_offset: 2.0,
        }
    }
}

/// # Overhead Camera Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverheadCameraConfig {
    /// Camera height as a fraction of the arena size
    pub height_fraction: f32,
}

impl OverheadCameraConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.height_fraction > 0.0, || {
            format!("Overhead height fraction must be positive, got {}", self.height_fraction)
        })
    }
}

impl Default for OverheadCameraConfig {
    fn default() -> Self {
        Self { height_fraction: 0.4 }
    }
}

/// # Arena Configuration
///
/// A square ground slab whose top face is at `y = 0`, fenced by four walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Side length of the drivable square
    pub size: f32,
    /// Wall height above the ground surface
    pub wall_height: f32,
    /// Wall thickness
    pub wall_thickness: f32,
    /// Ground slab thickness (walls reach down to its bottom face)
    pub ground_thickness: f32,
}

impl ArenaConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            self.size > 0.0 && self.wall_height > 0.0 && self.wall_thickness > 0.0 && self.ground_thickness > 0.0,
            || format!("Arena dimensions must be positive, got {self:?}"),
        )
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            wall_height: 1.0,
            wall_thickness: 3.0,
            ground_thickness: 5.0,
        }
    }
}

/// # Complete Simulation Configuration
///
/// Top-level configuration that encompasses all subsystems. This is the
/// structure [`crate::scene::DrivingScene`] is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Vehicle handling
    pub drive: DriveConfig,
    /// Velocity integration
    pub integrator: IntegratorConfig,
    /// Orbit limits and camera controls
    pub camera: CameraConfig,
    /// Chase camera tracking
    pub chase_camera: ChaseCameraConfig,
    /// Overhead camera tracking
    pub overhead_camera: OverheadCameraConfig,
    /// Arena dimensions
    pub arena: ArenaConfig,
}

impl Config for SimulationConfig {
    /// Validate the entire configuration
    fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.drive.validate()?;
        self.integrator.validate()?;
        self.camera.validate()?;
        self.chase_camera.validate()?;
        self.overhead_camera.validate()?;
        self.arena.validate()?;

        // Friction larger than one step's worth would flip the velocity's sign
        ensure(self.integrator.friction_factor * self.engine.fixed_delta_seconds <= 1.0, || {
            format!(
                "Friction factor {} is too large for a {} s frame step",
                self.integrator.friction_factor, self.engine.fixed_delta_seconds
            )
        })
    }
}
