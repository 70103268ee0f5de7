//! Physics module
//!
//! Box collision, the obstacle query, and the vehicle's velocity integrator.

pub mod collision;
pub mod collision_system;
pub mod movement;

pub use collision::{CollidableBox, ShapeKind};
pub use collision_system::{first_collision, BoxKey, Obstacles};
pub use movement::VelocityIntegrator;
