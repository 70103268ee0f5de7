//! # Drive Engine
//!
//! Spatial core of a real-time driving simulation: oriented transforms, an
//! orbit camera, oriented-box collision, and a friction-based velocity
//! integrator, tied together by a headless per-frame scene step.
//!
//! ## Features
//!
//! - **Oriented Transforms**: Position plus an orthonormal basis with angles
//!   reconstructed from the geometry after every rotation
//! - **Orbit Camera**: Target tracking, revolving, zoom limits, and roll
//! - **Box Collision**: Point containment and a six-axis box overlap test
//! - **Configuration**: TOML or RON files with validated defaults
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use drive_engine::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut scene = DrivingScene::new(SimulationConfig::default())?;
//!
//!     for _ in 0..60 {
//!         let report = scene.step(1.0 / 60.0, DriveIntent::FORWARD, CameraIntent::empty());
//!         if report.blocked_by.is_some() {
//!             break;
//!         }
//!     }
//!
//!     let _view = scene.view_matrix();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::SimulationConfig,
        foundation::{
            math::{MathError, Mat4, Vec3},
            transform::OrientedTransform,
        },
        input::{CameraIntent, DriveIntent},
        physics::{first_collision, BoxKey, CollidableBox, Obstacles, ShapeKind, VelocityIntegrator},
        render::OrbitCamera,
        scene::{CameraMode, DrivingScene, FrameReport},
    };
}
