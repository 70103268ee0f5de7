//! Scene assembly and the per-frame step
//!
//! - [`arena`] - Ground slab and boundary walls
//! - [`driving_scene`] - Vehicle, obstacles, and cameras advanced one frame at a time

pub mod arena;
pub mod driving_scene;

pub use arena::Arena;
pub use driving_scene::{CameraMode, DrivingScene, FrameReport};
