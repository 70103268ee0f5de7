//! Core primitive types for presenting the scene
//!
//! Only the camera lives here; drawing itself is left to whatever renderer
//! consumes [`crate::scene::DrivingScene::draw_list`].

pub mod camera;

pub use camera::OrbitCamera;
