//! Render-facing types
//!
//! The crate does not draw anything. It produces view matrices from cameras and
//! model matrices from boxes for an external renderer.

pub mod primitives;

pub use primitives::OrbitCamera;
