//! Oriented box collision
//!
//! Boxes are tested in world space straight from their current transform.
//!
//! # Key Types
//!
//! - [`CollidableBox`] - Oriented box with half extents and a [`ShapeKind`]

pub mod shape;

pub use shape::{CollidableBox, ShapeKind};
