//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - The oriented transform shared by every movable entity
//! - Logging utilities

pub mod math;
pub mod transform;
pub mod logging;
