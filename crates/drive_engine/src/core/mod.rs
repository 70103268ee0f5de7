//! Core configuration types
//!
//! [`config::SimulationConfig`] is the single entry point for every tunable in
//! the crate.

pub mod config;

pub use config::SimulationConfig;
