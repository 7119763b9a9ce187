//! Bevy plugins
//!
//! This module contains custom Bevy plugins that extend the engine's
//! functionality for our specific use case.

pub mod orbit_controls;

pub use orbit_controls::OrbitControlsPlugin;
