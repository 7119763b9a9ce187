//! Backstage Systems: a decorative, orbit-navigable 3D stage
//!
//! A starfield, a translucent cloud, a ring of rotating colored spotlights
//! and floating billboard text reading "backstage systems".
//!
//! Architecture:
//! - The scene graph is built once at startup from fixed configuration
//! - Every rendered frame, a frame animator turns the star field and the
//!   spotlight ring by a fixed step (no delta-time scaling)
//! - Orbit controls move the camera from mouse input, clamped to the
//!   configured distance and polar bounds
//! - Billboards (text, cloud puffs) are turned to face the camera
//!
//! # Module Structure
//!
//! - `config`: Configuration constants
//! - `stage`: Bevy engine integration
//!   - `components`: ECS components
//!   - `resources`: Global resources
//!   - `plugins`: Custom plugins
//!   - `systems`: Scene construction and per-frame systems
//!   - `app`: Application setup

pub mod config;
pub mod stage;

pub use stage::{create_app, run};
