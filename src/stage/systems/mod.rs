//! Bevy systems
//!
//! This module contains all the systems that build and animate the
//! backstage scene.

pub mod scene;
pub mod stars;
pub mod cloud;
pub mod spotlights;
pub mod stage_lighting;
pub mod text;
pub mod camera;
pub mod animation;
pub mod billboard;
pub mod float;

pub use scene::setup_scene;
pub use camera::{gather_orbit_input, update_orbit_camera};
pub use animation::{advance_frame_animations, sync_euler_rotations};
pub use cloud::drift_cloud_puffs;
pub use billboard::face_camera;
pub use float::float_bob;
pub use stars::twinkle_stars;
