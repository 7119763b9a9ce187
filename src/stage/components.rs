//! Bevy component definitions
//!
//! This module contains all component markers and data structures used
//! to tag and identify entities of the backstage scene.

use bevy::{math::DVec3, prelude::*};

use crate::stage::systems::stars::Star;

/// Marker component for the camera driven by the orbit controls
#[derive(Component)]
pub struct OrbitCamera;

/// Marker component for the offscreen cameras that rasterize text labels
#[derive(Component)]
pub struct LabelCamera;

/// Authoritative XYZ Euler angles of an animated node
///
/// Angles are kept in f64 and never normalized, so repeated per-frame
/// increments accumulate exactly. `sync_euler_rotations` mirrors them into
/// the node's `Transform`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerRotation(pub DVec3);

/// Star particle field parameters
#[derive(Component, Debug, Clone, PartialEq)]
pub struct StarField {
    pub count: usize,
    pub radius: f32,
    pub depth: f32,
    pub factor: f32,
    pub saturation: f32,
    pub fade: bool,
    pub speed: f32,
}

/// Generated stars backing the field's mesh, kept for the size pulse
#[derive(Component, Debug, Clone, PartialEq)]
pub struct StarSprites(pub Vec<Star>);

/// Marker component for the group that carries the spotlights
#[derive(Component)]
pub struct SpotlightRing;

/// Visible light cone attached to a ring spotlight
#[derive(Component)]
pub struct SpotlightVolume;

/// Translucent cloud volume parameters
///
/// `rotate` holds per-axis rotation increments as constant parameters; no
/// system applies them.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CloudVolume {
    pub opacity: f32,
    pub scale: f32,
    pub fade: f32,
    pub rotate: Vec3,
}

/// One puff of the cloud volume
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CloudPuff {
    /// In-plane roll added every frame
    pub spin: f32,
}

/// Node whose orientation is recomputed every frame to face the camera
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Billboard {
    /// Only nodes that follow are reoriented
    pub follow: bool,
    /// In-plane rotation applied after facing the camera
    pub roll: f32,
}

impl Default for Billboard {
    fn default() -> Self {
        Self {
            follow: true,
            roll: 0.0,
        }
    }
}

/// Marker component for the group holding the two text labels
#[derive(Component)]
pub struct TextBillboard;

/// A rendered text label
#[derive(Component, Debug, Clone, PartialEq)]
pub struct TextLabel(pub String);

/// Gentle floating motion around a base translation
#[derive(Component, Debug, Clone, PartialEq)]
pub struct FloatMotion {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    pub floating_range: Vec2,
    /// Random phase so several floaters do not move in lockstep
    pub offset: f32,
    pub base: Vec3,
}
