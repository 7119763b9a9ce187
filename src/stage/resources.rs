//! Bevy resource definitions
//!
//! This module contains all global resources used by the scene systems.
//! Resources are singleton data that can be accessed by any system.

use bevy::prelude::*;

use crate::config::camera::*;
use crate::config::stage::BOUNDS_RADIUS;
use crate::stage::components::EulerRotation;

// =============================================================================
// Frame Animation
// =============================================================================

/// A per-frame mutation applied to one node
#[derive(Clone, Copy)]
pub struct AnimationTrack {
    pub target: Entity,
    pub step: fn(&mut EulerRotation),
}

/// Explicit list of `(node, update)` pairs run once per rendered frame
#[derive(Resource, Default)]
pub struct FrameAnimator {
    tracks: Vec<AnimationTrack>,
}

impl FrameAnimator {
    /// Register `step` to run on `target` every frame
    pub fn register(&mut self, target: Entity, step: fn(&mut EulerRotation)) {
        self.tracks.push(AnimationTrack { target, step });
    }

    pub fn tracks(&self) -> &[AnimationTrack] {
        &self.tracks
    }
}

// =============================================================================
// Scene Construction
// =============================================================================

/// Fixed seed for the random parts of the scene (stars, cloud, float phase)
///
/// Without this resource every run picks a fresh layout.
#[derive(Resource, Clone, Copy, Debug)]
pub struct SceneSeed(pub u64);

// =============================================================================
// Camera Control
// =============================================================================

/// Orbit control configuration
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct OrbitSettings {
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub enable_rotate: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub screen_space_panning: bool,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_azimuth_angle: f32,
    pub max_azimuth_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enable_zoom: ENABLE_ZOOM,
            enable_pan: ENABLE_PAN,
            enable_rotate: ENABLE_ROTATE,
            enable_damping: ENABLE_DAMPING,
            damping_factor: DAMPING_FACTOR,
            rotate_speed: ROTATE_SPEED,
            zoom_speed: ZOOM_SPEED,
            pan_speed: PAN_SPEED,
            screen_space_panning: SCREEN_SPACE_PANNING,
            min_polar_angle: MIN_POLAR_ANGLE,
            max_polar_angle: MAX_POLAR_ANGLE,
            min_azimuth_angle: MIN_AZIMUTH_ANGLE,
            max_azimuth_angle: MAX_AZIMUTH_ANGLE,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
        }
    }
}

/// Pointer input gathered for the current frame, in pixels and wheel notches
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitInput {
    /// Drag delta while rotating
    pub rotate: Vec2,
    /// Drag delta while panning
    pub pan: Vec2,
    /// Wheel notches, positive zooms in
    pub zoom: f32,
    /// Height of the viewport the deltas were measured in
    pub viewport_height: f32,
}

/// Orbit camera state in spherical coordinates around a target
///
/// Uses the same convention as the rendering runtime: `phi` is the polar
/// angle from +Y, `theta` the azimuth around Y measured from +Z.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct OrbitCameraState {
    pub target: Vec3,
    pub theta: f32,
    pub phi: f32,
    pub radius: f32,
    /// Pending azimuth change, drained by damping
    pub delta_theta: f32,
    /// Pending polar change, drained by damping
    pub delta_phi: f32,
    /// Pending distance multiplier for the next update
    pub scale: f32,
    /// Pending target translation, drained by damping
    pub pan_offset: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
}

impl OrbitCameraState {
    pub fn from_position(position: Vec3, target: Vec3, fov: f32) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let (theta, phi) = if radius == 0.0 {
            (0.0, 0.0)
        } else {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        };
        Self {
            target,
            theta,
            phi,
            radius,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            fov,
        }
    }

    /// Move along the current view direction until a sphere of
    /// `bounds_radius` around the target fits the vertical field of view
    ///
    /// Distance bounds are not applied here; the next `update` clamps.
    pub fn fit_to_bounds(&mut self, bounds_radius: f32, margin: f32) {
        self.radius = fit_distance(bounds_radius, self.fov, margin);
    }

    /// Camera offset from the target
    pub fn offset(&self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Camera world position
    pub fn position(&self) -> Vec3 {
        self.target + self.offset()
    }

    /// Camera transform looking at the target
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

/// Camera distance at which a sphere of `bounds_radius` fills the view
pub fn fit_distance(bounds_radius: f32, fov: f32, margin: f32) -> f32 {
    margin * 2.0 * bounds_radius / (2.0 * (fov / 2.0).atan())
}

/// Starts looking down -Z, fitted to the whole stage
impl Default for OrbitCameraState {
    fn default() -> Self {
        let mut state = Self::from_position(
            Vec3::from_array(INITIAL_POSITION),
            Vec3::ZERO,
            FOV_DEGREES.to_radians(),
        );
        state.fit_to_bounds(BOUNDS_RADIUS, FIT_MARGIN);
        state
    }
}
