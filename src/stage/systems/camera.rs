//! Camera control system
//!
//! This module implements orbit camera controls that respond to mouse input,
//! allowing users to rotate, pan and zoom around the stage:
//! - Left button drag: rotate camera (azimuth/polar)
//! - Right button drag: pan the orbit target in screen space
//! - Scroll wheel: zoom (adjust distance)
//!
//! Distance and polar angle are clamped on every update, whatever the input
//! magnitude. Azimuth is free.

use std::f32::consts::{PI, TAU};

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit},
    math::Vec3,
    prelude::*,
    window::PrimaryWindow,
};

use crate::config::camera::PIXELS_PER_LINE;
use crate::stage::components::OrbitCamera;
use crate::stage::resources::{OrbitCameraState, OrbitInput, OrbitSettings};

/// Keeps the polar angle off the poles so `looking_at` stays well defined
const POLE_EPSILON: f32 = 1e-6;

impl OrbitCameraState {
    fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Queue a target translation for a screen-space drag of `delta` pixels
    fn pan(&mut self, delta: Vec2, viewport_height: f32, settings: &OrbitSettings) {
        let target_distance = self.offset().length() * (self.fov / 2.0).tan();
        let rotation = self.transform().rotation;
        let right = rotation * Vec3::X;

        let up = if settings.screen_space_panning {
            rotation * Vec3::Y
        } else {
            Vec3::Y.cross(right)
        };

        let left_distance = 2.0 * delta.x * target_distance / viewport_height;
        let up_distance = 2.0 * delta.y * target_distance / viewport_height;
        self.pan_offset += -right * left_distance + up * up_distance;
    }

    /// Fold one frame of pointer input into the pending deltas
    pub fn apply_input(&mut self, input: &OrbitInput, settings: &OrbitSettings) {
        let height = input.viewport_height;
        if height <= 0.0 {
            return;
        }

        if settings.enable_rotate && input.rotate != Vec2::ZERO {
            let delta = input.rotate * settings.rotate_speed;
            self.rotate_left(TAU * delta.x / height);
            self.rotate_up(TAU * delta.y / height);
        }

        if settings.enable_pan && input.pan != Vec2::ZERO {
            self.pan(input.pan * settings.pan_speed, height, settings);
        }

        if settings.enable_zoom && input.zoom != 0.0 {
            self.scale *= zoom_scale(settings).powf(input.zoom);
        }
    }

    /// Advance one frame: apply damped deltas and clamp
    pub fn update(&mut self, settings: &OrbitSettings) {
        let factor = if settings.enable_damping {
            settings.damping_factor
        } else {
            1.0
        };

        self.theta += self.delta_theta * factor;
        self.phi += self.delta_phi * factor;

        if settings.min_azimuth_angle.is_finite() && settings.max_azimuth_angle.is_finite() {
            self.theta = self
                .theta
                .clamp(settings.min_azimuth_angle, settings.max_azimuth_angle);
        }

        self.phi = self
            .phi
            .clamp(settings.min_polar_angle, settings.max_polar_angle)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);

        self.radius = (self.radius * self.scale).clamp(settings.min_distance, settings.max_distance);

        self.target += self.pan_offset * factor;

        if settings.enable_damping {
            let keep = 1.0 - settings.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
    }
}

/// Distance multiplier for one wheel notch toward the target
fn zoom_scale(settings: &OrbitSettings) -> f32 {
    0.95f32.powf(settings.zoom_speed)
}

/// Collect this frame's mouse input
pub fn gather_orbit_input(
    motion: Option<Res<AccumulatedMouseMotion>>,
    scroll: Option<Res<AccumulatedMouseScroll>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut input: ResMut<OrbitInput>,
) {
    *input = OrbitInput::default();

    let Ok(window) = window.single() else {
        return;
    };
    input.viewport_height = window.height();

    if let (Some(motion), Some(buttons)) = (motion, buttons) {
        if buttons.pressed(MouseButton::Left) {
            input.rotate = motion.delta;
        } else if buttons.pressed(MouseButton::Right) {
            input.pan = motion.delta;
        }
    }

    if let Some(scroll) = scroll {
        input.zoom = match scroll.unit {
            MouseScrollUnit::Line => scroll.delta.y,
            MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
        };
    }
}

/// Update camera transform based on orbit state
pub fn update_orbit_camera(
    input: Res<OrbitInput>,
    settings: Res<OrbitSettings>,
    mut orbit_state: ResMut<OrbitCameraState>,
    mut camera_query: Query<&mut Transform, With<OrbitCamera>>,
) {
    orbit_state.apply_input(&input, &settings);
    orbit_state.update(&settings);

    for mut transform in camera_query.iter_mut() {
        *transform = orbit_state.transform();
    }
}
