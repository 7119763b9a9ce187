//! Animation systems
//!
//! This module contains the per-frame rotation updates of the scene. Each
//! registered track advances its node by a fixed step every rendered frame,
//! independent of frame duration.

use bevy::{math::EulerRot, prelude::*};

use crate::config::animation::{SPOTLIGHT_RING_STEP, STAR_FIELD_STEP};
use crate::stage::components::EulerRotation;
use crate::stage::resources::FrameAnimator;

/// Star field drifts in pitch and yaw
pub fn spin_star_field(rotation: &mut EulerRotation) {
    rotation.0.x += STAR_FIELD_STEP;
    rotation.0.y += STAR_FIELD_STEP;
}

/// Spotlight ring turns around the vertical axis
pub fn spin_spotlight_ring(rotation: &mut EulerRotation) {
    rotation.0.y += SPOTLIGHT_RING_STEP;
}

/// Run every registered track once
///
/// Tracks whose node is gone, or not spawned yet, are skipped for this frame.
pub fn advance_frame_animations(
    animator: Res<FrameAnimator>,
    mut rotations: Query<&mut EulerRotation>,
) {
    for track in animator.tracks() {
        let Ok(mut rotation) = rotations.get_mut(track.target) else {
            continue;
        };
        (track.step)(&mut rotation);
    }
}

/// Mirror changed Euler angles into the node transforms
pub fn sync_euler_rotations(
    mut query: Query<(&EulerRotation, &mut Transform), Changed<EulerRotation>>,
) {
    for (rotation, mut transform) in query.iter_mut() {
        let angles = rotation.0.as_vec3();
        transform.rotation = Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z);
    }
}
