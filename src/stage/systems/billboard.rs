//! Billboard system
//!
//! Keeps billboard nodes facing the orbit camera.

use bevy::prelude::*;

use crate::stage::components::{Billboard, OrbitCamera};

/// Local rotation that makes a child of `parent_rotation` face the camera
pub fn facing_rotation(parent_rotation: Quat, camera_rotation: Quat, roll: f32) -> Quat {
    parent_rotation.inverse() * camera_rotation * Quat::from_rotation_z(roll)
}

/// Copy the camera orientation onto every following billboard
///
/// Parent orientation comes from last frame's propagated transforms.
pub fn face_camera(
    camera: Query<&Transform, (With<OrbitCamera>, Without<Billboard>)>,
    mut billboards: Query<(&Billboard, &mut Transform, Option<&ChildOf>)>,
    parents: Query<&GlobalTransform>,
) {
    let Ok(camera) = camera.single() else {
        return;
    };

    for (billboard, mut transform, child_of) in billboards.iter_mut() {
        if !billboard.follow {
            continue;
        }
        let parent_rotation = child_of
            .and_then(|child_of| parents.get(child_of.parent()).ok())
            .map(|parent| parent.compute_transform().rotation)
            .unwrap_or(Quat::IDENTITY);
        transform.rotation = facing_rotation(parent_rotation, camera.rotation, billboard.roll);
    }
}
