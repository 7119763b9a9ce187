//! Floating motion
//!
//! Slow bobbing and swaying of a group around its base translation.

use bevy::{math::EulerRot, prelude::*, time::Time};

use crate::stage::components::FloatMotion;

impl FloatMotion {
    /// Rotation and translation at `elapsed` seconds
    pub fn pose(&self, elapsed: f32) -> (Quat, Vec3) {
        let t = (self.offset + elapsed) / 4.0 * self.speed;
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            t.cos() / 8.0 * self.rotation_intensity,
            t.sin() / 8.0 * self.rotation_intensity,
            t.sin() / 20.0 * self.rotation_intensity,
        );

        // Remap [-0.1, 0.1] onto the floating range.
        let bob = t.sin() / 10.0;
        let [low, high] = self.floating_range.to_array();
        let mapped = low + (bob + 0.1) / 0.2 * (high - low);

        let translation = self.base + Vec3::Y * mapped * self.float_intensity;
        (rotation, translation)
    }
}

/// Apply floating motion to every floater
pub fn float_bob(time: Res<Time>, mut query: Query<(&FloatMotion, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (motion, mut transform) in query.iter_mut() {
        let (rotation, translation) = motion.pose(elapsed);
        transform.rotation = rotation;
        transform.translation = translation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motion() -> FloatMotion {
        FloatMotion {
            speed: 1.0,
            rotation_intensity: 1.0,
            float_intensity: 1.0,
            floating_range: Vec2::new(-0.1, 0.1),
            offset: 1234.5,
            base: Vec3::new(-5.0, 0.0, 0.0),
        }
    }

    #[test]
    fn bob_stays_within_range() {
        let motion = motion();
        for step in 0..200 {
            let (_, translation) = motion.pose(step as f32 * 0.5);
            assert!((translation.y).abs() <= 0.1 + 1e-6);
            assert_eq!(translation.x, -5.0);
            assert_eq!(translation.z, 0.0);
        }
    }

    #[test]
    fn sway_is_gentle() {
        let motion = motion();
        for step in 0..200 {
            let (rotation, _) = motion.pose(step as f32 * 0.5);
            assert!(rotation.angle_between(Quat::IDENTITY) < 0.25);
        }
    }

    #[test]
    fn range_is_remapped() {
        let mut motion = motion();
        motion.floating_range = Vec2::new(0.0, 1.0);
        for step in 0..50 {
            let (_, translation) = motion.pose(step as f32);
            assert!((-1e-6..=1.0 + 1e-6).contains(&translation.y));
        }
    }
}
