//! Orbit controls plugin
//!
//! Installs the orbit camera configuration, its state and the two systems
//! that turn pointer input into camera motion each frame. Any entity tagged
//! `OrbitCamera` is driven by it.

use bevy::prelude::*;

use crate::stage::resources::{OrbitCameraState, OrbitInput, OrbitSettings};
use crate::stage::systems::camera::{gather_orbit_input, update_orbit_camera};

pub struct OrbitControlsPlugin;

impl Plugin for OrbitControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitSettings>()
            .init_resource::<OrbitCameraState>()
            .init_resource::<OrbitInput>()
            .add_systems(
                Update,
                (gather_orbit_input, update_orbit_camera).chain(),
            );
        debug!("Orbit controls installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::components::OrbitCamera;

    #[test]
    fn keeps_existing_settings() {
        let custom = OrbitSettings {
            min_distance: 30.0,
            ..default()
        };
        let mut app = App::new();
        app.insert_resource(custom.clone());
        app.add_plugins(OrbitControlsPlugin);

        assert_eq!(*app.world().resource::<OrbitSettings>(), custom);
    }

    #[test]
    fn drives_tagged_camera_without_a_window() {
        let mut app = App::new();
        app.add_plugins(OrbitControlsPlugin);
        let camera = app
            .world_mut()
            .spawn((OrbitCamera, Transform::default()))
            .id();

        app.update();

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!((transform.translation - Vec3::new(0.0, 0.0, 50.0)).length() < 1e-3);
        assert_eq!(*app.world().resource::<OrbitInput>(), OrbitInput::default());
    }
}
