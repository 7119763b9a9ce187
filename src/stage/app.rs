//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::prelude::*;

use crate::config::window::TITLE;
use crate::stage::plugins::OrbitControlsPlugin;
use crate::stage::resources::FrameAnimator;
use crate::stage::systems::*;

/// Create and configure the Bevy application
pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: TITLE.into(),
            ..default()
        }),
        ..default()
    }));

    // Add custom plugins
    app.add_plugins(OrbitControlsPlugin);

    // Insert resources
    app.insert_resource(FrameAnimator::default());

    // Register systems
    app.add_systems(Startup, setup_scene);
    app.add_systems(
        Update,
        (advance_frame_animations, sync_euler_rotations).chain(),
    );
    app.add_systems(Update, (drift_cloud_puffs, float_bob, twinkle_stars));
    app.add_systems(
        Update,
        face_camera
            .after(update_orbit_camera)
            .after(drift_cloud_puffs),
    );

    info!("App configured");
    app
}

/// Build the app and run it until the window closes
pub fn run() -> AppExit {
    let mut app = create_app();
    info!("Running render loop...");
    app.run()
}
