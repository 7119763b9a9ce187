//! Scene setup system
//!
//! This module handles the one-time construction of the stage: camera,
//! lights, star field, cloud, spotlight ring and text billboard. The two
//! animated nodes are registered with the frame animator here.

use bevy::{
    asset::Assets,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    light::{DirectionalLightShadowMap, EnvironmentMapLight, PointLightShadowMap},
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::{camera, spotlights, stage};
use crate::stage::components::{
    EulerRotation, OrbitCamera, SpotlightRing, StarField, StarSprites,
};
use crate::stage::resources::{FrameAnimator, OrbitCameraState, SceneSeed};
use crate::stage::systems::animation::{spin_spotlight_ring, spin_star_field};
use crate::stage::systems::cloud::spawn_cloud;
use crate::stage::systems::spotlights::{ring_specs, shadow_map_size, spawn_spotlight};
use crate::stage::systems::stage_lighting::{spawn_stage_lights, studio_environment};
use crate::stage::systems::stars::{star_material, star_mesh};
use crate::stage::systems::text::spawn_text_billboard;

/// Setup the 3D scene with camera, lights and decorations
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    mut animator: ResMut<FrameAnimator>,
    orbit_state: Res<OrbitCameraState>,
    seed: Option<Res<SceneSeed>>,
) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed.0),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let specs = ring_specs();
    let shadow_size = shadow_map_size(&specs);
    commands.insert_resource(DirectionalLightShadowMap { size: shadow_size });
    commands.insert_resource(PointLightShadowMap { size: shadow_size });

    // Camera driven by the orbit controls
    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: orbit_state.fov,
            near: camera::NEAR,
            far: camera::FAR,
            ..default()
        }),
        Tonemapping::None,
        AmbientLight {
            brightness: stage::AMBIENT_INTENSITY * stage::AMBIENT_BRIGHTNESS_PER_UNIT,
            ..default()
        },
        studio_environment(&mut images),
        orbit_state.transform(),
        OrbitCamera,
    ));

    spawn_stage_lights(&mut commands, stage::BOUNDS_RADIUS);

    // Star field
    let field = StarField::configured();
    let stars = field.generate(&mut rng);
    let star_count = stars.len();
    let star_field = commands
        .spawn((
            Name::new("stars"),
            Mesh3d(meshes.add(star_mesh(&stars, field.fade))),
            MeshMaterial3d(materials.add(star_material())),
            Transform::default(),
            EulerRotation::default(),
            field,
            StarSprites(stars),
        ))
        .id();
    animator.register(star_field, spin_star_field);

    spawn_cloud(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut images,
        &mut rng,
    );

    // Spotlight ring
    let ring = commands
        .spawn((
            Name::new("top_spotlights"),
            Transform::default(),
            Visibility::default(),
            EulerRotation::default(),
            SpotlightRing,
        ))
        .id();
    for spec in specs {
        spawn_spotlight(&mut commands, ring, spec, &mut meshes, &mut materials);
    }
    animator.register(ring, spin_spotlight_ring);

    spawn_text_billboard(&mut commands, &mut meshes, &mut materials, &mut images);

    info!(
        "Scene built: {} stars, {} spotlights",
        star_count,
        spotlights::COUNT
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::components::{CloudPuff, CloudVolume, TextLabel};
    use crate::stage::systems::animation::{advance_frame_animations, sync_euler_rotations};
    use crate::stage::systems::spotlights::SpotlightSpec;

    fn built_scene() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<FrameAnimator>()
            .init_resource::<OrbitCameraState>()
            .insert_resource(SceneSeed(11))
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (advance_frame_animations, sync_euler_rotations).chain(),
            );
        app
    }

    fn single<C: Component>(app: &mut App) -> Entity {
        let mut query = app.world_mut().query_filtered::<Entity, With<C>>();
        query.single(app.world()).unwrap()
    }

    #[test]
    fn builds_every_node() {
        let mut app = built_scene();
        app.update();
        let world = app.world_mut();

        assert_eq!(world.query::<&SpotlightSpec>().iter(world).count(), 8);
        assert_eq!(world.query::<&SpotLight>().iter(world).count(), 8);
        assert_eq!(world.query::<&CloudPuff>().iter(world).count(), 20);
        assert_eq!(world.query::<&CloudVolume>().iter(world).count(), 1);
        assert_eq!(world.query::<&OrbitCamera>().iter(world).count(), 1);

        let mut labels: Vec<String> = world
            .query::<&TextLabel>()
            .iter(world)
            .map(|label| label.0.clone())
            .collect();
        labels.sort();
        assert_eq!(labels, ["backstage", "systems"]);

        let field = world.query::<&StarField>().single(world).unwrap().clone();
        assert_eq!(field.count, 5000);
        assert!(field.fade);
        assert_eq!(field.radius + field.depth, stage::BOUNDS_RADIUS);

        let sprites = world.query::<&StarSprites>().single(world).unwrap();
        assert_eq!(sprites.0.len(), 5000);
    }

    #[test]
    fn camera_carries_the_studio_environment() {
        let mut app = built_scene();
        app.update();
        let camera = single::<OrbitCamera>(&mut app);

        let environment = app.world().get::<EnvironmentMapLight>(camera).unwrap();
        assert_eq!(environment.diffuse_map, environment.specular_map);
        assert!(environment.intensity > 0.0);
        assert!(app
            .world()
            .resource::<Assets<Image>>()
            .get(&environment.diffuse_map)
            .is_some());
    }

    #[test]
    fn stage_lights_sit_outside_the_star_shell() {
        let mut app = built_scene();
        app.update();
        let world = app.world_mut();

        let key = world
            .query::<(&Name, &SpotLight, &Transform)>()
            .iter(world)
            .find(|(name, _, _)| name.as_str() == "stage_key")
            .map(|(_, light, transform)| (light.shadows_enabled, transform.translation));
        let (shadows, position) = key.unwrap();
        assert!(shadows);
        assert!(position.length() > stage::BOUNDS_RADIUS);

        let shadow_map = world.resource::<DirectionalLightShadowMap>();
        assert_eq!(shadow_map.size, spotlights::SHADOW_MAP_SIZE);
    }

    #[test]
    fn spotlights_hang_from_the_ring() {
        let mut app = built_scene();
        app.update();
        let ring = single::<SpotlightRing>(&mut app);
        let world = app.world_mut();

        let mut specs: Vec<(SpotlightSpec, Entity)> = world
            .query::<(&SpotlightSpec, &ChildOf)>()
            .iter(world)
            .map(|(spec, child_of)| (spec.clone(), child_of.parent()))
            .collect();
        specs.sort_by(|a, b| a.0.name.cmp(&b.0.name));

        for (i, (spec, parent)) in specs.iter().enumerate() {
            assert_eq!(*parent, ring);
            assert_eq!(spec.name, format!("spot_light_{i}"));
            assert_eq!(spec.color, Color::hsl((i * 50 % 360) as f32, 1.0, 0.5));
        }
        let (four, _) = &specs[4];
        assert!((four.position - Vec3::new(0.0, 4.0, -10.0)).length() < 1e-5);
    }

    #[test]
    fn two_nodes_are_animated() {
        let mut app = built_scene();
        app.update();
        let stars = single::<StarField>(&mut app);
        let ring = single::<SpotlightRing>(&mut app);

        let targets: Vec<Entity> = app
            .world()
            .resource::<FrameAnimator>()
            .tracks()
            .iter()
            .map(|track| track.target)
            .collect();
        assert_eq!(targets, [stars, ring]);
    }

    #[test]
    fn thousand_frames_after_build() {
        let mut app = built_scene();
        // The startup frame advances too.
        for _ in 0..1000 {
            app.update();
        }
        let stars = single::<StarField>(&mut app);
        let ring = single::<SpotlightRing>(&mut app);

        let star_angles = app.world().get::<EulerRotation>(stars).unwrap().0;
        let ring_angles = app.world().get::<EulerRotation>(ring).unwrap().0;
        assert!((star_angles.x - 1.0).abs() < 1e-9);
        assert!((star_angles.y - 1.0).abs() < 1e-9);
        assert!((ring_angles.y - 1.0).abs() < 1e-9);
    }
}
