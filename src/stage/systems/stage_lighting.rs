//! Studio stage lighting
//!
//! A generated studio cube map for image-based lighting, plus a key
//! spotlight and a fill point light placed relative to the scene bounds.

use bevy::{
    asset::{Assets, RenderAssetUsages},
    image::Image,
    light::EnvironmentMapLight,
    math::Vec3,
    prelude::*,
    render::render_resource::{
        Extent3d, TextureDimension, TextureFormat, TextureViewDescriptor, TextureViewDimension,
    },
};

use crate::config::stage::*;

/// Cube face order of the texture array: +X, -X, +Y, -Y, +Z, -Z
const FACES: usize = 6;

/// Direction through texel `(u, v)` of a cube face, with `u, v` in `[-1, 1]`
pub fn cube_direction(face: usize, u: f32, v: f32) -> Vec3 {
    let direction = match face {
        0 => Vec3::new(1.0, -v, -u),
        1 => Vec3::new(-1.0, -v, u),
        2 => Vec3::new(u, 1.0, v),
        3 => Vec3::new(u, -1.0, -v),
        4 => Vec3::new(u, -v, 1.0),
        _ => Vec3::new(-u, -v, -1.0),
    };
    direction.normalize()
}

/// Studio radiance seen along `direction`: dark floor, soft horizon and a
/// bright overhead softbox
pub fn studio_radiance(direction: Vec3) -> f32 {
    let y = direction.y;
    if y < 0.0 {
        environment::FLOOR + (environment::HORIZON - environment::FLOOR) * (1.0 + y)
    } else {
        let softbox = y.powi(4);
        environment::HORIZON + (environment::SOFTBOX - environment::HORIZON) * softbox
    }
}

/// Six-layer cube map image filled with the studio gradient
pub fn studio_cube_map(size: u32) -> Image {
    let mut data = Vec::with_capacity((size * size * 4) as usize * FACES);
    for face in 0..FACES {
        for y in 0..size {
            for x in 0..size {
                let u = (x as f32 + 0.5) / size as f32 * 2.0 - 1.0;
                let v = (y as f32 + 0.5) / size as f32 * 2.0 - 1.0;
                let value = (studio_radiance(cube_direction(face, u, v)) * 255.0) as u8;
                data.extend_from_slice(&[value, value, value, 255]);
            }
        }
    }

    let mut image = Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: FACES as u32,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    image
}

/// Image-based light for the camera
pub fn studio_environment(images: &mut Assets<Image>) -> EnvironmentMapLight {
    let cube = images.add(studio_cube_map(environment::FACE_SIZE));
    EnvironmentMapLight {
        diffuse_map: cube.clone(),
        specular_map: cube,
        intensity: environment::INTENSITY * INTENSITY,
        ..default()
    }
}

/// Key spotlight and fill point light around a scene of `bounds_radius`
pub fn spawn_stage_lights(commands: &mut Commands, bounds_radius: f32) {
    let range = bounds_radius * RANGE_FACTOR;

    commands.spawn((
        Name::new("stage_key"),
        SpotLight {
            intensity: KEY_INTENSITY * INTENSITY * LUMENS_PER_UNIT,
            range,
            shadows_enabled: true,
            outer_angle: KEY_ANGLE,
            inner_angle: 0.0,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(KEY_POSITION) * bounds_radius)
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("stage_fill"),
        PointLight {
            intensity: FILL_INTENSITY * INTENSITY * LUMENS_PER_UNIT,
            range,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(FILL_POSITION) * bounds_radius),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_centers_point_along_the_axes() {
        let axes = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
        for (face, axis) in axes.into_iter().enumerate() {
            assert!((cube_direction(face, 0.0, 0.0) - axis).length() < 1e-6);
        }
    }

    #[test]
    fn softbox_is_brighter_than_the_floor() {
        let top = studio_radiance(Vec3::Y);
        let horizon = studio_radiance(Vec3::X);
        let floor = studio_radiance(Vec3::NEG_Y);
        assert_eq!(top, environment::SOFTBOX);
        assert_eq!(horizon, environment::HORIZON);
        assert_eq!(floor, environment::FLOOR);
        assert!(top > horizon && horizon > floor);
    }

    #[test]
    fn cube_map_has_six_layers() {
        let image = studio_cube_map(4);
        assert_eq!(image.texture_descriptor.size.depth_or_array_layers, 6);
        assert_eq!(image.data.as_ref().map(|d| d.len()), Some(4 * 4 * 4 * 6));
        assert_eq!(
            image
                .texture_view_descriptor
                .as_ref()
                .and_then(|d| d.dimension),
            Some(TextureViewDimension::Cube)
        );
    }

    #[test]
    fn lights_scale_with_scene_bounds() {
        let mut app = App::new();
        app.add_systems(Startup, |mut commands: Commands| {
            spawn_stage_lights(&mut commands, 150.0)
        });
        app.update();
        let world = app.world_mut();

        let (key, key_transform) = world
            .query::<(&SpotLight, &Transform)>()
            .single(world)
            .unwrap();
        assert!(key.shadows_enabled);
        assert_eq!(key.intensity, 2.0 * LUMENS_PER_UNIT);
        assert!((key_transform.translation - Vec3::new(150.0, 300.0, 150.0)).length() < 1e-3);
        assert!(key.range > key_transform.translation.length());

        let (fill, fill_transform) = world
            .query::<(&PointLight, &Transform)>()
            .single(world)
            .unwrap();
        assert_eq!(fill.intensity, 0.5 * LUMENS_PER_UNIT);
        assert!((fill_transform.translation - Vec3::new(-300.0, -75.0, -300.0)).length() < 1e-3);
    }
}
