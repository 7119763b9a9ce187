//! Cloud volume
//!
//! A stack of translucent billboard puffs that slowly roll in place,
//! wrapped in a floating group.

use std::f32::consts::PI;

use bevy::{
    asset::{Assets, RenderAssetUsages},
    image::Image,
    math::primitives::Rectangle,
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat},
};
use rand::Rng;

use crate::config::cloud::*;
use crate::stage::components::{Billboard, CloudPuff, CloudVolume, FloatMotion};

/// Layout of one puff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuffLayout {
    pub position: Vec3,
    pub scale: f32,
    pub density: f32,
    pub spin: f32,
}

impl PuffLayout {
    /// Puff opacity given the volume's base opacity
    pub fn opacity(&self, base: f32) -> f32 {
        self.scale / 6.0 * self.density * base
    }
}

/// Random puff layout, centered on its bounding box
pub fn puff_layout(segments: usize, rng: &mut impl Rng) -> Vec<PuffLayout> {
    let mut puffs: Vec<PuffLayout> = (0..segments)
        .map(|index| {
            let x = WIDTH / 2.0 - rng.random::<f32>() * WIDTH;
            let y = WIDTH / 2.0 - rng.random::<f32>() * WIDTH;
            let z = segments as f32 / 2.0 * DEPTH - index as f32 * DEPTH;
            let swell = ((index + 1) as f32 / segments as f32 * PI).sin();
            PuffLayout {
                position: Vec3::new(x, y, z),
                scale: 0.4 + swell * ((0.2 + rng.random::<f32>()) * 10.0),
                density: rng.random::<f32>().max(0.2),
                spin: (0.005 * rng.random::<f32>()).max(0.002) * SPEED,
            }
        })
        .collect();

    let offset = bounding_center(puffs.iter().map(|p| p.position));
    for puff in &mut puffs {
        puff.position -= offset;
    }
    puffs
}

fn bounding_center(points: impl Iterator<Item = Vec3>) -> Vec3 {
    let (min, max) = points.fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(min, max), p| (min.min(p), max.max(p)),
    );
    if min.x.is_finite() {
        (min + max) / 2.0
    } else {
        Vec3::ZERO
    }
}

/// Soft white disc with alpha falling off toward the rim
pub fn puff_texture(size: u32) -> Image {
    let center = (size as f32 - 1.0) / 2.0;
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let d = Vec2::new(x as f32 - center, y as f32 - center).length() / (center + 0.5);
            let falloff = (1.0 - d).clamp(0.0, 1.0);
            data.extend_from_slice(&[255, 255, 255, (falloff * falloff * 255.0) as u8]);
        }
    }
    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

/// Spawn the floating cloud volume and its puffs
pub fn spawn_cloud(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    rng: &mut impl Rng,
) -> Entity {
    let texture = images.add(puff_texture(PUFF_TEXTURE_SIZE));
    let quad = meshes.add(Rectangle::new(1.0, 1.0));

    let base = Vec3::from_array(float::POSITION);
    let floater = commands
        .spawn((
            Name::new("cloud_float"),
            Transform::from_translation(base),
            Visibility::default(),
            FloatMotion {
                speed: float::SPEED,
                rotation_intensity: float::ROTATION_INTENSITY,
                float_intensity: float::FLOAT_INTENSITY,
                floating_range: Vec2::from_array(float::FLOATING_RANGE),
                offset: rng.random::<f32>() * float::MAX_OFFSET,
                base,
            },
        ))
        .id();

    let volume = CloudVolume {
        opacity: OPACITY,
        scale: SCALE,
        fade: FADE,
        rotate: Vec3::from_array(ROTATE),
    };

    let puffs: Vec<Entity> = puff_layout(SEGMENTS, rng)
        .into_iter()
        .map(|puff| {
            commands
                .spawn((
                    Mesh3d(quad.clone()),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: Color::WHITE.with_alpha(puff.opacity(volume.opacity)),
                        base_color_texture: Some(texture.clone()),
                        alpha_mode: AlphaMode::Blend,
                        double_sided: true,
                        cull_mode: None,
                        ..default()
                    })),
                    Transform::from_translation(puff.position).with_scale(Vec3::splat(puff.scale)),
                    Billboard::default(),
                    CloudPuff { spin: puff.spin },
                ))
                .id()
        })
        .collect();

    let cloud = commands
        .spawn((
            Name::new("cloud"),
            Transform::from_scale(Vec3::splat(volume.scale)),
            Visibility::default(),
            volume,
        ))
        .add_children(&puffs)
        .id();

    commands.entity(floater).add_child(cloud);
    cloud
}

/// Roll every puff in its own plane
pub fn drift_cloud_puffs(mut puffs: Query<(&CloudPuff, &mut Billboard)>) {
    for (puff, mut billboard) in puffs.iter_mut() {
        billboard.roll += puff.spin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn layout() -> Vec<PuffLayout> {
        puff_layout(SEGMENTS, &mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn layout_has_one_puff_per_segment() {
        assert_eq!(layout().len(), 20);
    }

    #[test]
    fn layout_is_centered() {
        let center = bounding_center(layout().iter().map(|p| p.position));
        assert!(center.length() < 1e-4);
    }

    #[test]
    fn puffs_are_spaced_in_depth() {
        let puffs = layout();
        for pair in puffs.windows(2) {
            assert!((pair[0].position.z - pair[1].position.z - DEPTH).abs() < 1e-4);
        }
    }

    #[test]
    fn puff_parameters_stay_in_range() {
        for puff in layout() {
            assert!(puff.density >= 0.2 && puff.density <= 1.0);
            assert!(puff.spin >= 0.002 && puff.spin <= 0.005);
            assert!(puff.scale >= 0.4);
            assert!(puff.opacity(OPACITY) < OPACITY * 3.0);
        }
    }

    #[test]
    fn texture_is_opaque_in_the_middle_and_clear_at_the_corner() {
        let image = puff_texture(16);
        let data = image.data.as_ref().unwrap();
        assert_eq!(data.len(), 16 * 16 * 4);
        assert_eq!(data[3], 0);
        let middle = ((8 * 16 + 8) * 4 + 3) as usize;
        assert!(data[middle] > 200);
    }

    #[test]
    fn puffs_roll_every_frame() {
        let mut app = App::new();
        app.add_systems(Update, drift_cloud_puffs);
        let puff = app
            .world_mut()
            .spawn((CloudPuff { spin: 0.004 }, Billboard::default()))
            .id();

        app.update();
        app.update();

        let roll = app.world().get::<Billboard>(puff).unwrap().roll;
        assert!((roll - 0.008).abs() < 1e-6);
    }
}
