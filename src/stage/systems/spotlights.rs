//! Spotlight ring
//!
//! Eight shadow-casting spotlights evenly spaced on a horizontal circle,
//! each aiming at the origin and carrying a visible light cone.

use std::f64::consts::TAU;

use bevy::{
    asset::{Assets, RenderAssetUsages},
    math::{DVec3, Vec3},
    mesh::{Indices, PrimitiveTopology},
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
};

use crate::config::spotlights::*;
use crate::stage::components::SpotlightVolume;

/// Everything needed to spawn one spotlight
///
/// Building a spec is pure: identical inputs produce equal specs.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SpotlightSpec {
    pub name: String,
    pub position: Vec3,
    pub color: Color,
    pub angle: f32,
    pub penumbra: f32,
    pub intensity: f32,
    pub distance: f32,
    pub shadow_map_size: usize,
    pub shadow_bias: f32,
    pub shadow_near: f32,
    pub shadow_far: f32,
}

impl SpotlightSpec {
    /// Spotlight with the fixed stage shape at `(x, y, z)`
    pub fn new(name: impl Into<String>, x: f32, y: f32, z: f32, color: Color) -> Self {
        Self {
            name: name.into(),
            position: Vec3::new(x, y, z),
            color,
            angle: ANGLE,
            penumbra: PENUMBRA,
            intensity: INTENSITY,
            distance: DISTANCE,
            shadow_map_size: SHADOW_MAP_SIZE,
            shadow_bias: SHADOW_BIAS,
            shadow_near: SHADOW_NEAR,
            shadow_far: SHADOW_FAR,
        }
    }

    /// Half-angle of the lit cone
    ///
    /// Only the cosine of the configured angle is used, so values past a
    /// half turn fold back into `[0, PI]`.
    pub fn outer_angle(&self) -> f32 {
        self.angle.cos().acos()
    }

    /// Half-angle of the fully lit core, zero for a fully soft edge
    pub fn inner_angle(&self) -> f32 {
        (self.angle * (1.0 - self.penumbra)).cos().acos()
    }

    /// Engine light component for this spec
    ///
    /// The engine falls off with the inverse square of distance (a decay
    /// exponent of 2) and uses `range` as both the cutoff and the shadow far
    /// plane, so the nearer of `distance` and `shadow_far` wins.
    pub fn light(&self) -> SpotLight {
        SpotLight {
            color: self.color,
            intensity: self.intensity * LUMENS_PER_UNIT,
            range: self.distance.min(self.shadow_far),
            shadows_enabled: true,
            shadow_depth_bias: SpotLight::DEFAULT_SHADOW_DEPTH_BIAS + self.shadow_bias,
            shadow_map_near_z: self.shadow_near,
            outer_angle: self.outer_angle(),
            inner_angle: self.inner_angle(),
            ..default()
        }
    }
}

/// Shadow map resolution that satisfies every spec
///
/// The engine shares one shadow map size across all lights of a kind.
pub fn shadow_map_size(specs: &[SpotlightSpec]) -> usize {
    specs
        .iter()
        .map(|spec| spec.shadow_map_size)
        .max()
        .unwrap_or(SHADOW_MAP_SIZE)
}

/// Open cone from the light along -Z that fades out with distance
///
/// Rings are packed over the first `attenuation` units, where vertex alpha
/// drops as `1 - d / attenuation`; a last ring closes the cone at `length`.
pub fn volume_cone_mesh(
    length: f32,
    radius_top: f32,
    radius_bottom: f32,
    attenuation: f32,
) -> Mesh {
    let fade_end = attenuation.min(length);
    let mut distances: Vec<f32> = (0..=volume::FADE_RINGS)
        .map(|k| fade_end * k as f32 / volume::FADE_RINGS as f32)
        .collect();
    if length > fade_end {
        distances.push(length);
    }

    let segments = volume::SEGMENTS;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(distances.len() * segments);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(distances.len() * segments);
    for &d in &distances {
        let radius = radius_top + (radius_bottom - radius_top) * d / length;
        let alpha = volume_fade(d, attenuation);
        for s in 0..segments {
            let a = s as f32 / segments as f32 * std::f32::consts::TAU;
            positions.push([radius * a.cos(), radius * a.sin(), -d]);
            colors.push([1.0, 1.0, 1.0, alpha]);
        }
    }

    let mut indices: Vec<u32> = Vec::with_capacity((distances.len() - 1) * segments * 6);
    for ring in 0..distances.len() - 1 {
        let near = (ring * segments) as u32;
        let far = near + segments as u32;
        for s in 0..segments as u32 {
            let next = (s + 1) % segments as u32;
            indices.extend_from_slice(&[
                near + s,
                far + s,
                far + next,
                near + s,
                far + next,
                near + next,
            ]);
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(indices))
}

/// Beam opacity `d` units away from the light
pub fn volume_fade(d: f32, attenuation: f32) -> f32 {
    (1.0 - d / attenuation).clamp(0.0, 1.0)
}

/// Position and color of ring slot `index`
pub fn ring_slot(index: usize) -> (DVec3, Color) {
    let angle = index as f64 / COUNT as f64 * TAU;
    let position = DVec3::new(
        angle.sin() * RING_RADIUS,
        RING_HEIGHT,
        angle.cos() * RING_RADIUS,
    );
    (position, Color::hsl(slot_hue(index), 1.0, 0.5))
}

/// Hue of ring slot `index` in degrees
pub fn slot_hue(index: usize) -> f32 {
    (index as f32 * HUE_STEP) % 360.0
}

/// Specs for the whole ring
pub fn ring_specs() -> Vec<SpotlightSpec> {
    (0..COUNT)
        .map(|i| {
            let (position, color) = ring_slot(i);
            let position = position.as_vec3();
            SpotlightSpec::new(
                format!("spot_light_{i}"),
                position.x,
                position.y,
                position.z,
                color,
            )
        })
        .collect()
}

/// Spawn a spotlight and its light cone as children of `parent`
pub fn spawn_spotlight(
    commands: &mut Commands,
    parent: Entity,
    spec: SpotlightSpec,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let cone = commands
        .spawn((
            Mesh3d(meshes.add(volume_cone_mesh(
                spec.distance,
                volume::RADIUS_TOP,
                spec.angle * volume::RADIUS_BOTTOM_PER_ANGLE,
                volume::ATTENUATION,
            ))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: spec.color.with_alpha(volume::OPACITY),
                unlit: true,
                alpha_mode: AlphaMode::Add,
                double_sided: true,
                cull_mode: None,
                ..default()
            })),
            Transform::default(),
            SpotlightVolume,
        ))
        .id();

    let light = commands
        .spawn((
            Name::new(spec.name.clone()),
            spec.light(),
            Transform::from_translation(spec.position).looking_at(Vec3::ZERO, Vec3::Y),
            spec,
        ))
        .add_child(cone)
        .id();

    commands.entity(parent).add_child(light);
    light
}
