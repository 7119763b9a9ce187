//! Star particle field
//!
//! Generates the star layout and packs every star into a single mesh so the
//! whole field rotates as one node.

use std::f32::consts::TAU;

use bevy::{
    asset::RenderAssetUsages,
    color::ColorToComponents,
    mesh::{Indices, PrimitiveTopology},
    prelude::*,
    time::Time,
};
use rand::Rng;

use crate::config::stars::STAR_WORLD_SCALE;
use crate::stage::components::{StarField, StarSprites};

/// One generated star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub color: Color,
    pub size: f32,
}

impl StarField {
    /// Field configured from `config::stars`
    pub fn configured() -> Self {
        use crate::config::stars::*;
        Self {
            count: COUNT,
            radius: RADIUS,
            depth: DEPTH,
            factor: FACTOR,
            saturation: SATURATION,
            fade: FADE,
            speed: SPEED,
        }
    }

    /// Lay out the stars in a spherical shell
    ///
    /// The radius starts at the outer edge and shrinks by a random fraction of
    /// `depth / count` per star, so every star stays within
    /// `[radius, radius + depth]`.
    pub fn generate(&self, rng: &mut impl Rng) -> Vec<Star> {
        let mut r = self.radius + self.depth;
        let increment = self.depth / self.count as f32;
        (0..self.count)
            .map(|i| {
                r -= increment * rng.random::<f32>();
                let phi = (1.0 - rng.random::<f32>() * 2.0).clamp(-1.0, 1.0).acos();
                let theta = rng.random::<f32>() * TAU;
                Star {
                    position: spherical_to_cartesian(r, phi, theta),
                    color: Color::hsl(
                        i as f32 / self.count as f32 * 360.0,
                        self.saturation,
                        crate::config::stars::LIGHTNESS,
                    ),
                    size: (0.5 + 0.5 * rng.random::<f32>()) * self.factor,
                }
            })
            .collect()
    }
}

/// `phi` from +Y, `theta` around Y from +Z
fn spherical_to_cartesian(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi_radius = phi.sin() * radius;
    Vec3::new(
        sin_phi_radius * theta.sin(),
        phi.cos() * radius,
        sin_phi_radius * theta.cos(),
    )
}

/// Quad axes of every star: three mutually orthogonal planes
const AXES: [(Vec3, Vec3); 3] = [(Vec3::X, Vec3::Y), (Vec3::Y, Vec3::Z), (Vec3::Z, Vec3::X)];

/// Center plus four corners per quad
const VERTICES_PER_QUAD: usize = 5;

/// Size pulse at `elapsed` seconds, averaging 1 over a period
pub fn twinkle_scale(elapsed: f32, speed: f32) -> f32 {
    (3.0 + (elapsed * speed + 100.0).sin()) / 3.0
}

/// Vertex positions of the glow quads with every star scaled by `scale`
pub fn star_positions(stars: &[Star], scale: f32) -> Vec<[f32; 3]> {
    let mut positions = Vec::with_capacity(stars.len() * AXES.len() * VERTICES_PER_QUAD);
    for star in stars {
        let half = star.size * STAR_WORLD_SCALE * scale;
        for (u, v) in AXES {
            let (u, v) = (u * half, v * half);
            positions.push(star.position.to_array());
            for corner in [-u - v, u - v, u + v, -u + v] {
                positions.push((star.position + corner).to_array());
            }
        }
    }
    positions
}

/// Pack stars into one mesh of soft glow quads
///
/// Each star is three orthogonal quads fanned around an opaque center
/// vertex. With `fade` the corners are fully transparent, which reads as a
/// round soft point under additive blending. The mesh stays in the main
/// world so `twinkle_stars` can rewrite its positions.
pub fn star_mesh(stars: &[Star], fade: bool) -> Mesh {
    let vertex_count = stars.len() * AXES.len() * VERTICES_PER_QUAD;
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(vertex_count);
    let mut indices: Vec<u32> = Vec::with_capacity(stars.len() * AXES.len() * 12);

    let corner_alpha = if fade { 0.0 } else { 1.0 };

    for star in stars {
        let [r, g, b, _] = LinearRgba::from(star.color).to_f32_array();
        for _ in AXES {
            let base = colors.len() as u32;
            colors.push([r, g, b, 1.0]);
            colors.extend(std::iter::repeat_n([r, g, b, corner_alpha], 4));
            for k in 0..4 {
                indices.extend_from_slice(&[base, base + 1 + k, base + 1 + (k + 1) % 4]);
            }
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, star_positions(stars, 1.0))
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(indices))
}

/// Pulse every star's size with elapsed time
pub fn twinkle_stars(
    time: Res<Time>,
    fields: Query<(&StarField, &StarSprites, &Mesh3d)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let elapsed = time.elapsed_secs();
    for (field, sprites, mesh) in fields.iter() {
        let Some(mesh) = meshes.get_mut(&mesh.0) else {
            continue;
        };
        let scale = twinkle_scale(elapsed, field.speed);
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            star_positions(&sprites.0, scale),
        );
    }
}

/// Unlit additive material that shows the vertex colors
pub fn star_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Add,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;
    use rand::{rngs::StdRng, SeedableRng};

    fn stars() -> Vec<Star> {
        StarField::configured().generate(&mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn generates_configured_count() {
        assert_eq!(stars().len(), 5000);
    }

    #[test]
    fn stars_stay_inside_the_shell() {
        for star in stars() {
            let r = star.position.length();
            assert!((100.0 - 1e-3..=150.0 + 1e-3).contains(&r), "radius {r}");
        }
    }

    #[test]
    fn sizes_scale_with_factor() {
        for star in stars() {
            assert!((2.5..=5.0).contains(&star.size), "size {}", star.size);
        }
    }

    #[test]
    fn hues_sweep_the_field() {
        let stars = stars();
        let Color::Hsla(first) = stars[0].color else {
            panic!("expected an HSL color");
        };
        let Color::Hsla(mid) = stars[2500].color else {
            panic!("expected an HSL color");
        };
        assert_eq!(first.hue, 0.0);
        assert!((mid.hue - 180.0).abs() < 1e-3);
        assert_eq!(mid.saturation, 1.0);
        assert_eq!(mid.lightness, 0.9);
    }

    #[test]
    fn same_seed_same_layout() {
        let field = StarField::configured();
        let a = field.generate(&mut StdRng::seed_from_u64(42));
        let b = field.generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn mesh_has_three_quads_per_star() {
        let stars = &stars()[..10];
        let mesh = star_mesh(stars, true);
        assert_eq!(mesh.count_vertices(), 10 * 3 * 5);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(10 * 3 * 12));
    }

    #[test]
    fn fade_clears_corner_alpha() {
        let stars = &stars()[..1];
        for (fade, corner) in [(true, 0.0), (false, 1.0)] {
            let mesh = star_mesh(stars, fade);
            let Some(VertexAttributeValues::Float32x4(colors)) =
                mesh.attribute(Mesh::ATTRIBUTE_COLOR)
            else {
                panic!("missing vertex colors");
            };
            assert_eq!(colors[0][3], 1.0);
            assert_eq!(colors[1][3], corner);
        }
    }

    #[test]
    fn twinkle_pulses_between_two_thirds_and_four_thirds() {
        for step in 0..100 {
            let scale = twinkle_scale(step as f32 * 0.37, 1.0);
            assert!((2.0 / 3.0 - 1e-6..=4.0 / 3.0 + 1e-6).contains(&scale));
        }
        assert!((twinkle_scale(0.0, 1.0) - (3.0 + 100f32.sin()) / 3.0).abs() < 1e-6);
        // Speed scales time.
        assert_eq!(twinkle_scale(2.0, 0.5), twinkle_scale(1.0, 1.0));
    }

    #[test]
    fn twinkle_rewrites_corner_offsets_from_time() {
        let stars: Vec<Star> = stars()[..3].to_vec();
        let field = StarField::configured();

        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<Assets<Mesh>>()
            .add_systems(Update, twinkle_stars);
        let handle = app
            .world_mut()
            .resource_mut::<Assets<Mesh>>()
            .add(star_mesh(&stars, true));
        app.world_mut()
            .spawn((field.clone(), StarSprites(stars.clone()), Mesh3d(handle.clone())));

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(std::time::Duration::from_secs(2));
        app.update();

        let scale = twinkle_scale(2.0, field.speed);
        let meshes = app.world().resource::<Assets<Mesh>>();
        let Some(VertexAttributeValues::Float32x3(positions)) = meshes
            .get(&handle)
            .and_then(|mesh| mesh.attribute(Mesh::ATTRIBUTE_POSITION))
        else {
            panic!("missing positions");
        };
        assert_eq!(*positions, star_positions(&stars, scale));

        let center = Vec3::from_array(positions[0]);
        let corner = Vec3::from_array(positions[1]);
        let half = stars[0].size * STAR_WORLD_SCALE * scale;
        assert!(((corner - center).length() - half * 2f32.sqrt()).abs() < 1e-4);
        assert_eq!(center, stars[0].position);
    }
}
