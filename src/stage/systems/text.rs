//! Text billboard
//!
//! Each label is rasterized by its own offscreen UI camera into an image,
//! then shown on a metallic quad inside a camera-facing group.

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    color::palettes::css::{RED, SILVER},
    image::{BevyDefault as _, Image},
    math::primitives::Rectangle,
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::render_resource::TextureFormat,
};

use crate::config::text::*;
use crate::stage::components::{Billboard, LabelCamera, TextBillboard, TextLabel};

/// Physically shaded metal used for a label
pub fn metal_material(color: Color, texture: Option<Handle<Image>>) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        base_color_texture: texture,
        metallic: METALLIC,
        perceptual_roughness: ROUGHNESS,
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

/// World-space size of a label quad
pub fn label_quad_size() -> Vec2 {
    Vec2::new(
        QUAD_HEIGHT * TEXTURE_WIDTH as f32 / TEXTURE_HEIGHT as f32,
        QUAD_HEIGHT,
    )
}

/// Render `text` into a fresh image and return its handle
///
/// `order` must be unique among cameras; label cameras render before the
/// main camera.
fn rasterize_label(
    commands: &mut Commands,
    images: &mut Assets<Image>,
    text: &str,
    order: isize,
) -> Handle<Image> {
    let image = images.add(Image::new_target_texture(
        TEXTURE_WIDTH,
        TEXTURE_HEIGHT,
        TextureFormat::bevy_default(),
    ));

    let camera = commands
        .spawn((
            Camera2d,
            Camera {
                target: RenderTarget::Image(image.clone().into()),
                clear_color: ClearColorConfig::Custom(Color::NONE),
                order,
                ..default()
            },
            LabelCamera,
        ))
        .id();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            UiTargetCamera(camera),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(text),
                TextFont {
                    font_size: FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });

    image
}

/// Spawn the camera-facing group with both labels
pub fn spawn_text_billboard(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
) -> Entity {
    let size = label_quad_size();
    let quad = meshes.add(Rectangle::new(size.x, size.y));

    let labels = [
        (UPPER_LABEL, Color::from(RED), Vec3::ZERO, -2),
        (
            LOWER_LABEL,
            Color::from(SILVER),
            Vec3::from_array(LOWER_OFFSET),
            -1,
        ),
    ];

    let children: Vec<Entity> = labels
        .into_iter()
        .map(|(text, color, position, order)| {
            let texture = rasterize_label(commands, images, text, order);
            commands
                .spawn((
                    Name::new(text),
                    Mesh3d(quad.clone()),
                    MeshMaterial3d(materials.add(metal_material(color, Some(texture)))),
                    Transform::from_translation(position),
                    TextLabel(text.to_string()),
                ))
                .id()
        })
        .collect();

    commands
        .spawn((
            Name::new("text_billboard"),
            Transform::default(),
            Visibility::default(),
            Billboard::default(),
            TextBillboard,
        ))
        .add_children(&children)
        .id()
}
