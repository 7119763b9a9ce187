//! Configuration constants for the backstage scene
//!
//! Every numeric literal that shapes the rendered output lives here. Changing
//! one of these changes the picture; nothing is read from files, environment
//! variables or the command line.

/// Window settings
pub mod window {
    /// Title of the primary window
    pub const TITLE: &str = "backstage systems";
}

/// Star particle field
pub mod stars {
    /// Number of stars
    pub const COUNT: usize = 5000;

    /// Inner radius of the star shell
    pub const RADIUS: f32 = 100.0;

    /// Thickness of the star shell
    pub const DEPTH: f32 = 50.0;

    /// Size multiplier
    pub const FACTOR: f32 = 5.0;

    /// Color saturation (0-1)
    pub const SATURATION: f32 = 1.0;

    /// Lightness of every star color
    pub const LIGHTNESS: f32 = 0.9;

    /// Soft-edged stars when enabled
    pub const FADE: bool = true;

    /// Twinkle speed, scales time in the size pulse
    pub const SPEED: f32 = 1.0;

    /// World-space half extent of a star per unit of size
    pub const STAR_WORLD_SCALE: f32 = 0.06;
}

/// Translucent cloud volume
pub mod cloud {
    pub const SEGMENTS: usize = 20;
    pub const WIDTH: f32 = 10.0;
    pub const DEPTH: f32 = 1.5;
    pub const OPACITY: f32 = 0.03;
    pub const SCALE: f32 = 2.0;
    pub const FADE: f32 = 0.5;
    pub const SPEED: f32 = 1.0;

    /// Per-axis rotation increments, held as parameters only
    pub const ROTATE: [f32; 3] = [0.01, 0.01, 0.01];

    /// Side length of the generated puff texture in pixels
    pub const PUFF_TEXTURE_SIZE: u32 = 64;

    /// Float wrapper around the cloud
    pub mod float {
        pub const POSITION: [f32; 3] = [-5.0, 0.0, 0.0];
        pub const SPEED: f32 = 1.0;
        pub const ROTATION_INTENSITY: f32 = 1.0;
        pub const FLOAT_INTENSITY: f32 = 1.0;
        pub const FLOATING_RANGE: [f32; 2] = [-0.1, 0.1];

        /// Upper bound of the random phase offset
        pub const MAX_OFFSET: f32 = 10_000.0;
    }
}

/// Ring of colored spotlights
pub mod spotlights {
    /// Number of lights on the ring
    pub const COUNT: usize = 8;

    /// Radius of the ring
    pub const RING_RADIUS: f64 = 10.0;

    /// Height of the ring above the origin
    pub const RING_HEIGHT: f64 = 4.0;

    /// Hue step between neighbors in degrees (8 x 50 does not tile 360)
    pub const HUE_STEP: f32 = 50.0;

    /// Cone angle as configured; only its cosine matters
    pub const ANGLE: f32 = 12.0;

    /// Edge softness, 0 = hard, 1 = fully soft
    pub const PENUMBRA: f32 = 1.0;

    pub const INTENSITY: f32 = 7.0;

    /// Falloff distance, also the shadow far plane
    pub const DISTANCE: f32 = 100.0;

    pub const SHADOW_MAP_SIZE: usize = 1024;
    pub const SHADOW_BIAS: f32 = -0.0001;
    pub const SHADOW_NEAR: f32 = 0.1;
    pub const SHADOW_FAR: f32 = 100.0;

    /// Conversion from scene intensity units to Bevy lumens
    pub const LUMENS_PER_UNIT: f32 = 100_000.0;

    /// Volumetric cone settings
    pub mod volume {
        /// Distance from the light over which the visible beam fades out
        pub const ATTENUATION: f32 = 5.0;
        pub const RADIUS_TOP: f32 = 0.1;

        /// Bottom radius per unit of configured angle
        pub const RADIUS_BOTTOM_PER_ANGLE: f32 = 7.0;

        pub const OPACITY: f32 = 0.5;

        /// Vertices around each ring of the cone
        pub const SEGMENTS: usize = 32;

        /// Rings spread over the fading part of the cone
        pub const FADE_RINGS: usize = 8;
    }
}

/// Camera-facing text labels
pub mod text {
    pub const UPPER_LABEL: &str = "backstage";
    pub const LOWER_LABEL: &str = "systems";

    /// Offset of the lower label relative to the upper one
    pub const LOWER_OFFSET: [f32; 3] = [-0.5, -1.0, 0.0];

    /// Font size used when rasterizing a label
    pub const FONT_SIZE: f32 = 96.0;

    /// Pixel size of each label's offscreen texture
    pub const TEXTURE_WIDTH: u32 = 640;
    pub const TEXTURE_HEIGHT: u32 = 128;

    /// World-space height of a label quad (width follows the texture aspect)
    pub const QUAD_HEIGHT: f32 = 1.2;

    pub const METALLIC: f32 = 1.0;
    pub const ROUGHNESS: f32 = 0.2;
}

/// Studio stage lighting
pub mod stage {
    /// Global multiplier for the stage lights
    pub const INTENSITY: f32 = 1.0;

    /// Ambient light intensity
    pub const AMBIENT_INTENSITY: f32 = 0.5;

    /// Conversion from ambient intensity to Bevy brightness (cd/m^2)
    pub const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 400.0;

    /// Radius of the sphere enclosing the whole scene (the star shell)
    pub const BOUNDS_RADIUS: f32 = super::stars::RADIUS + super::stars::DEPTH;

    /// Key spotlight position, in units of `BOUNDS_RADIUS`
    pub const KEY_POSITION: [f32; 3] = [1.0, 2.0, 1.0];
    pub const KEY_INTENSITY: f32 = 2.0;
    pub const KEY_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Fill point light position, in units of `BOUNDS_RADIUS`
    pub const FILL_POSITION: [f32; 3] = [-2.0, -0.5, -2.0];
    pub const FILL_INTENSITY: f32 = 0.5;

    /// Conversion from stage light intensity to Bevy lumens at scene scale
    pub const LUMENS_PER_UNIT: f32 = 1.0e9;

    /// Light range, in units of `BOUNDS_RADIUS`
    pub const RANGE_FACTOR: f32 = 4.0;

    /// Studio environment map
    pub mod environment {
        /// Face size of the generated cube map in pixels
        pub const FACE_SIZE: u32 = 32;

        /// Brightness of the environment light (cd/m^2)
        pub const INTENSITY: f32 = 900.0;

        /// Radiance of the floor, horizon and overhead softbox (0-1)
        pub const FLOOR: f32 = 0.05;
        pub const HORIZON: f32 = 0.35;
        pub const SOFTBOX: f32 = 1.0;
    }
}

/// Per-frame rotation increments, applied once per rendered frame
pub mod animation {
    /// Radians added to the star field's pitch and yaw every frame
    pub const STAR_FIELD_STEP: f64 = 0.001;

    /// Radians added to the spotlight ring's yaw every frame
    pub const SPOTLIGHT_RING_STEP: f64 = 0.001;
}

/// Orbit camera control settings
pub mod camera {
    pub const ENABLE_ZOOM: bool = true;
    pub const ENABLE_PAN: bool = true;
    pub const ENABLE_ROTATE: bool = true;
    pub const ENABLE_DAMPING: bool = true;
    pub const DAMPING_FACTOR: f32 = 0.25;
    pub const ROTATE_SPEED: f32 = 0.25;
    pub const ZOOM_SPEED: f32 = 1.2;
    pub const PAN_SPEED: f32 = 0.8;
    pub const SCREEN_SPACE_PANNING: bool = true;

    /// Polar angle bounds (radians from the +Y axis)
    pub const MIN_POLAR_ANGLE: f32 = 0.0;
    pub const MAX_POLAR_ANGLE: f32 = std::f32::consts::PI;

    /// Azimuth is unclamped
    pub const MIN_AZIMUTH_ANGLE: f32 = f32::NEG_INFINITY;
    pub const MAX_AZIMUTH_ANGLE: f32 = f32::INFINITY;

    /// Distance bounds from the orbit target
    pub const MIN_DISTANCE: f32 = 25.0;
    pub const MAX_DISTANCE: f32 = 50.0;

    /// Initial camera position; only its direction survives the scene fit
    pub const INITIAL_POSITION: [f32; 3] = [0.0, 0.0, 5.0];

    /// Extra room around the scene bounds when fitting the camera
    pub const FIT_MARGIN: f32 = 1.2;

    /// Vertical field of view in degrees
    pub const FOV_DEGREES: f32 = 75.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;

    /// Pixels of smooth scrolling that count as one wheel notch
    pub const PIXELS_PER_LINE: f32 = 100.0;
}
