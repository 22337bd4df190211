use crate::color::ColorPolicy;
use crate::sampling::ScalarRange;
use glam::Vec3;

// Shared visual tuning constants used by both web and native frontends.

// Upper bound on any field, so one instance buffer stays a few MB
pub const MAX_PARTICLE_COUNT: usize = 100_000;

// Interactive cluster scene
pub const CLUSTER_PARTICLE_COUNT: usize = 300;
pub const CLUSTER_INITIAL_RADIUS: ScalarRange = ScalarRange::new(4.0, 7.0); // loose starting cloud
pub const CLUSTER_TARGET_RADIUS: ScalarRange = ScalarRange::fixed(2.0); // tight shell it settles onto
pub const CLUSTER_SPEED: ScalarRange = ScalarRange::new(0.01, 0.03); // lerp fraction per frame
pub const CLUSTER_SCALE: ScalarRange = ScalarRange::fixed(1.0); // every point the same size
pub const CLUSTER_COLOR: ColorPolicy = ColorPolicy {
    hue: ScalarRange::new(0.7, 1.0), // violet through magenta
    saturation: 0.8,
    lightness: 0.6,
};
pub const CLUSTER_TILT_GAIN: f32 = 0.5; // radians of group tilt at the viewport edge

// Data transformation scene
pub const TRANSFORMATION_PARTICLE_COUNT: usize = 150;
pub const TRANSFORMATION_INITIAL_RADIUS: ScalarRange = ScalarRange::new(3.0, 6.0);
pub const TRANSFORMATION_TARGET_RADIUS: ScalarRange = ScalarRange::new(2.5, 5.0);
pub const TRANSFORMATION_SPEED: ScalarRange = ScalarRange::new(0.005, 0.015);
pub const TRANSFORMATION_SCALE: ScalarRange = ScalarRange::new(0.2, 0.7);
pub const TRANSFORMATION_POINT_SIZE: f32 = 0.2; // sphere diameter before scaling
pub const TRANSFORMATION_COLOR: ColorPolicy = ColorPolicy {
    hue: ScalarRange::new(0.75, 0.8333), // 270°..300°
    saturation: 0.7,
    lightness: 0.5,
};
pub const SCROLL_ROTATION_X: f32 = 0.0005; // radians per scrolled pixel
pub const SCROLL_ROTATION_Y: f32 = 0.0008;

// Pointer repulsion
pub const POINTER_SCALE: f32 = 3.0; // normalized pointer -> field units
pub const POINTER_INFLUENCE_RADIUS: f32 = 2.0;
pub const POINTER_DEFLECTION_STRENGTH: f32 = 0.15;

// Visual sizing
pub const POINT_SIZE: f32 = 0.1; // world-space quad edge
pub const POINT_OPACITY: f32 = 0.8;

// Camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 8.0);
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Default seed when none is configured
pub const DEFAULT_SEED: u64 = 42;

pub const CLEAR_COLOR: [f64; 4] = [0.02, 0.02, 0.04, 1.0];
