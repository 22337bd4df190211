use crate::error::FieldError;
use crate::field::{ParticleField, PointerDeflection};
use crate::input::FrameInput;
use crate::presets::SceneConfig;
use crate::rotation::{model_matrix, PointerTilt, ScrollRotation};
use glam::{Mat4, Vec2};

/// One mounted visualization: a particle field plus the group rotation it is
/// drawn with.
///
/// Scroll rotation turns the whole group; pointer deflection moves individual
/// particles. The two are independent and both apply when a scene enables
/// them. A scene with pointer tilt adds it on top of the scroll rotation.
pub struct Visualization {
    field: ParticleField,
    deflection: PointerDeflection,
    scroll_rotation: Option<ScrollRotation>,
    pointer_tilt: Option<PointerTilt>,
    point_size: f32,
    opacity: f32,
    rotation: Vec2,
    frames: u64,
}

impl Visualization {
    pub fn mount(config: &SceneConfig, seed: u64) -> Result<Self, FieldError> {
        config.deflection.validate()?;
        if !(config.point_size.is_finite() && config.point_size > 0.0) {
            return Err(FieldError::config(format!(
                "point size must be positive, got {}",
                config.point_size
            )));
        }
        let field = ParticleField::with_seed(&config.field, seed)?;
        Ok(Self {
            field,
            deflection: config.deflection,
            scroll_rotation: config.scroll_rotation,
            pointer_tilt: config.pointer_tilt,
            point_size: config.point_size,
            opacity: config.opacity.clamp(0.0, 1.0),
            rotation: Vec2::ZERO,
            frames: 0,
        })
    }

    /// Advance one frame with the latest pointer and scroll samples.
    ///
    /// Bad input leaves both the particles and the rotation untouched.
    pub fn step(&mut self, input: FrameInput) -> Result<(), FieldError> {
        if !(input.scroll_offset.is_finite() && input.scroll_offset >= 0.0) {
            return Err(FieldError::input(format!(
                "scroll offset must be finite and non-negative, got {}",
                input.scroll_offset
            )));
        }
        self.field.advance(input.pointer, &self.deflection)?;

        let scroll = self
            .scroll_rotation
            .map_or(Vec2::ZERO, |r| r.rotation_from_scroll(input.scroll_offset));
        let tilt = self
            .pointer_tilt
            .map_or(Vec2::ZERO, |t| t.tilt_from_pointer(input.pointer));
        self.rotation = scroll + tilt;
        self.frames += 1;
        Ok(())
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Group rotation about X and Y, in radians.
    #[inline]
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        model_matrix(self.rotation)
    }

    #[inline]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Number of successful steps since mount.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
