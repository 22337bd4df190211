use crate::error::FieldError;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Inclusive `[min, max]` range sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalarRange {
    pub min: f32,
    pub max: f32,
}

impl ScalarRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate range that always yields `value`.
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.gen::<f32>() * self.span()
    }

    pub(crate) fn validate(&self, name: &str) -> Result<(), FieldError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FieldError::config(format!(
                "{name} must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(FieldError::config(format!(
                "{name} is inverted: min {} > max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Area-uniform point on a sphere of radius drawn from `radius`.
///
/// The polar angle comes from `acos(u)` with `u` uniform in \[-1, 1\], so points
/// do not bunch up at the poles the way a uniform polar angle would.
pub fn sample_sphere_shell<R: Rng + ?Sized>(rng: &mut R, radius: &ScalarRange) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (rng.gen::<f32>() * 2.0 - 1.0).clamp(-1.0, 1.0).acos();
    let r = radius.sample(rng);
    let sin_phi = phi.sin();
    Vec3::new(
        sin_phi * theta.cos() * r,
        sin_phi * theta.sin() * r,
        phi.cos() * r,
    )
}
