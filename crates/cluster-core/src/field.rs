//! Fixed-size particle field that drifts toward its targets and shies away
//! from the pointer.
//!
//! Particle data is stored as parallel arrays owned by the field. The renderer
//! borrows [`ParticleField::positions`] between frames; the only mutation
//! happens inside [`ParticleField::advance`].

use crate::color::ColorPolicy;
use crate::constants::*;
use crate::error::FieldError;
use crate::sampling::{sample_sphere_shell, ScalarRange};
use glam::{Vec2, Vec3};
use rand::prelude::*;

/// Construction parameters for a [`ParticleField`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub initial_radius: ScalarRange,
    pub target_radius: ScalarRange,
    pub speed: ScalarRange,
    /// Per-particle multiplier on the scene's point size.
    pub scale: ScalarRange,
    pub color: ColorPolicy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: CLUSTER_PARTICLE_COUNT,
            initial_radius: CLUSTER_INITIAL_RADIUS,
            target_radius: CLUSTER_TARGET_RADIUS,
            speed: CLUSTER_SPEED,
            scale: CLUSTER_SCALE,
            color: CLUSTER_COLOR,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.count == 0 {
            return Err(FieldError::config("particle count must be at least 1"));
        }
        if self.count > MAX_PARTICLE_COUNT {
            return Err(FieldError::config(format!(
                "particle count must be at most {MAX_PARTICLE_COUNT}, got {}",
                self.count
            )));
        }
        for (name, range) in [
            ("initial radius range", &self.initial_radius),
            ("target radius range", &self.target_radius),
        ] {
            range.validate(name)?;
            if range.min < 0.0 {
                return Err(FieldError::config(format!(
                    "{name} must not be negative, got [{}, {}]",
                    range.min, range.max
                )));
            }
        }
        self.speed.validate("speed range")?;
        if self.speed.min <= 0.0 || self.speed.max > 1.0 {
            return Err(FieldError::config(format!(
                "speed range must lie in (0, 1], got [{}, {}]",
                self.speed.min, self.speed.max
            )));
        }
        self.scale.validate("scale range")?;
        if self.scale.min <= 0.0 {
            return Err(FieldError::config(format!(
                "scale range must be positive, got [{}, {}]",
                self.scale.min, self.scale.max
            )));
        }
        self.color.validate()
    }
}

/// Repulsion applied around the pointer each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDeflection {
    /// Maps the normalized pointer (\[-1, 1\] per axis) into field units.
    pub pointer_scale: f32,
    /// Distance in the XY plane beyond which the pointer has no effect.
    pub influence_radius: f32,
    /// Push applied to a particle sitting right next to the pointer.
    pub strength: f32,
}

impl Default for PointerDeflection {
    fn default() -> Self {
        Self {
            pointer_scale: POINTER_SCALE,
            influence_radius: POINTER_INFLUENCE_RADIUS,
            strength: POINTER_DEFLECTION_STRENGTH,
        }
    }
}

impl PointerDeflection {
    pub fn validate(&self) -> Result<(), FieldError> {
        if !self.pointer_scale.is_finite() {
            return Err(FieldError::config("pointer scale must be finite"));
        }
        if !(self.influence_radius.is_finite() && self.influence_radius > 0.0) {
            return Err(FieldError::config(format!(
                "influence radius must be positive, got {}",
                self.influence_radius
            )));
        }
        if !(self.strength.is_finite() && self.strength >= 0.0) {
            return Err(FieldError::config(format!(
                "deflection strength must be non-negative, got {}",
                self.strength
            )));
        }
        Ok(())
    }

    /// Offset added to a particle at `position` for a pointer at `pointer`.
    ///
    /// Only X and Y take part. The push falls off linearly to zero at the
    /// influence radius and is zero when the particle sits exactly under the
    /// pointer.
    #[inline]
    pub fn offset(&self, position: Vec3, pointer: Vec2) -> Vec2 {
        let d = position.truncate() - pointer * self.pointer_scale;
        let dist = d.length();
        if dist > 0.0 && dist < self.influence_radius {
            let falloff = 1.0 - dist / self.influence_radius;
            d / dist * falloff * self.strength
        } else {
            Vec2::ZERO
        }
    }
}

/// Snapshot of one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub target: Vec3,
    pub speed: f32,
    pub scale: f32,
    pub color: [f32; 3],
}

pub struct ParticleField {
    positions: Vec<Vec3>,
    targets: Vec<Vec3>,
    speeds: Vec<f32>,
    scales: Vec<f32>,
    colors: Vec<[f32; 3]>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(config: &FieldConfig, rng: &mut R) -> Result<Self, FieldError> {
        config.validate()?;
        let n = config.count;
        let mut positions = Vec::with_capacity(n);
        let mut targets = Vec::with_capacity(n);
        let mut speeds = Vec::with_capacity(n);
        let mut scales = Vec::with_capacity(n);
        let mut colors = Vec::with_capacity(n);
        for _ in 0..n {
            positions.push(sample_sphere_shell(rng, &config.initial_radius));
            targets.push(sample_sphere_shell(rng, &config.target_radius));
            speeds.push(config.speed.sample(rng));
            scales.push(config.scale.sample(rng));
            colors.push(config.color.sample(rng));
        }
        log::debug!(
            "[field] created {} particles (initial r=[{:.2},{:.2}] target r=[{:.2},{:.2}])",
            n,
            config.initial_radius.min,
            config.initial_radius.max,
            config.target_radius.min,
            config.target_radius.max
        );
        Ok(Self {
            positions,
            targets,
            speeds,
            scales,
            colors,
        })
    }

    pub fn with_seed(config: &FieldConfig, seed: u64) -> Result<Self, FieldError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(config, &mut rng)
    }

    /// Move every particle one frame toward its target and away from the
    /// pointer.
    ///
    /// Each particle only reads its own state. A non-finite pointer is rejected
    /// before anything is touched.
    pub fn advance(
        &mut self,
        pointer: Vec2,
        deflection: &PointerDeflection,
    ) -> Result<(), FieldError> {
        if !pointer.is_finite() {
            log::trace!("[field] rejected pointer {:?}", pointer);
            return Err(FieldError::input(format!(
                "pointer must be finite, got ({}, {})",
                pointer.x, pointer.y
            )));
        }
        deflection
            .validate()
            .map_err(|e| FieldError::input(e.to_string()))?;

        for ((pos, target), speed) in self
            .positions
            .iter_mut()
            .zip(&self.targets)
            .zip(&self.speeds)
        {
            let push = deflection.offset(*pos, pointer);
            // Weighted form: `target - pos` overflows for shells near f32::MAX.
            *pos = *pos * (1.0 - *speed) + *target * *speed;
            pos.x += push.x;
            pos.y += push.y;
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Live positions, index-stable for the lifetime of the field.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    #[inline]
    pub fn speeds(&self) -> &[f32] {
        &self.speeds
    }

    #[inline]
    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    #[inline]
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn particle(&self, index: usize) -> Option<Particle> {
        Some(Particle {
            position: *self.positions.get(index)?,
            target: self.targets[index],
            speed: self.speeds[index],
            scale: self.scales[index],
            color: self.colors[index],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).filter_map(|i| self.particle(i))
    }
}
