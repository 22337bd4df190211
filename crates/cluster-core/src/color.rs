use crate::error::FieldError;
use crate::sampling::ScalarRange;
use rand::Rng;

/// How particle colors are chosen: a random hue from `hue` with fixed
/// saturation and lightness.
///
/// Hue is expressed in turns (1.0 = 360°) and wraps, so `[0.9, 1.1]` spans red.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPolicy {
    pub hue: ScalarRange,
    pub saturation: f32,
    pub lightness: f32,
}

impl ColorPolicy {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 3] {
        hsl_to_rgb(self.hue.sample(rng), self.saturation, self.lightness)
    }

    pub(crate) fn validate(&self) -> Result<(), FieldError> {
        self.hue.validate("hue range")?;
        if !(0.0..=1.0).contains(&self.saturation) {
            return Err(FieldError::config(format!(
                "saturation must be in [0, 1], got {}",
                self.saturation
            )));
        }
        if !(0.0..=1.0).contains(&self.lightness) {
            return Err(FieldError::config(format!(
                "lightness must be in [0, 1], got {}",
                self.lightness
            )));
        }
        Ok(())
    }
}

/// HSL to linear RGB, all components in \[0, 1\].
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

#[inline]
fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
