use crate::constants::{CLUSTER_TILT_GAIN, SCROLL_ROTATION_X, SCROLL_ROTATION_Y};
use glam::{EulerRot, Mat4, Vec2};

/// Rotation of the whole field as a linear function of the page scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRotation {
    pub kx: f32,
    pub ky: f32,
}

impl Default for ScrollRotation {
    fn default() -> Self {
        Self {
            kx: SCROLL_ROTATION_X,
            ky: SCROLL_ROTATION_Y,
        }
    }
}

impl ScrollRotation {
    /// `(scroll * kx, scroll * ky)` radians about X and Y.
    #[inline]
    pub fn rotation_from_scroll(&self, scroll_offset: f32) -> Vec2 {
        Vec2::new(scroll_offset * self.kx, scroll_offset * self.ky)
    }
}

/// Tilt of the whole field toward the pointer.
///
/// Pointer Y drives rotation about X and pointer X drives rotation about Y, so
/// the near side of the cloud leans toward the cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerTilt {
    pub gain: f32,
}

impl Default for PointerTilt {
    fn default() -> Self {
        Self {
            gain: CLUSTER_TILT_GAIN,
        }
    }
}

impl PointerTilt {
    #[inline]
    pub fn tilt_from_pointer(&self, pointer: Vec2) -> Vec2 {
        Vec2::new(pointer.y * self.gain, pointer.x * self.gain)
    }
}

/// Model matrix for a group rotated by `angles.x` about X, then `angles.y` about Y.
#[inline]
pub fn model_matrix(angles: Vec2) -> Mat4 {
    Mat4::from_euler(EulerRot::XYZ, angles.x, angles.y, 0.0)
}
