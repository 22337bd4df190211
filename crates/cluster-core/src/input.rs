//! Input normalization and "latest sample" cells.
//!
//! Event handlers (pointer move, scroll) run whenever the platform delivers an
//! event. They only `publish` into a [`SampleCell`]; the frame tick reads the
//! latest value once and is the only caller of the field update. Older samples
//! are simply overwritten.

use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

/// Shared cell holding the most recent value written by an event handler.
///
/// Cloning shares the same slot, so a handler closure and the frame loop can
/// each hold a handle.
#[derive(Debug, Default)]
pub struct SampleCell<T: Copy> {
    slot: Rc<Cell<T>>,
}

impl<T: Copy> Clone for SampleCell<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Copy> SampleCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            slot: Rc::new(Cell::new(initial)),
        }
    }

    #[inline]
    pub fn publish(&self, value: T) {
        self.slot.set(value);
    }

    #[inline]
    pub fn latest(&self) -> T {
        self.slot.get()
    }
}

/// Values the frame tick feeds into a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer in \[-1, 1\] per axis, +Y up.
    pub pointer: Vec2,
    /// Page scroll offset in pixels, never negative.
    pub scroll_offset: f32,
}

/// Pointer and scroll cells for one page.
#[derive(Clone, Debug, Default)]
pub struct InputCells {
    pub pointer: SampleCell<Vec2>,
    pub scroll: SampleCell<f32>,
}

impl InputCells {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> FrameInput {
        FrameInput {
            pointer: self.pointer.latest(),
            scroll_offset: self.scroll.latest(),
        }
    }
}

/// Map a client-space pointer position to \[-1, 1\] with +Y up.
///
/// A zero-sized or non-finite viewport maps to the centre.
#[inline]
pub fn normalize_pointer(client: Vec2, viewport: Vec2) -> Vec2 {
    if !(viewport.is_finite() && viewport.x > 0.0 && viewport.y > 0.0) || !client.is_finite() {
        return Vec2::ZERO;
    }
    let x = (client.x / viewport.x) * 2.0 - 1.0;
    let y = -(client.y / viewport.y) * 2.0 + 1.0;
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

/// Clamp a raw scroll position to a non-negative offset.
///
/// Overscroll bounce can report negative offsets; those count as the top of
/// the page.
#[inline]
pub fn normalize_scroll(raw: f64) -> f32 {
    if raw.is_finite() {
        raw.max(0.0) as f32
    } else {
        0.0
    }
}
