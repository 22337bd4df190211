use cluster_core::{normalize_pointer, normalize_scroll};
use glam::Vec2;
use web_sys as web;

// ---------------- Pointer helpers ----------------

/// Viewport size in CSS pixels, or zero when the window is unavailable.
#[inline]
pub fn viewport_size(window: &web::Window) -> Vec2 {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Vec2::new(w as f32, h as f32)
}

/// Pointer position relative to the whole viewport, mapped to \[-1, 1\] with +Y up.
#[inline]
pub fn pointer_viewport_ndc(ev: &web::PointerEvent, window: &web::Window) -> Vec2 {
    let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
    normalize_pointer(client, viewport_size(window))
}

#[inline]
pub fn scroll_offset(window: &web::Window) -> f32 {
    normalize_scroll(window.scroll_y().unwrap_or(0.0))
}
