use wasm_bindgen::JsCast;
use web_sys as web;

/// Look up a canvas by id; `None` when missing or not a canvas.
pub fn find_canvas(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

/// Current `location.search`, empty when unavailable.
pub fn query_string(window: &web::Window) -> String {
    window.location().search().unwrap_or_default()
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
