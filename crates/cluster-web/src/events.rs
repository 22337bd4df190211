use crate::dom;
use crate::input;
use cluster_core::InputCells;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire the global listeners that feed `cells`.
///
/// Handlers only publish the newest sample; the frame loop reads them.
pub fn wire_input_handlers(cells: &InputCells, canvases: &[web::HtmlCanvasElement]) {
    wire_pointermove(cells);
    wire_scroll(cells);
    wire_canvas_resize(canvases);
}

fn wire_pointermove(cells: &InputCells) {
    let pointer = cells.pointer.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Some(wnd) = web::window() {
            pointer.publish(input::pointer_viewport_ndc(&ev, &wnd));
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_scroll(cells: &InputCells) {
    let scroll = cells.scroll.clone();
    if let Some(wnd) = web::window() {
        // Pages restored mid-scroll start with a non-zero offset.
        scroll.publish(input::scroll_offset(&wnd));
    }

    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        if let Some(wnd) = web::window() {
            scroll.publish(input::scroll_offset(&wnd));
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

// Maintain canvas internal pixel size to match CSS size * devicePixelRatio
fn wire_canvas_resize(canvases: &[web::HtmlCanvasElement]) {
    for canvas in canvases {
        dom::sync_canvas_backing_size(canvas);
    }
    let canvases = canvases.to_vec();
    let resize_closure = Closure::wrap(Box::new(move || {
        for canvas in &canvases {
            dom::sync_canvas_backing_size(canvas);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
