use crate::constants::MAX_PIXEL_RATIO;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Every element matching `selector`, in document order. Invalid selectors
/// yield an empty list.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

#[inline]
pub fn add_listener<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Viewport size in CSS pixels.
pub fn viewport_size() -> Option<(f64, f64)> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

pub fn scroll_y() -> f64 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

/// Total scrollable height of the document body.
pub fn scroll_height() -> f64 {
    window_document()
        .and_then(|d| d.body())
        .map(|b| b.scroll_height() as f64)
        .unwrap_or(0.0)
}

/// Size the canvas backing store to the viewport times the device pixel
/// ratio, capped at `MAX_PIXEL_RATIO`.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let Some((width, height)) = viewport_size() else {
            return;
        };
        let w_px = (width * dpr) as u32;
        let h_px = (height * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Run `f` once the DOM is parsed.
pub fn on_ready(document: &web::Document, f: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let closure = Closure::once(f);
    _ = document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
    closure.forget();
}
