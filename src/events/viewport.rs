use crate::dom;
use crate::input::InputState;
use crate::ui;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Record the scroll target for the background and refresh the page glue.
pub fn wire_scroll(state: Rc<RefCell<InputState>>) {
    state.borrow_mut().target_scroll_y = dom::scroll_y() as f32;
    let Some(wnd) = web::window() else {
        return;
    };
    dom::add_listener(&wnd, "scroll", move |_: web::Event| {
        state.borrow_mut().target_scroll_y = dom::scroll_y() as f32;
        if let Some(document) = dom::window_document() {
            ui::update_scroll_progress(&document);
            ui::update_active_section(&document);
        }
    });
}

/// Keep the viewport size and the canvas backing store in sync with the
/// window. The surface itself is resized by the frame loop.
pub fn wire_resize(state: Rc<RefCell<InputState>>, canvas: Option<web::HtmlCanvasElement>) {
    sync_viewport(&state, canvas.as_ref());
    let Some(wnd) = web::window() else {
        return;
    };
    dom::add_listener(&wnd, "resize", move |_: web::Event| {
        sync_viewport(&state, canvas.as_ref());
    });
}

fn sync_viewport(state: &Rc<RefCell<InputState>>, canvas: Option<&web::HtmlCanvasElement>) {
    if let Some((w, h)) = dom::viewport_size() {
        state.borrow_mut().viewport = Vec2::new(w as f32, h as f32);
    }
    if let Some(c) = canvas {
        dom::sync_canvas_backing_size(c);
    }
}
