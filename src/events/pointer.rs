use crate::dom;
use crate::input::{self, InputState};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Track the pointer across the whole window, normalized to [-1, 1].
pub fn wire_mousemove(state: Rc<RefCell<InputState>>) {
    let Some(wnd) = web::window() else {
        return;
    };
    dom::add_listener(&wnd, "mousemove", move |ev: web::MouseEvent| {
        let mut s = state.borrow_mut();
        let viewport = s.viewport;
        s.mouse = input::normalize_pointer(
            ev.client_x() as f32,
            ev.client_y() as f32,
            viewport.x,
            viewport.y,
        );
    });
}
