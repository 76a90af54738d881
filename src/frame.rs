use crate::animate::FrameInput;
use crate::constants::hex_to_linear;
use crate::dom;
use crate::geometry::Capacities;
use crate::input::InputState;
use crate::render;
use crate::scene::Scene;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Scene,
    pub gpu: Option<render::GpuState>,
    pub input: Rc<RefCell<InputState>>,
    pub canvas: web::HtmlCanvasElement,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let snapshot = *self.input.borrow();
        let frame_input = FrameInput {
            mouse: snapshot.mouse,
            target_scroll_y: snapshot.target_scroll_y,
            scroll_range: (dom::scroll_height() - snapshot.viewport.y as f64) as f32,
        };
        self.scene.advance(&frame_input);

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.scene.camera.set_viewport(w as f32, h as f32);

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(w, h);
        match g.render(&self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("render error: out of memory; dropping GPU state");
                self.gpu = None;
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, scene: &Scene) -> Option<render::GpuState> {
    let background = hex_to_linear(scene.tuning.palette.background);
    match render::GpuState::new(canvas, Capacities::for_scene(scene), background).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::warn!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running `requestAnimationFrame` loop.
pub struct FrameLoop {
    ctx: Rc<RefCell<FrameContext>>,
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Cancel the pending frame and release the GPU resources.
    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // Dropping the closure breaks the tick -> tick reference cycle
        self.tick.borrow_mut().take();
        self.ctx.borrow_mut().gpu = None;
        log::info!("[frame] loop stopped");
    }
}

fn request_frame(tick: &Tick, pending: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        pending.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Tick = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone, &pending_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &pending);

    FrameLoop {
        ctx: frame_ctx,
        tick,
        pending,
    }
}
