#![cfg(target_arch = "wasm32")]
use crate::constants::Preset;
use crate::input::InputState;
use crate::scene::Scene;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod animate;
mod camera;
mod constants;
mod dom;
mod events;
mod frame;
mod geometry;
mod input;
mod render;
mod scene;
mod ui;

const CANVAS_ID: &str = "neural-bg";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("neural-bg starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    dom::on_ready(&document, || {
        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let input = Rc::new(RefCell::new(InputState::default()));
    let canvas = find_canvas(&document);

    // Page glue runs with or without the background
    events::wire_resize(input.clone(), canvas.clone());
    events::wire_mousemove(input.clone());
    events::wire_scroll(input.clone());
    ui::init_navigation(&document);
    ui::init_scroll_reveal(&document);
    ui::update_scroll_progress(&document);
    ui::update_active_section(&document);

    let Some(canvas) = canvas else {
        log::debug!("no #{} canvas; background disabled", CANVAS_ID);
        return Ok(());
    };

    let preset = Preset::from_attr(canvas.get_attribute("data-preset").as_deref());
    let tuning = preset.tuning();
    let scene = Scene::build(tuning, StdRng::from_entropy());
    let counts = scene.counts();
    log::info!(
        "[scene] preset={} nodes={} connections={} signals={} particles={} stream_points={} waves={}",
        tuning.name,
        counts.nodes,
        counts.connections,
        counts.signals,
        counts.particles,
        counts.stream_points,
        counts.waves
    );

    let gpu = frame::init_gpu(&canvas, &scene).await;
    if gpu.is_none() {
        log::warn!("WebGPU unavailable; background disabled");
        return Ok(());
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        gpu,
        input,
        canvas,
    }));
    let frame_loop = frame::start_loop(frame_ctx);

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let unload = Closure::once(move || frame_loop.stop());
    _ = window.add_event_listener_with_callback("beforeunload", unload.as_ref().unchecked_ref());
    unload.forget();

    Ok(())
}

fn find_canvas(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(CANVAS_ID)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()
}
