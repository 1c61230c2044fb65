#![cfg(target_arch = "wasm32")]
use link_core::{Scene, SceneConfig};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod instances;
mod notifier;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("neural-link starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::wire_canvas_resize(&canvas);

    let scene = Scene::new(SceneConfig::default())?;
    let gpu = frame::init_gpu(&canvas, scene.config().particle_count).await;
    let beam_interval = notifier::beam_trigger_interval(scene.link(), scene.trigger_timer())?;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        scene,
        gpu,
        canvas,
        vec![beam_interval],
    )));
    let running = Rc::new(Cell::new(true));

    {
        let frame_ctx = frame_ctx.clone();
        let running = running.clone();
        dom::add_window_listener("pagehide", move || {
            if running.replace(false) {
                frame_ctx.borrow_mut().teardown();
            }
        });
    }

    frame::start_loop(frame_ctx, running);
    Ok(())
}
