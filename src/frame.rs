use crate::constants::STATS_LOG_INTERVAL_SEC;
use crate::notifier::Interval;
use crate::render;
use instant::Instant;
use link_core::Scene;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Scene,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub intervals: Vec<Interval>,

    pub stats_since: Instant,
    pub stats_frames: u32,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        scene: Scene,
        gpu: Option<render::GpuState<'a>>,
        canvas: web::HtmlCanvasElement,
        intervals: Vec<Interval>,
    ) -> Self {
        Self {
            scene,
            gpu,
            canvas,
            intervals,
            stats_since: Instant::now(),
            stats_frames: 0,
        }
    }

    pub fn frame(&mut self) {
        let snapshot = self.scene.tick();
        let (frame, pressure, beams) = (snapshot.frame, snapshot.pressure, snapshot.beams.len());

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            match g.render(&snapshot) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[gpu] surface lost, reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }

        self.stats_frames += 1;
        let elapsed = self.stats_since.elapsed().as_secs_f32();
        if elapsed >= STATS_LOG_INTERVAL_SEC {
            log::debug!(
                "[scene] frame={} fps={:.1} pressure={:.3} beams={}",
                frame,
                self.stats_frames as f32 / elapsed,
                pressure,
                beams
            );
            self.stats_since = Instant::now();
            self.stats_frames = 0;
        }
    }

    /// Stop external timers and release the GPU surface.
    pub fn teardown(&mut self) {
        self.intervals.clear();
        self.gpu = None;
        log::info!("[scene] torn down after {} frames", self.scene.frame());
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    particle_capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, particle_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until `running` goes false.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>, running: Rc<Cell<bool>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
