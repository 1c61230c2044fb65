use link_core::{BeamTrigger, ChanceTimer, SceneLink};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A `setInterval` registration. Dropping it clears the interval and frees
/// the callback.
pub struct Interval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(period_ms: i32, callback: impl FnMut() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|e| anyhow::anyhow!("setInterval failed: {:?}", e))?;
        Ok(Self {
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

/// Fire `timer` on its period; each successful roll asks the scene for a
/// beam with random endpoints.
pub fn beam_trigger_interval(link: SceneLink, mut timer: ChanceTimer) -> anyhow::Result<Interval> {
    let period_ms = i32::try_from(timer.period().as_millis()).unwrap_or(i32::MAX);
    log::info!("[beams] trigger interval every {} ms", period_ms);
    Interval::new(period_ms, move || {
        if timer.roll() {
            if let Err(e) = link.trigger(BeamTrigger::default()) {
                log::warn!("[beams] trigger dropped: {}", e);
            }
        }
    })
}
