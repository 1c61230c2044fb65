use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Attach a window-level listener for the lifetime of the page.
pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        if let Err(e) =
            window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("[dom] {} listener not attached: {:?}", event, e);
        }
        closure.forget();
    }
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

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas = canvas.clone();
    add_window_listener("resize", move || sync_canvas_backing_size(&canvas));
}
