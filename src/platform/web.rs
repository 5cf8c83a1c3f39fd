//! Browser glue: canvas, WebGPU surface, asset fetch, keyboard and
//! animation frames

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, KeyboardEvent, Response};

use crate::renderer::{RenderError, RenderState};
use crate::sim::Key;

/// Errors raised while setting up the page
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("No window or document")]
    NoWindow,

    #[error("No canvas element with id '{0}'")]
    NoCanvas(String),

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Fetching {url} failed with HTTP {status}")]
    Http { url: String, status: u16 },

    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("No suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<JsValue> for PlatformError {
    fn from(value: JsValue) -> Self {
        PlatformError::Js(format!("{:?}", value))
    }
}

/// Look up the canvas and size its backing store to `width` x `height` CSS
/// pixels at the device pixel ratio. Returns the pixel size.
pub fn canvas(
    id: &str,
    width: f32,
    height: f32,
) -> Result<(HtmlCanvasElement, u32, u32), PlatformError> {
    let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
    let document = window.document().ok_or(PlatformError::NoWindow)?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(id)
        .ok_or_else(|| PlatformError::NoCanvas(id.to_string()))?
        .dyn_into()
        .map_err(|_| PlatformError::NoCanvas(id.to_string()))?;

    let dpr = window.device_pixel_ratio();
    let pixel_w = (f64::from(width) * dpr) as u32;
    let pixel_h = (f64::from(height) * dpr) as u32;
    canvas.set_width(pixel_w);
    canvas.set_height(pixel_h);
    log::debug!("Canvas '{}' sized to {}x{} (dpr {})", id, pixel_w, pixel_h, dpr);

    Ok((canvas, pixel_w, pixel_h))
}

/// Create the WebGPU (or WebGL fallback) renderer for a canvas
pub async fn init_renderer(
    canvas: HtmlCanvasElement,
    width: u32,
    height: u32,
) -> Result<RenderState, PlatformError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });

    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    Ok(RenderState::new(surface, &adapter, width, height).await?)
}

/// Fetch a file relative to the page
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, PlatformError> {
    let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;

    if !response.ok() {
        return Err(PlatformError::Http {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    log::debug!("Fetched {} ({} bytes)", url, bytes.len());
    Ok(bytes)
}

/// Forward game keys to `handler(key, pressed, repeat)`
pub fn listen_keys<F>(handler: F) -> Result<(), PlatformError>
where
    F: FnMut(Key, bool, bool) + 'static,
{
    let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
    let handler = std::rc::Rc::new(std::cell::RefCell::new(handler));

    for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
        let handler = handler.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom_key(&event.key()) {
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                log::trace!("{} {:?} (repeat: {})", event_name, key, event.repeat());
                (*handler.borrow_mut())(key, pressed, event.repeat());
            }
        });
        window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Schedule `callback` for the next animation frame
pub fn request_animation_frame<F>(callback: F)
where
    F: FnOnce(f64) + 'static,
{
    let Some(window) = web_sys::window() else {
        log::error!("No window for requestAnimationFrame");
        return;
    };
    let closure = Closure::once(callback);
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
    closure.forget();
}

/// Milliseconds since the epoch, for seeding
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Hide the page's loading indicator, if present
pub fn hide_loading() {
    if let Some(loading) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("loading"))
    {
        let _ = loading.set_attribute("class", "hidden");
    }
}
