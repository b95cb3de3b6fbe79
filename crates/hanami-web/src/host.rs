//! Page boot, event listeners and the animation-frame loop

use crate::canvas::WebCanvas;
use crate::gl::WebGlScene;
use crate::{FIELD_CANVAS_ID, PETAL_CANVAS_ID};
use hanami_core::{HanamiConfig, Viewport};
use hanami_particles::{BootEnvironment, Stage};
use hanami_runtime::{HostEvent, PointerEvent};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

type SharedStage = Rc<RefCell<Stage<WebCanvas, WebGlScene>>>;

/// Owns the `requestAnimationFrame` callback and its pending request id
struct FrameLoop {
    window: Window,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    request: Cell<Option<i32>>,
}

impl FrameLoop {
    fn schedule(&self) {
        if self.request.get().is_some() {
            return;
        }
        if let Some(callback) = self.callback.borrow().as_ref() {
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(id) => self.request.set(Some(id)),
                Err(err) => tracing::warn!(?err, "requestAnimationFrame failed"),
            }
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.request.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

/// Handle returned to JavaScript for outward control of the animations
#[wasm_bindgen]
pub struct HanamiHandle {
    stage: SharedStage,
    frames: Rc<FrameLoop>,
}

#[wasm_bindgen]
impl HanamiHandle {
    pub fn pause(&self) {
        self.stage.borrow_mut().pause();
        self.frames.cancel();
    }

    pub fn resume(&self) {
        let now = now(&self.frames.window);
        let running = {
            let mut stage = self.stage.borrow_mut();
            stage.resume(now);
            stage.is_running()
        };
        if running {
            self.frames.schedule();
        }
    }

    pub fn shutdown(&self) {
        self.stage.borrow_mut().shutdown();
        self.frames.cancel();
    }

    #[wasm_bindgen(js_name = setPetalCount)]
    pub fn set_petal_count(&self, count: u32) {
        self.stage.borrow_mut().set_petal_count(count as usize);
    }

    #[wasm_bindgen(js_name = setWindSpeed)]
    pub fn set_wind_speed(&self, speed: f32) {
        self.stage.borrow_mut().set_wind_speed(speed);
    }

    #[wasm_bindgen(js_name = setParticleCount)]
    pub fn set_particle_count(&self, count: u32) {
        self.stage.borrow_mut().set_particle_count(count as usize);
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.stage.borrow().is_running()
    }
}

/// Boot both animations on the current page with the default configuration
#[wasm_bindgen]
pub fn boot() -> Result<HanamiHandle, JsValue> {
    crate::log::init();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let config = HanamiConfig::default();

    let reduced_motion = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());

    let canvas = find_canvas(&document, PETAL_CANVAS_ID).and_then(WebCanvas::new);
    let scene = find_canvas(&document, FIELD_CANVAS_ID).and_then(|canvas| {
        WebGlScene::new(canvas)
            .map_err(|err| tracing::warn!(%err, "particle renderer unavailable"))
            .ok()
    });

    let stage = Stage::boot(
        &config,
        BootEnvironment {
            viewport: viewport(&window),
            reduced_motion,
            canvas,
            scene,
            now: now(&window),
            seed: (js_sys::Math::random() * u32::MAX as f64) as u32,
        },
    );
    let running = stage.is_running();
    let stage: SharedStage = Rc::new(RefCell::new(stage));

    let frames = Rc::new(FrameLoop {
        window: window.clone(),
        callback: RefCell::new(None),
        request: Cell::new(None),
    });

    let handle = HanamiHandle {
        stage: stage.clone(),
        frames: frames.clone(),
    };
    if !running {
        return Ok(handle);
    }

    // The closure keeps the loop alive through its own Rc
    let callback = {
        let stage = stage.clone();
        let frames = frames.clone();
        Closure::wrap(Box::new(move |now: f64| {
            frames.request.set(None);
            let running = {
                let mut stage = stage.borrow_mut();
                stage.frame(now);
                stage.is_running()
            };
            if running {
                frames.schedule();
            }
        }) as Box<dyn FnMut(f64)>)
    };
    *frames.callback.borrow_mut() = Some(callback);

    listen(&window, "resize", {
        let stage = stage.clone();
        let window = window.clone();
        move |_: web_sys::Event| {
            stage
                .borrow_mut()
                .push_event(HostEvent::Resize(viewport(&window)));
        }
    })?;

    listen(&document, "mousemove", {
        let stage = stage.clone();
        move |event: MouseEvent| {
            let pointer = PointerEvent::mouse(event.client_x() as f32, event.client_y() as f32);
            stage.borrow_mut().push_event(HostEvent::Pointer(pointer));
        }
    })?;

    listen(&document, "touchmove", {
        let stage = stage.clone();
        move |event: TouchEvent| {
            if let Some(touch) = event.touches().get(0) {
                let pointer =
                    PointerEvent::touch(touch.client_x() as f32, touch.client_y() as f32);
                stage.borrow_mut().push_event(HostEvent::Pointer(pointer));
            }
        }
    })?;

    listen(&document, "visibilitychange", {
        let stage = stage.clone();
        let frames = frames.clone();
        let document = document.clone();
        move |_: web_sys::Event| {
            let hidden = document.hidden();
            let at = now(&frames.window);
            let running = {
                let mut stage = stage.borrow_mut();
                stage.handle_event(HostEvent::Visibility { hidden, at });
                stage.is_running()
            };
            if hidden {
                frames.cancel();
            } else if running {
                frames.schedule();
            }
        }
    })?;

    listen(&window, "beforeunload", {
        let stage = stage.clone();
        let frames = frames.clone();
        move |_: web_sys::Event| {
            stage.borrow_mut().handle_event(HostEvent::Unload);
            frames.cancel();
        }
    })?;

    frames.schedule();
    Ok(handle)
}

fn find_canvas(document: &Document, id: &str) -> Option<HtmlCanvasElement> {
    document
        .get_element_by_id(id)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

fn viewport(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Viewport::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
    .with_pixel_ratio(window.device_pixel_ratio() as f32)
}

fn now(window: &Window) -> f64 {
    window
        .performance()
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Register a listener for the lifetime of the page
fn listen<E, F>(target: &web_sys::EventTarget, name: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
