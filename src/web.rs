//! Browser host: the fireworks loop on an HTML canvas.
//!
//! Frames are scheduled with `requestAnimationFrame`, size changes arrive
//! through a `resize` listener on the window, and the countdown is written
//! into an optional container element.
//!
//! Inside the container, elements tagged `data-countdown="year"`,
//! `"days"`, `"hours"`, `"minutes"` or `"seconds"` receive their value.
//! The container gains a `data-finished` attribute once the countdown
//! reaches zero. Build with the `web` feature for
//! `wasm32-unknown-unknown` (see `cargo xtask web`).

use std::{cell::RefCell, f64::consts::TAU, rc::Rc};

use chrono::Local;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, Window};

use crate::{
    color::Color,
    countdown::Countdown,
    engine::{AnimationEngine, FireworksTask},
    error::FireworksError,
    host::{AnimationHost, FrameRequest},
    options::Options,
    surface::RenderSurface,
};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type ResizeCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type SharedTask = Rc<RefCell<FireworksTask<CanvasSurface, WebHost>>>;

/// [`RenderSurface`] over a `CanvasRenderingContext2d`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas element, acquiring its 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`FireworksError::Surface`] if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, FireworksError> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| {
                FireworksError::Surface("canvas has no 2D context".into())
            })?;
        Ok(Self { canvas, context })
    }

    /// Set the backing store size. Like any canvas resize, this clears the
    /// pixels and resets the context state.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl RenderSurface for CanvasSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.context.set_global_alpha(f64::from(alpha));
    }

    fn set_fill_style(&mut self, color: Color, alpha: f32) {
        self.context.set_fill_style_str(&color.css_rgba(alpha));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.context.fill_rect(
            f64::from(x),
            f64::from(y),
            f64::from(width),
            f64::from(height),
        );
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.context.begin_path();
        if let Err(e) = self.context.arc(
            f64::from(x),
            f64::from(y),
            f64::from(radius),
            0.0,
            TAU,
        ) {
            log::warn!("arc rejected: {e:?}");
            return;
        }
        self.context.fill();
    }
}

/// Schedules frames with `requestAnimationFrame` and forwards window
/// `resize` events.
pub struct WebHost {
    window: Window,
    frame_callback: FrameCallback,
    resize_callback: ResizeCallback,
    resize_subscribed: bool,
}

impl AnimationHost for WebHost {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        let slot = self.frame_callback.borrow();
        let callback = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameRequest(id as u64)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if let Err(e) = self.window.cancel_animation_frame(request.0 as i32) {
            log::warn!("cancelAnimationFrame failed: {e:?}");
        }
    }

    fn subscribe_resize(&mut self) {
        if self.resize_subscribed {
            return;
        }
        let slot = self.resize_callback.borrow();
        let Some(callback) = slot.as_ref() else {
            return;
        };
        match self.window.add_event_listener_with_callback(
            "resize",
            callback.as_ref().unchecked_ref(),
        ) {
            Ok(()) => self.resize_subscribed = true,
            Err(e) => log::warn!("could not listen for resize: {e:?}"),
        }
    }

    fn unsubscribe_resize(&mut self) {
        if !self.resize_subscribed {
            return;
        }
        let slot = self.resize_callback.borrow();
        if let Some(callback) = slot.as_ref() {
            if let Err(e) = self.window.remove_event_listener_with_callback(
                "resize",
                callback.as_ref().unchecked_ref(),
            ) {
                log::warn!("could not remove resize listener: {e:?}");
            }
        }
        self.resize_subscribed = false;
    }
}

/// Handle to a running fireworks canvas, returned by [`start`].
///
/// Dropping the handle stops the animation.
#[wasm_bindgen]
pub struct WebFireworks {
    task: SharedTask,
    // Keep the JS callbacks alive for as long as the task may use them.
    _frame_callback: FrameCallback,
    _resize_callback: ResizeCallback,
}

#[wasm_bindgen]
impl WebFireworks {
    /// Cancel the pending frame and remove the resize listener.
    pub fn stop(&self) {
        if let Ok(mut task) = self.task.try_borrow_mut() {
            task.stop();
        }
    }

    /// Particles currently in flight.
    #[wasm_bindgen(getter)]
    pub fn particles(&self) -> usize {
        self.task
            .try_borrow()
            .map_or(0, |task| task.engine().particles().len())
    }
}

impl Drop for WebFireworks {
    fn drop(&mut self) {
        self.stop();
    }
}

fn js_error(e: &FireworksError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed by an earlier start.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Viewport size of the browser window in CSS pixels.
fn viewport(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).map_or(0, |v| v as u32)
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

/// Mount the fireworks on the canvas with id `canvas_id`, sized to the
/// window. When `countdown_id` names an element, the countdown to the next
/// New Year is written into its tagged children once per second.
///
/// # Errors
///
/// Rejects when the canvas is missing, is not a canvas, has no 2D context,
/// or has no area.
#[wasm_bindgen]
#[allow(clippy::needless_pass_by_value)]
pub fn start(
    canvas_id: &str,
    countdown_id: Option<String>,
) -> Result<WebFireworks, JsValue> {
    init_logging();
    mount(canvas_id, countdown_id.as_deref(), Options::default())
        .map_err(|e| js_error(&e))
}

fn mount(
    canvas_id: &str,
    countdown_id: Option<&str>,
    options: Options,
) -> Result<WebFireworks, FireworksError> {
    let window = web_sys::window()
        .ok_or_else(|| FireworksError::Web("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| FireworksError::Web("no document".into()))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| {
            FireworksError::Surface(format!("no element #{canvas_id}"))
        })?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| {
            FireworksError::Surface(format!("#{canvas_id} is not a canvas"))
        })?;
    let panel = countdown_id.and_then(|id| document.get_element_by_id(id));

    let mut surface = CanvasSurface::new(canvas)?;
    let (width, height) = viewport(&window);
    surface.resize(width, height);

    let mut countdown = match Countdown::until_next_new_year(
        options.countdown.refresh(),
    ) {
        Ok(countdown) => Some(countdown),
        Err(e) => {
            log::warn!("countdown disabled: {e}");
            None
        }
    };
    if let (Some(panel), Some(countdown)) = (&panel, &countdown) {
        write_countdown(panel, countdown);
    }

    let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
    let resize_callback: ResizeCallback = Rc::new(RefCell::new(None));
    let host = WebHost {
        window: window.clone(),
        frame_callback: frame_callback.clone(),
        resize_callback: resize_callback.clone(),
        resize_subscribed: false,
    };
    let engine = AnimationEngine::new(options);
    let task: SharedTask =
        Rc::new(RefCell::new(FireworksTask::new(engine, surface, host)));

    let weak = Rc::downgrade(&task);
    *frame_callback.borrow_mut() =
        Some(Closure::new(move |_timestamp: f64| {
            let Some(task) = weak.upgrade() else {
                return;
            };
            if let Ok(mut task) = task.try_borrow_mut() {
                task.on_frame();
            }
            if let (Some(panel), Some(countdown)) = (&panel, &mut countdown) {
                if countdown.tick(&Local::now()) {
                    write_countdown(panel, countdown);
                }
            }
        }));

    let weak = Rc::downgrade(&task);
    *resize_callback.borrow_mut() = Some(Closure::new(move || {
        let Some(task) = weak.upgrade() else {
            return;
        };
        let Ok(mut task) = task.try_borrow_mut() else {
            return;
        };
        let (width, height) = viewport(&window);
        task.surface_mut().resize(width, height);
        task.on_resize(width, height);
    }));

    task.borrow_mut().start()?;

    Ok(WebFireworks {
        task,
        _frame_callback: frame_callback,
        _resize_callback: resize_callback,
    })
}

fn write_countdown(panel: &Element, countdown: &Countdown) {
    let left = countdown.time_left();
    write_field(panel, "year", &countdown.year().to_string());
    for (name, value) in left.fields() {
        write_field(panel, name, &value);
    }
    if left.is_zero() {
        if let Err(e) = panel.set_attribute("data-finished", "") {
            log::warn!("could not mark countdown finished: {e:?}");
        }
    }
}

fn write_field(panel: &Element, name: &str, text: &str) {
    match panel.query_selector(&format!("[data-countdown=\"{name}\"]")) {
        Ok(Some(field)) => field.set_text_content(Some(text)),
        Ok(None) => {}
        Err(e) => log::warn!("bad countdown selector {name:?}: {e:?}"),
    }
}
