// Browser side of the field: a 2D canvas surface, requestAnimationFrame
// scheduling, the window resize listener, and the handle exported to JS.

use crate::animation::{Animation, State};
use crate::color::Color;
use crate::config::FieldConfig;
use crate::engine::Engine;
use crate::error::{describe, EngineError};
use crate::scheduler::{FrameScheduler, ResizeSource};
use crate::surface::Surface;
use crate::Timer;
use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::{Rc, Weak};
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, Window};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // Without a 2d context there is nothing to draw on, so no loop may start
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(EngineError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::ContextUnavailable)?;
        Ok(CanvasSurface { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn fill_background(&mut self, color: Color, alpha: f64) {
        self.context.set_fill_style_str(&color.css_rgba(alpha));
        self.context.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_disc(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64) {
        self.context.begin_path();
        if let Err(err) = self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0) {
            console::warn_1(&err);
            return;
        }
        self.context.set_fill_style_str(&color.css_hex(alpha));
        self.context.fill();
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, alpha: f64, width: f64) {
        self.context.begin_path();
        self.context.set_stroke_style_str(&color.css_rgba(alpha));
        self.context.set_line_width(width);
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}

pub struct AnimationFrameScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window, callback: Closure<dyn FnMut(f64)>) -> Self {
        AnimationFrameScheduler { window, callback }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32, EngineError> {
        self.window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
            .map_err(|err| EngineError::FrameRequest(describe(&err)))
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            console::warn_1(&err);
        }
    }
}

pub struct WindowResize {
    window: Window,
    callback: Closure<dyn FnMut()>,
    subscribed: bool,
}

impl WindowResize {
    const EVENT: &'static str = "resize";

    pub fn new(window: Window, callback: Closure<dyn FnMut()>) -> Self {
        WindowResize {
            window,
            callback,
            subscribed: false,
        }
    }
}

impl ResizeSource for WindowResize {
    fn viewport(&self) -> (u32, u32) {
        viewport_of(&self.window)
    }

    fn subscribe(&mut self) -> Result<(), EngineError> {
        if self.subscribed {
            return Ok(());
        }
        self.window
            .add_event_listener_with_callback(Self::EVENT, self.callback.as_ref().unchecked_ref())
            .map_err(|err| EngineError::Listener {
                event: Self::EVENT.to_owned(),
                message: describe(&err),
            })?;
        self.subscribed = true;
        Ok(())
    }

    fn unsubscribe(&mut self) {
        if !self.subscribed {
            return;
        }
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback(Self::EVENT, self.callback.as_ref().unchecked_ref())
        {
            console::warn_1(&err);
        }
        self.subscribed = false;
    }
}

pub fn viewport_of(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .unwrap_or(0)
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

type BrowserAnimation = Animation<CanvasSurface, AnimationFrameScheduler, WindowResize>;

// Handle for one mounted field. Dropping it (or `free()` from JS) tears the
// field down just like `dispose`.
#[wasm_bindgen]
pub struct ParticleField {
    inner: Rc<RefCell<BrowserAnimation>>,
    profiling: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl ParticleField {
    pub fn mount(canvas: HtmlCanvasElement) -> Result<ParticleField, JsValue> {
        Ok(ParticleField::mount_with_config(canvas, FieldConfig::default())?)
    }

    pub fn mount_by_id(id: &str) -> Result<ParticleField, JsValue> {
        let canvas = find_canvas(id)?;
        Ok(ParticleField::mount_with_config(canvas, FieldConfig::default())?)
    }

    pub fn mount_with(canvas: HtmlCanvasElement, particle_count: usize, link_distance: f64) -> Result<ParticleField, JsValue> {
        let config = FieldConfig::default()
            .with_particle_count(particle_count)
            .with_link_distance(link_distance);
        Ok(ParticleField::mount_with_config(canvas, config)?)
    }

    pub fn dispose(&self) {
        self.inner.borrow_mut().dispose();
    }

    // Mounted and not yet disposed
    pub fn is_running(&self) -> bool {
        self.inner.borrow().state() == State::Running
    }

    // False once disposed, or when the browser refused the last frame request
    pub fn has_pending_frame(&self) -> bool {
        self.inner.borrow().has_pending_frame()
    }

    pub fn particle_count(&self) -> usize {
        self.inner.borrow().engine().particles().len()
    }

    // Wraps every frame in console.time/timeEnd
    pub fn set_profiling(&self, enabled: bool) {
        self.profiling.set(enabled);
    }
}

impl ParticleField {
    pub fn mount_with_config(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<ParticleField, EngineError> {
        let window = web_sys::window().ok_or(EngineError::NoWindow)?;
        let surface = CanvasSurface::new(canvas)?;
        let profiling = Rc::new(Cell::new(false));

        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<BrowserAnimation>>| {
            let frame_target = weak.clone();
            let frame_profiling = profiling.clone();
            let on_frame = Closure::wrap(Box::new(move |_timestamp: f64| {
                if let Some(animation) = frame_target.upgrade() {
                    let _timer = if frame_profiling.get() {
                        Some(Timer::new("ParticleField::tick"))
                    } else {
                        None
                    };
                    // opacity pulses on wall-clock time, not the frame timestamp
                    if let Err(err) = animation.borrow_mut().on_frame(js_sys::Date::now()) {
                        console::warn_1(&err.to_string().into());
                    }
                }
            }) as Box<dyn FnMut(f64)>);

            let resize_target = weak.clone();
            let resize_window = window.clone();
            let on_resize = Closure::wrap(Box::new(move || {
                if let Some(animation) = resize_target.upgrade() {
                    let (width, height) = viewport_of(&resize_window);
                    animation.borrow_mut().on_resize(width, height);
                }
            }) as Box<dyn FnMut()>);

            RefCell::new(Animation::new(
                Engine::new(surface, config),
                AnimationFrameScheduler::new(window.clone(), on_frame),
                WindowResize::new(window, on_resize),
            ))
        });

        inner.borrow_mut().start(js_sys::Date::now())?;
        console::log_1(
            &format!(
                "particle field mounted with {} particles",
                inner.borrow().engine().particles().len()
            )
            .into(),
        );
        Ok(ParticleField { inner, profiling })
    }
}

impl Drop for ParticleField {
    fn drop(&mut self) {
        if let Ok(mut animation) = self.inner.try_borrow_mut() {
            animation.dispose();
        }
    }
}

fn find_canvas(id: &str) -> Result<HtmlCanvasElement, EngineError> {
    let document = web_sys::window()
        .ok_or(EngineError::NoWindow)?
        .document()
        .ok_or(EngineError::NoDocument)?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| EngineError::CanvasNotFound(id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| EngineError::NotACanvas(id.to_owned()))
}
