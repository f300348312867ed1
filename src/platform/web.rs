//! Browser host
//!
//! Binds the shooter to the page: a 2D canvas context for drawing, the score
//! element and start button for the HUD, and `requestAnimationFrame` for the
//! loop. DOM listeners live for the lifetime of the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement, Window};

use crate::game::{FrameHandle, FrameScheduler, Hud, Shooter, StartControl};
use crate::renderer::Surface;
use crate::settings::Settings;

pub const CANVAS_ID: &str = "shooterCanvas";
pub const SCORE_ID: &str = "score";
pub const START_BUTTON_ID: &str = "startGameButton";

/// Canvas 2D context as a drawing surface
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_text_centered(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align("center");
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::warn!("fillText failed: {e:?}");
        }
    }
}

/// Score element and start button
pub struct DomHud {
    score: Element,
    button: HtmlElement,
}

impl DomHud {
    pub fn new(score: Element, button: HtmlElement) -> Self {
        Self { score, button }
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(e) = self.button.style().set_property(property, value) {
            log::warn!("Cannot set {property} on start button: {e:?}");
        }
    }
}

impl Hud for DomHud {
    fn set_score(&mut self, score: u32) {
        self.score.set_text_content(Some(&score.to_string()));
    }

    fn show_start_control(&mut self, control: StartControl) {
        self.button.set_text_content(Some(control.label));
        self.set_style("background-color", control.background);
        self.set_style("display", "block");
    }

    fn hide_start_control(&mut self) {
        self.set_style("display", "none");
    }
}

/// `requestAnimationFrame` with one shared callback
pub struct RafScheduler {
    window: Window,
    callback: Option<js_sys::Function>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    /// Set the function every booked frame calls
    pub fn bind(&mut self, callback: js_sys::Function) {
        self.callback = Some(callback);
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let Some(callback) = self.callback.as_ref() else {
            log::error!("Frame requested before the callback was bound");
            return None;
        };
        match self.window.request_animation_frame(callback) {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {e:?}", handle.0);
        }
    }
}

type WebShooter = Shooter<CanvasSurface, DomHud, RafScheduler>;

fn element(document: &web_sys::Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

/// Find the page elements, build the shooter and install every listener
pub fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = element(&document, CANVAS_ID)?.dyn_into::<HtmlCanvasElement>()?;
    let score = element(&document, SCORE_ID)?;
    let button = element(&document, START_BUTTON_ID)?.dyn_into::<HtmlElement>()?;

    let settings = Settings::load(&canvas);
    if let Err(e) = settings.validate() {
        return Err(JsValue::from_str(&e.to_string()));
    }
    let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
    log::info!(
        "Canvas {}x{}, seed {seed}",
        settings.canvas_width,
        settings.canvas_height
    );

    let shooter: Rc<RefCell<WebShooter>> = Rc::new(RefCell::new(Shooter::new(
        settings,
        seed,
        CanvasSurface::new(&canvas)?,
        DomHud::new(score, button.clone()),
        RafScheduler::new(window.clone()),
    )));

    // Frame loop
    {
        let game = shooter.clone();
        let closure = Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
            game.borrow_mut().on_frame(now_ms);
        });
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        shooter.borrow_mut().scheduler_mut().bind(callback.clone());
        closure.forget();
    }

    // Held keys
    {
        let game = shooter.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if game.borrow_mut().key_down(&event.code()) {
                event.prevent_default();
            }
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let game = shooter.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            game.borrow_mut().key_up(&event.code());
        });
        document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Focus lost: key-ups will never arrive
    {
        let game = shooter.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().release_keys();
            log::debug!("Window blurred, keys released");
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Start / Play Again
    {
        let game = shooter.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().start();
        });
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    log::info!("Shooter ready");
    Ok(())
}
