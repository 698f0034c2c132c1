mod utils;

pub mod color;
pub mod config;
pub mod error;
pub mod particle;
pub mod pixel_surface;
pub mod renderer;
pub mod simulator;
pub mod stepper;
pub mod store;

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::renderer::{RenderBackend, Renderer};
use crate::simulator::Simulator;
use crate::stepper::FrameStats;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Share of pointer moves that get logged in debug mode
const POINTER_LOG_RATE: f64 = 0.03;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// A particle field bound to one canvas. The page owns the canvas, the
// listeners and the requestAnimationFrame loop; it forwards events here and
// calls `tick` once per frame until `teardown`.
#[wasm_bindgen]
pub struct ParticleField {
    canvas: HtmlCanvasElement,
    // None when the canvas has no 2d context, or after teardown
    context: Option<CanvasRenderingContext2d>,
    simulator: Simulator<StdRng>,
    renderer: Renderer,
    debug: bool,
}

#[wasm_bindgen]
impl ParticleField {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, dark_mode: bool) -> ParticleField {
        ParticleField::with_config(canvas, dark_mode, &FieldConfig::default())
    }

    pub fn with_config(
        canvas: HtmlCanvasElement,
        dark_mode: bool,
        config: &FieldConfig,
    ) -> ParticleField {
        ParticleField::attach(canvas, dark_mode, *config, StdRng::from_entropy())
    }

    // Reproducible field: the same seed and inputs give the same frames
    pub fn with_seed(
        canvas: HtmlCanvasElement,
        dark_mode: bool,
        config: &FieldConfig,
        seed: u64,
    ) -> ParticleField {
        ParticleField::attach(canvas, dark_mode, *config, StdRng::seed_from_u64(seed))
    }

    pub fn is_attached(&self) -> bool {
        self.context.is_some()
    }

    pub fn particle_count(&self) -> u32 {
        self.simulator.particle_count() as u32
    }

    pub fn dispersed_count(&self) -> u32 {
        self.simulator.dispersed_count() as u32
    }

    pub fn dark_mode(&self) -> bool {
        self.simulator.dark_mode()
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn set_backend(&mut self, backend: RenderBackend) {
        self.renderer.set_backend(backend);
    }

    // Resize handler: match the canvas backing store to its laid out size and
    // start a new field if that changed anything
    pub fn fit_to_layout(&mut self) -> bool {
        if self.context.is_none() {
            return false;
        }
        let rect = self.canvas.get_bounding_client_rect();
        self.resize_to(rect.width() as u32, rect.height() as u32)
    }

    pub fn resize_to(&mut self, width: u32, height: u32) -> bool {
        if self.context.is_none() {
            return false;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let reinitialized = self.simulator.resize(width as f32, height as f32);
        if self.debug && reinitialized {
            console::log_1(&format!("particle field reset to {}x{}", width, height).into());
        }
        reinitialized
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.simulator.set_dark_mode(dark_mode);
    }

    // Surface-local pixel coordinates
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.simulator.set_pointer(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.simulator.clear_pointer();
    }

    // mousemove handler: client coordinates scaled into canvas pixels
    pub fn pointer_moved(&mut self, event: &MouseEvent) {
        if self.context.is_none() {
            return;
        }
        let rect = self.canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let scale_x = self.canvas.width() as f64 / rect.width();
        let scale_y = self.canvas.height() as f64 / rect.height();
        let x = (event.client_x() as f64 - rect.left()) * scale_x;
        let y = (event.client_y() as f64 - rect.top()) * scale_y;
        self.simulator.set_pointer(x as f32, y as f32);

        if self.debug && js_sys::Math::random() < POINTER_LOG_RATE {
            console::log_1(&format!("pointer: {:.2} {:.2}", x, y).into());
        }
    }

    pub fn pointer_entered(&self) {
        if self.debug {
            console::log_1(&"pointer entered particle field".into());
        }
    }

    pub fn pointer_left(&mut self) {
        self.simulator.clear_pointer();
        if self.debug {
            console::log_1(&"pointer left particle field".into());
        }
    }

    // One animation frame. Before the first resize, on a canvas without a 2d
    // context, or after teardown this does nothing.
    pub fn tick(&mut self) -> Result<FrameStats, JsValue> {
        let context = match &self.context {
            Some(context) => context,
            None => return Ok(FrameStats::default()),
        };
        let _timer = if self.debug {
            Some(Timer::new("ParticleField::tick"))
        } else {
            None
        };

        let (width, height) = (self.canvas.width(), self.canvas.height());
        let mut surface = self.renderer.begin_frame(context, width, height);
        let stats = self.simulator.tick(&mut surface)?;
        self.renderer.present(context)?;

        if self.debug && stats.triggered > 0 {
            console::log_1(
                &format!(
                    "{} particle(s) dispersed, {} away from home ({} returning)",
                    stats.triggered,
                    stats.dispersed(),
                    stats.returning
                )
                .into(),
            );
        }
        Ok(stats)
    }

    // Final: drops every particle and lets go of the canvas context. Any call
    // after this is a no-op.
    pub fn teardown(&mut self) {
        if let Some(context) = self.context.take() {
            context.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
        }
        self.simulator.clear();
        self.simulator.clear_pointer();
        if self.debug {
            console::log_1(&"particle field torn down".into());
        }
    }
}

impl ParticleField {
    fn attach(
        canvas: HtmlCanvasElement,
        dark_mode: bool,
        config: FieldConfig,
        rng: StdRng,
    ) -> ParticleField {
        let context = match context_2d(&canvas) {
            Ok(context) => Some(context),
            Err(err) => {
                console::warn_1(&format!("particle field disabled: {}", err).into());
                None
            }
        };

        let mut field = ParticleField {
            canvas,
            context,
            simulator: Simulator::new(config, dark_mode, rng),
            renderer: Renderer::new(RenderBackend::Canvas2d),
            debug: false,
        };
        field.fit_to_layout();
        field
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, FieldError> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::from_bool(true))?;
    js_sys::Reflect::set(&options, &"desynchronized".into(), &JsValue::from_bool(true))?;

    let context = canvas
        .get_context_with_context_options("2d", &options)?
        .ok_or(FieldError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| FieldError::NoContext)?;
    context.set_image_smoothing_enabled(true);
    Ok(context)
}
