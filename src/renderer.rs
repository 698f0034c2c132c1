// Renderer: paints the particle store onto a drawing surface, either straight
// through the canvas 2D API or through a software pixel buffer that is then
// handed to the canvas in one putImageData call.

use crate::color::{Color, Palette, PALETTE_SIZE};
use crate::pixel_surface::PixelSurface;
use crate::store::ParticleStore;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

// Anything particles can be drawn on
pub trait Surface {
    type Error;

    // Wipe the whole `width` x `height` area back to transparent
    fn clear(&mut self, width: f32, height: f32) -> Result<(), Self::Error>;

    fn fill_circle(
        &mut self,
        center: Vector2<f32>,
        radius: f32,
        color: Color,
    ) -> Result<(), Self::Error>;
}

// Clears the surface, then draws every particle in index order. Later
// particles paint over earlier ones.
pub fn render<S: Surface>(
    store: &ParticleStore,
    palette: &Palette,
    surface: &mut S,
) -> Result<(), S::Error> {
    surface.clear(store.width(), store.height())?;
    for p in store.particles() {
        let color = palette[p.color_index as usize % PALETTE_SIZE].with_opacity(p.opacity);
        surface.fill_circle(p.pos, p.size, color)?;
    }
    Ok(())
}

pub struct CanvasSurface<'a> {
    context: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(context: &'a CanvasRenderingContext2d) -> Self {
        CanvasSurface { context }
    }
}

impl<'a> Surface for CanvasSurface<'a> {
    type Error = JsValue;

    fn clear(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.context.clear_rect(0.0, 0.0, width as f64, height as f64);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f32>,
        radius: f32,
        color: Color,
    ) -> Result<(), JsValue> {
        #[allow(deprecated)]
        self.context.set_fill_style(&JsValue::from_str(&color.to_css_hex()));
        self.context.begin_path();
        self.context.arc(center[0] as f64, center[1] as f64, radius as f64, 0.0, 2.0 * PI)?;
        self.context.fill();
        Ok(())
    }
}

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderBackend {
    Canvas2d,
    PixelBuffer,
}

pub struct Renderer {
    backend: RenderBackend,
    pixels: PixelSurface,
}

impl Renderer {
    pub fn new(backend: RenderBackend) -> Self {
        Renderer {
            backend,
            pixels: PixelSurface::new(0, 0),
        }
    }

    pub fn backend(&self) -> RenderBackend {
        self.backend
    }

    pub fn set_backend(&mut self, backend: RenderBackend) {
        self.backend = backend;
    }

    // Surface for this frame's draw pass. The pixel buffer is kept at the
    // canvas size; call `present` once drawing is done.
    pub fn begin_frame<'a>(
        &'a mut self,
        context: &'a CanvasRenderingContext2d,
        width: u32,
        height: u32,
    ) -> FrameSurface<'a> {
        match self.backend {
            RenderBackend::Canvas2d => FrameSurface::Canvas(CanvasSurface::new(context)),
            RenderBackend::PixelBuffer => {
                self.pixels.resize(width, height);
                FrameSurface::Pixels(&mut self.pixels)
            }
        }
    }

    pub fn present(&self, context: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        match self.backend {
            RenderBackend::Canvas2d => Ok(()),
            RenderBackend::PixelBuffer => self.pixels.blit(context),
        }
    }
}

// Whichever surface the active backend draws on
pub enum FrameSurface<'a> {
    Canvas(CanvasSurface<'a>),
    Pixels(&'a mut PixelSurface),
}

impl<'a> Surface for FrameSurface<'a> {
    type Error = JsValue;

    fn clear(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        match self {
            FrameSurface::Canvas(canvas) => canvas.clear(width, height),
            FrameSurface::Pixels(pixels) => match pixels.clear(width, height) {
                Ok(()) => Ok(()),
                Err(never) => match never {},
            },
        }
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f32>,
        radius: f32,
        color: Color,
    ) -> Result<(), JsValue> {
        match self {
            FrameSurface::Canvas(canvas) => canvas.fill_circle(center, radius, color),
            FrameSurface::Pixels(pixels) => match pixels.fill_circle(center, radius, color) {
                Ok(()) => Ok(()),
                Err(never) => match never {},
            },
        }
    }
}
