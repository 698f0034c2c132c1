// The particle field without any browser attached: owns the store, the
// current pointer and theme, and the random source every draw comes from.
// Handing in a seeded generator makes a whole run reproducible.

use crate::color::{palette_for, Palette};
use crate::config::FieldConfig;
use crate::renderer::{render, Surface};
use crate::stepper::{self, FrameStats};
use crate::store::ParticleStore;
use rand::Rng;
use vecmath::Vector2;

// Where the pointer is parked when it is not over the surface
pub const POINTER_ABSENT: Vector2<f32> = [-10000.0, -10000.0];

// Any pointer this far left counts as absent
const ABSENT_BELOW_X: f32 = -1000.0;

pub struct Simulator<R> {
    config: FieldConfig,
    rng: R,
    store: Option<ParticleStore>,
    pointer: Option<Vector2<f32>>,
    dark_mode: bool,
}

impl<R: Rng> Simulator<R> {
    // Starts without a store; nothing moves or draws until the first `resize`
    pub fn new(config: FieldConfig, dark_mode: bool, rng: R) -> Self {
        Simulator {
            config,
            rng,
            store: None,
            pointer: None,
            dark_mode,
        }
    }

    pub fn store(&self) -> Option<&ParticleStore> {
        self.store.as_ref()
    }

    pub fn particle_count(&self) -> usize {
        self.store.as_ref().map_or(0, |store| store.len())
    }

    pub fn dispersed_count(&self) -> usize {
        self.store.as_ref().map_or(0, |store| store.dispersed_count())
    }

    // Builds a fresh store when the surface size changes; returns whether it
    // did. A degenerate surface drops the store so later frames do nothing.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            self.store = None;
            return false;
        }
        if let Some(store) = &self.store {
            if store.width() == width && store.height() == height {
                return false;
            }
        }
        self.store = Some(ParticleStore::initialize(
            width,
            height,
            self.config.particle_count as usize,
            &mut self.rng,
        ));
        true
    }

    // Drops every particle; the next `resize` starts over
    pub fn clear(&mut self) {
        self.store = None;
    }

    pub fn pointer(&self) -> Option<Vector2<f32>> {
        self.pointer
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = if x > ABSENT_BELOW_X && x.is_finite() && y.is_finite() {
            Some([x, y])
        } else {
            None
        };
    }

    pub fn clear_pointer(&mut self) {
        self.set_pointer(POINTER_ABSENT[0], POINTER_ABSENT[1]);
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    // A theme flip recolors every particle in place; setting the current
    // theme again is ignored. Returns whether the theme changed.
    pub fn set_dark_mode(&mut self, dark_mode: bool) -> bool {
        if dark_mode == self.dark_mode {
            return false;
        }
        self.dark_mode = dark_mode;
        if let Some(store) = &mut self.store {
            store.resample_colors(&mut self.rng);
        }
        true
    }

    pub fn palette(&self) -> &'static Palette {
        palette_for(self.dark_mode)
    }

    pub fn step(&mut self) -> FrameStats {
        match &mut self.store {
            Some(store) => stepper::step(store, self.pointer, &self.config, &mut self.rng),
            None => FrameStats::default(),
        }
    }

    // One animation frame: advance, then draw the result
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> Result<FrameStats, S::Error> {
        let stats = self.step();
        if let Some(store) = &self.store {
            render(store, palette_for(self.dark_mode), surface)?;
        }
        Ok(stats)
    }
}
