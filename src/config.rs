// Tunables for the particle field. Defaults reproduce the portfolio page's
// constants; every rate is per frame, not per second.

use wasm_bindgen::prelude::*;

// How a dispersed particle moves home once it starts returning
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReturnMode {
    // Every particle uses `FieldConfig::return_force`
    Fixed,
    // Every particle uses its own `return_speed`, drawn at initialization
    PerParticle,
}

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: u32,
    pub disperse_radius: f32,
    pub disperse_force_min: f32,
    pub disperse_force_max: f32,
    pub disperse_damping: f32,
    // Below this speed a dispersed particle starts heading home
    pub release_speed: f32,
    // ... or once it is this many disperse radii away from the pointer
    pub release_distance_factor: f32,
    pub snap_distance: f32,
    pub return_force: f32,
    pub return_mode: ReturnMode,
    pub wander_chance: f64,
    pub bounce_jitter: f32,
}

#[wasm_bindgen]
impl FieldConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FieldConfig {
        FieldConfig::default()
    }

    pub fn release_distance(&self) -> f32 {
        self.disperse_radius * self.release_distance_factor
    }
}

impl FieldConfig {
    pub const DEFAULT_PARTICLE_COUNT: u32 = 600;
    pub const DEFAULT_DISPERSE_RADIUS: f32 = 80.0;

    pub fn with_particle_count(mut self, particle_count: u32) -> FieldConfig {
        self.particle_count = particle_count;
        self
    }

    pub fn with_return_mode(mut self, return_mode: ReturnMode) -> FieldConfig {
        self.return_mode = return_mode;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: FieldConfig::DEFAULT_PARTICLE_COUNT,
            disperse_radius: FieldConfig::DEFAULT_DISPERSE_RADIUS,
            disperse_force_min: 5.0,
            disperse_force_max: 10.0,
            disperse_damping: 0.95,
            release_speed: 0.5,
            release_distance_factor: 3.0,
            snap_distance: 3.0,
            return_force: 0.05,
            return_mode: ReturnMode::Fixed,
            wander_chance: 0.005,
            bounce_jitter: 0.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 600);
        assert_eq!(config.disperse_radius, 80.0);
        assert_eq!(config.release_distance(), 240.0);
        assert_eq!(config.return_mode, ReturnMode::Fixed);
    }

    #[test]
    fn builders_only_touch_their_field() {
        let config = FieldConfig::new()
            .with_particle_count(1)
            .with_return_mode(ReturnMode::PerParticle);
        assert_eq!(config.particle_count, 1);
        assert_eq!(config.return_mode, ReturnMode::PerParticle);
        assert_eq!(config.return_force, FieldConfig::default().return_force);
    }
}
