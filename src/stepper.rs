// One frame of particle physics.
//
// Each particle is either resting (drifting, bouncing off the edges) or
// dispersed (flung away from the pointer, then pulled back to its anchor).
// A dispersed particle is "flying" while it is fast and near the pointer, and
// "returning" otherwise; that split is worked out again every frame rather
// than stored.

use crate::config::{FieldConfig, ReturnMode};
use crate::particle::{Particle, ParticleState};
use crate::store::ParticleStore;
use rand::Rng;
use vecmath::{vec2_add, vec2_len, vec2_scale, vec2_sub, Vector2};
use wasm_bindgen::prelude::*;

// What a particle did during the frame
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Resting,
    Flying,
    Returning,
    // Reached its anchor this frame and is resting again
    Settled,
}

// Per-frame counters, the only thing the step reports back to its caller
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triggered: u32,
    pub resting: u32,
    pub flying: u32,
    pub returning: u32,
    pub settled: u32,
}

impl FrameStats {
    fn record(&mut self, phase: Phase) {
        match phase {
            Phase::Resting => self.resting += 1,
            Phase::Flying => self.flying += 1,
            Phase::Returning => self.returning += 1,
            Phase::Settled => self.settled += 1,
        }
    }

    pub fn dispersed(&self) -> u32 {
        self.flying + self.returning
    }
}

pub fn step<R: Rng>(
    store: &mut ParticleStore,
    pointer: Option<Vector2<f32>>,
    config: &FieldConfig,
    rng: &mut R,
) -> FrameStats {
    let width = store.width();
    let height = store.height();
    let mut stats = FrameStats::default();

    for p in store.particles_mut() {
        // Distances this frame are measured from where the particle started it
        let start = p.pos;
        let distance = match pointer {
            Some(pointer) => vec2_len(vec2_sub(start, pointer)),
            None => std::f32::INFINITY,
        };

        if let Some(pointer) = pointer {
            if p.state == ParticleState::Rest && distance < config.disperse_radius {
                disperse(p, pointer, config, rng);
                stats.triggered += 1;
            }
        }

        let phase = match p.state {
            ParticleState::Dispersed => advance_dispersed(p, start, distance, config),
            ParticleState::Rest => {
                wander(p, width, height, config, rng);
                Phase::Resting
            }
        };

        p.clamp_to(width, height);
        stats.record(phase);
    }

    stats
}

// Fling a resting particle straight away from the pointer
pub fn disperse<R: Rng>(
    p: &mut Particle,
    pointer: Vector2<f32>,
    config: &FieldConfig,
    rng: &mut R,
) {
    let away = vec2_sub(p.pos, pointer);
    let angle = away[1].atan2(away[0]);
    let force = if config.disperse_force_max > config.disperse_force_min {
        rng.gen_range(config.disperse_force_min, config.disperse_force_max)
    } else {
        config.disperse_force_min
    };

    p.state = ParticleState::Dispersed;
    p.disperse_vel = [angle.cos() * force, angle.sin() * force];
}

fn advance_dispersed(
    p: &mut Particle,
    start: Vector2<f32>,
    distance: f32,
    config: &FieldConfig,
) -> Phase {
    p.pos = vec2_add(p.pos, p.disperse_vel);
    p.disperse_vel = vec2_scale(p.disperse_vel, config.disperse_damping);

    let speed = vec2_len(p.disperse_vel);
    if speed >= config.release_speed && distance <= config.release_distance() {
        return Phase::Flying;
    }

    let home = vec2_sub(p.anchor, start);
    if vec2_len(home) < config.snap_distance {
        p.pos = p.anchor;
        p.state = ParticleState::Rest;
        return Phase::Settled;
    }

    let pull = match config.return_mode {
        ReturnMode::Fixed => config.return_force,
        ReturnMode::PerParticle => p.return_speed,
    };
    p.pos = vec2_add(p.pos, vec2_scale(home, pull));
    Phase::Returning
}

fn wander<R: Rng>(p: &mut Particle, width: f32, height: f32, config: &FieldConfig, rng: &mut R) {
    p.pos = vec2_add(p.pos, p.vel);

    let limits = [width, height];
    for axis in 0..2 {
        if p.pos[axis] < 0.0 || p.pos[axis] > limits[axis] {
            p.vel[axis] *= -1.0;
            if config.bounce_jitter > 0.0 {
                p.vel[axis] += rng.gen_range(-config.bounce_jitter, config.bounce_jitter);
            }
        }
    }

    if rng.gen_bool(config.wander_chance.max(0.0).min(1.0)) {
        p.vel = [rng.gen_range(-1.0, 1.0), rng.gen_range(-1.0, 1.0)];
    }
}
