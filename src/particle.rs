// Per-particle record: where it is, where it came from, how it moves and how
// it is drawn

use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParticleState {
    // Drifting under `vel`
    Rest,
    // Flung by the pointer, moving under `disperse_vel` and heading home
    Dispersed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f32>,
    pub anchor: Vector2<f32>,
    pub vel: Vector2<f32>,
    pub disperse_vel: Vector2<f32>,
    pub return_speed: f32,
    pub size: f32,
    pub opacity: f32,
    pub color_index: u8,
    pub state: ParticleState,
}

impl Particle {
    pub fn new(
        pos: Vector2<f32>,
        vel: Vector2<f32>,
        size: f32,
        opacity: f32,
        color_index: u8,
    ) -> Particle {
        Particle {
            pos,
            anchor: pos,
            vel,
            disperse_vel: [0.0, 0.0],
            return_speed: 0.0,
            size,
            opacity,
            color_index,
            state: ParticleState::Rest,
        }
    }

    pub fn is_dispersed(&self) -> bool {
        self.state == ParticleState::Dispersed
    }

    pub fn clamp_to(&mut self, width: f32, height: f32) {
        self.pos[0] = self.pos[0].max(0.0).min(width);
        self.pos[1] = self.pos[1].max(0.0).min(height);
    }
}
